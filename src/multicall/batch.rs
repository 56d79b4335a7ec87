//! Chunk planning for multicall batches.

use std::num::NonZeroUsize;
use std::ops::Range;

/// Split `len` items into consecutive ranges of at most `batch_size` items.
///
/// Ranges are produced lazily in increasing order, cover `0..len` exactly once
/// and only the last one may be shorter than `batch_size`. `len == 0` yields
/// no ranges.
pub fn chunk_ranges(len: usize, batch_size: NonZeroUsize) -> impl Iterator<Item = Range<usize>> {
    let size = batch_size.get();
    (0..len)
        .step_by(size)
        .map(move |start| start..start.saturating_add(size).min(len))
}

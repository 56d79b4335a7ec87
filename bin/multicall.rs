use anyhow::{bail, Context};
use jemallocator::Jemalloc;
use log::{error, info, warn, LevelFilter};
use simple_logger::SimpleLogger;

#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use multicall::{
    abis::IERC20,
    utils::{hex_encode, parse_addresses},
    CallRequest, CallResult, FailureMode, JsonAbiCodec, Multicaller, Settings,
};

/// Calls issued per token, in this order.
const CALLS_PER_TOKEN: usize = 3;

#[tokio::main()]
async fn main() -> anyhow::Result<()> {
    SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .init()
        .unwrap();

    // Load configuration
    let settings = Settings::new()
        .context("Failed to load config.yaml. Please ensure it exists and is valid")?;

    let tokens = parse_addresses(&settings.tokens)?;
    if tokens.is_empty() {
        bail!("No tokens configured, add a `tokens` list to config.yaml");
    }

    let config = settings
        .multicall_config()
        .context("Failed to build multicall config")?;

    match config.caller().has_code(config.multicall_address()).await {
        Ok(true) => {},
        Ok(false) => warn!(
            "No contract code at {}, multicall will fail on this chain",
            config.multicall_address()
        ),
        Err(e) => warn!("Could not check multicall deployment: {}", e),
    }

    info!(
        "Querying {} token(s) through {} (batch size {}, timeout {:?})",
        tokens.len(),
        config.multicall_address(),
        config.batch_size(),
        config.timeout()
    );

    let codec = JsonAbiCodec::bundled().context("Failed to load bundled Multicall3 ABI")?;
    let multicaller = Multicaller::with_codec(config, codec);

    let mut requests = Vec::with_capacity(tokens.len() * CALLS_PER_TOKEN);
    for token in &tokens {
        requests.push(CallRequest::from_call(*token, &IERC20::nameCall {}, true));
        requests.push(CallRequest::from_call(*token, &IERC20::symbolCall {}, true));
        requests.push(CallRequest::from_call(*token, &IERC20::decimalsCall {}, true));
    }

    let mode = FailureMode::from_partial_flag(settings.multicall.partial_results);
    let outcome = multicaller.execute_with(&requests, mode).await;

    // Only complete token triples are reported when a later batch failed.
    for (token, results) in tokens.iter().zip(outcome.results.chunks_exact(CALLS_PER_TOKEN)) {
        info!("{}: {}", token, describe_token(results));
    }

    if let Some(e) = outcome.error {
        if let Some(start) = e.chunk_start() {
            let token = tokens[start / CALLS_PER_TOKEN];
            error!("No results from token {} onwards", token);
        }
        error!("Multicall aborted: {:#}", anyhow::Error::from(e));
        std::process::exit(1);
    }

    Ok(())
}

fn describe_token(results: &[CallResult]) -> String {
    let name = decode_or_placeholder::<IERC20::nameCall>(&results[0]);
    let symbol = decode_or_placeholder::<IERC20::symbolCall>(&results[1]);
    let decimals = decode_or_placeholder::<IERC20::decimalsCall>(&results[2]);
    format!("name={name} symbol={symbol} decimals={decimals}")
}

fn decode_or_placeholder<C>(result: &CallResult) -> String
where
    C: alloy::sol_types::SolCall,
    C::Return: ToString,
{
    match result.decode::<C>() {
        Ok(Some(value)) => value.to_string(),
        Ok(None) => "<failed>".to_string(),
        Err(_) => format!("<undecodable {}>", hex_encode(&result.data)),
    }
}

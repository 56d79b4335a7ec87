use std::future::Future;

use alloy::{
    eips::BlockId,
    network::TransactionBuilder,
    primitives::{Address, Bytes},
    providers::{DynProvider, Provider, ProviderBuilder},
    rpc::types::TransactionRequest,
    transports::TransportResult,
};
use anyhow::{Context, Result};
use log::debug;
use url::Url;

/// A single request/response `eth_call` against a contract.
///
/// Implementations must be safe to share between concurrent multicall
/// invocations. Timeouts are applied by the caller.
pub trait RemoteCaller: Send + Sync {
    fn call(
        &self,
        to: Address,
        data: Bytes,
        block: Option<BlockId>,
    ) -> impl Future<Output = TransportResult<Bytes>> + Send;
}

/// [`RemoteCaller`] backed by an alloy provider.
#[derive(Clone)]
pub struct ProviderCaller {
    provider: DynProvider,
}

impl ProviderCaller {
    pub fn new(provider: DynProvider) -> Self {
        Self { provider }
    }

    /// Connect to a JSON-RPC endpoint over HTTP.
    pub fn connect_http(rpc_url: &str) -> Result<Self> {
        let url = Url::parse(rpc_url).context("Invalid RPC URL")?;
        let client = ProviderBuilder::new().connect_http(url);
        Ok(Self::new(DynProvider::new(client)))
    }

    /// Whether any contract code is deployed at `address`.
    pub async fn has_code(&self, address: Address) -> TransportResult<bool> {
        let code = self.provider.get_code_at(address).await?;
        debug!("Code at {} is {} bytes", address, code.len());
        Ok(!code.is_empty())
    }
}

impl RemoteCaller for ProviderCaller {
    async fn call(
        &self,
        to: Address,
        data: Bytes,
        block: Option<BlockId>,
    ) -> TransportResult<Bytes> {
        let tx = TransactionRequest::default().with_to(to).with_input(data);
        match block {
            Some(block) => self.provider.call(tx).block(block).await,
            None => self.provider.call(tx).await,
        }
    }
}

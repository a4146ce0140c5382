use alloy::providers::{DynProvider, Provider, ProviderBuilder, WsConnect};
use async_trait::async_trait;
use log::debug;

use crate::{
    errors::{ConfigError, OathstoneError, Result},
    traits::Connector,
};

use super::AlloyConnection;

/// Builds a read-only provider for `rpc_url`
///
/// `http(s)://` endpoints use the HTTP transport, anything else is treated as
/// a WebSocket endpoint. No fillers are installed: signing providers are
/// layered on top per transfer.
pub async fn get_provider(network: &str, rpc_url: &str) -> Result<DynProvider> {
    let provider = if rpc_url.starts_with("http") {
        let url = rpc_url.parse().map_err(|_| ConfigError::InvalidRpcUrl {
            network: network.to_string(),
            reason: "Failed to parse RPC URL".to_string(),
        })?;
        ProviderBuilder::new()
            .disable_recommended_fillers()
            .connect_http(url)
            .erased()
    } else {
        let ws_connect = WsConnect::new(rpc_url);
        ProviderBuilder::new()
            .disable_recommended_fillers()
            .connect_ws(ws_connect)
            .await
            .map_err(|e| ConfigError::InvalidRpcUrl {
                network: network.to_string(),
                reason: format!("Failed to connect to WebSocket: {e}"),
            })?
            .erased()
    };
    Ok(provider)
}

/// [`Connector`] backed by alloy providers
///
/// # Example
/// ```no_run
/// # async fn example() -> Result<(), oathstone::OathstoneError> {
/// use oathstone::{evm::AlloyConnector, traits::Connector};
/// let connection = AlloyConnector.connect("celo", "https://forno.celo.org").await?;
/// println!("chain id {}", connection.chain_id());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AlloyConnector;

#[async_trait]
impl Connector for AlloyConnector {
    type Connection = AlloyConnection;

    async fn connect(&self, network: &str, rpc_url: &str) -> Result<AlloyConnection> {
        let provider = get_provider(network, rpc_url).await?;
        let chain_id = provider
            .get_chain_id()
            .await
            .map_err(|e| OathstoneError::transport(network, "eth_chainId", e))?;
        debug!("network '{}' answered with chain id {}", network, chain_id);
        Ok(AlloyConnection::new(network, chain_id, provider))
    }
}

use std::collections::BTreeMap;

use alloy::{contract::Interface, json_abi::JsonAbi, primitives::Address};
use log::{debug, warn};

use crate::{
    config::{OathstoneConfig, TokenConfig},
    errors::Result,
    registry::NetworkRegistry,
    traits::{ChainConnection, Connector},
    utils::erc20_utils::DEFAULT_ERC20_ABI,
};

/// A token contract on one network
///
/// Holds the address, ABI and configured overrides. The connection is looked
/// up by network name on every call, so a binding outlives neither a reset
/// nor a missing connection: calls through it then fail with `NotConnected`.
#[derive(Debug, Clone)]
pub struct ContractBinding {
    network: String,
    token_name: String,
    address: Address,
    interface: Interface,
    decimals_override: Option<u8>,
    display_symbol: Option<String>,
    display_name: Option<String>,
}

impl ContractBinding {
    pub fn new(network: &str, token_name: &str, address: Address, token: &TokenConfig) -> Self {
        let abi = token
            .abi_override
            .clone()
            .unwrap_or_else(|| DEFAULT_ERC20_ABI.clone());
        Self {
            network: network.to_string(),
            token_name: token_name.to_string(),
            address,
            interface: Interface::new(abi),
            decimals_override: token.decimals_override,
            display_symbol: token.display_symbol.clone(),
            display_name: token.display_name.clone(),
        }
    }

    pub fn network(&self) -> &str {
        &self.network
    }

    pub fn token_name(&self) -> &str {
        &self.token_name
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn interface(&self) -> &Interface {
        &self.interface
    }

    pub fn abi(&self) -> &JsonAbi {
        self.interface.abi()
    }

    pub fn decimals_override(&self) -> Option<u8> {
        self.decimals_override
    }

    pub fn display_symbol(&self) -> Option<&str> {
        self.display_symbol.as_deref()
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }
}

/// Contract bindings keyed by network, then token name
#[derive(Debug, Default)]
pub struct ContractRegistry {
    bindings: BTreeMap<String, BTreeMap<String, ContractBinding>>,
}

impl ContractRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a binding for every token with a contract address
    ///
    /// Connects all networks first when `networks` is still empty. Tokens
    /// without an address are skipped; see
    /// [`OathstoneConfig::incomplete_tokens`]. The previous bindings are
    /// replaced as a whole, so tokens removed from `config` disappear.
    pub async fn load_all<C, K>(
        &mut self,
        config: &OathstoneConfig,
        networks: &mut NetworkRegistry<C>,
        connector: &K,
    ) -> Result<()>
    where
        C: ChainConnection,
        K: Connector<Connection = C>,
    {
        if networks.is_empty() {
            debug!("no connections yet, connecting before loading contracts");
            networks.connect_all(config, connector).await?;
        }

        let mut bindings = BTreeMap::new();
        for (network, network_config) in &config.networks {
            let mut tokens = BTreeMap::new();
            for (token_name, token) in &network_config.tokens {
                let Some(address) = token.contract_address else {
                    warn!(
                        "token '{}' on '{}' has no contract address, skipping",
                        token_name, network
                    );
                    continue;
                };
                tokens.insert(
                    token_name.clone(),
                    ContractBinding::new(network, token_name, address, token),
                );
            }
            debug!("loaded {} token contract(s) on '{}'", tokens.len(), network);
            bindings.insert(network.clone(), tokens);
        }
        self.bindings = bindings;
        Ok(())
    }

    pub fn get_binding(&self, network: &str, token_name: &str) -> Option<&ContractBinding> {
        self.bindings.get(network)?.get(token_name)
    }

    pub fn clear(&mut self) {
        self.bindings.clear();
    }
}

//! The orchestrating client
//!
//! [`Oathstone`] owns the normalized configuration, the network registry and
//! the contract registry, and exposes the caller-facing operations.
//!
//! Mutating operations (`connect_networks`, `load_contracts`, `reset`) take
//! `&mut self`. Balance and transfer operations take `&self` and never touch
//! registry state, so they can be awaited concurrently once the client is
//! populated.

use std::{fmt::Display, path::Path};

use crate::{
    config::{normalize, OathstoneConfig, RawConfig},
    errors::{OathstoneError, Result},
    evm::AlloyConnector,
    registry::{ContractBinding, ContractRegistry, NetworkRegistry},
    traits::Connector,
    types::{TokenMetadata, TransferResult, WalletInfo},
    utils::{balance_utils, erc20_utils, transfer_utils},
    wallet,
};

/// Multi-network EVM client
///
/// # Example
/// ```no_run
/// use oathstone::Oathstone;
///
/// # async fn example() -> Result<(), oathstone::OathstoneError> {
/// let mut client = Oathstone::from_path("oathstone.json")?;
/// client.load_contracts().await?;
///
/// let owner = "0x28C6c06298d514Db089934071355E5743bf21d60";
/// println!("CELO: {}", client.get_native_balance("celo", owner).await?);
/// println!("cUSD: {}", client.get_token_balance("celo", "USD", owner).await?);
/// # Ok(())
/// # }
/// ```
pub struct Oathstone<K: Connector = AlloyConnector> {
    config: OathstoneConfig,
    connector: K,
    networks: NetworkRegistry<K::Connection>,
    contracts: ContractRegistry,
}

impl Oathstone<AlloyConnector> {
    /// Validates `raw` and builds a client backed by alloy providers
    ///
    /// Nothing is connected yet; call [`Oathstone::connect_networks`] or
    /// [`Oathstone::load_contracts`].
    pub fn new(raw: &RawConfig) -> Result<Self> {
        Self::with_connector(raw, AlloyConnector)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::new(&RawConfig::from_json_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(&RawConfig::from_path(path)?)
    }
}

impl<K: Connector> Oathstone<K> {
    /// Validates `raw` and builds a client using `connector` for transports
    pub fn with_connector(raw: &RawConfig, connector: K) -> Result<Self> {
        Ok(Self {
            config: normalize(raw)?,
            connector,
            networks: NetworkRegistry::new(),
            contracts: ContractRegistry::new(),
        })
    }

    /// Connects every configured network
    ///
    /// Fails on the first network whose endpoint cannot be resolved or
    /// reached; nothing from the failed call is installed.
    pub async fn connect_networks(&mut self) -> Result<bool> {
        self.networks.connect_all(&self.config, &self.connector).await?;
        Ok(true)
    }

    /// Builds every token binding, connecting first if nothing is connected
    pub async fn load_contracts(&mut self) -> Result<bool> {
        self.contracts
            .load_all(&self.config, &mut self.networks, &self.connector)
            .await?;
        Ok(true)
    }

    /// Generates a fresh wallet; the client keeps no copy
    pub fn create_wallet(&self) -> Result<WalletInfo> {
        wallet::create_wallet()
    }

    /// Native balance of `address` on `network`, e.g. `"1.5"`
    pub async fn get_native_balance(&self, network: &str, address: &str) -> Result<String> {
        balance_utils::query_native_balance(&self.networks, network, address).await
    }

    /// Token balance of `address`, scaled by the token's decimals
    pub async fn get_token_balance(&self, network: &str, token_name: &str, address: &str) -> Result<String> {
        balance_utils::query_token_balance(&self.networks, &self.contracts, network, token_name, address).await
    }

    /// Sends native currency and waits for one confirmation
    pub async fn transfer_native(
        &self,
        network: &str,
        private_key: &str,
        to: &str,
        amount: impl Display,
    ) -> Result<TransferResult> {
        transfer_utils::transfer_native(&self.networks, network, private_key, to, amount).await
    }

    /// Sends tokens through `transfer(address,uint256)` and waits for one confirmation
    pub async fn transfer_token(
        &self,
        network: &str,
        token_name: &str,
        private_key: &str,
        to: &str,
        amount: impl Display,
    ) -> Result<TransferResult> {
        transfer_utils::transfer_token(
            &self.networks,
            &self.contracts,
            network,
            token_name,
            private_key,
            to,
            amount,
        )
        .await
    }

    /// Symbol, name and decimals of a loaded token
    ///
    /// Configured `symbol`/`name` take precedence over the on-chain values.
    /// On-chain lookups that fail leave the field empty.
    pub async fn token_metadata(&self, network: &str, token_name: &str) -> Result<TokenMetadata> {
        let connection = self
            .networks
            .get_connection(network)
            .ok_or_else(|| OathstoneError::not_connected(network))?;
        let contract = self
            .contracts
            .get_binding(network, token_name)
            .ok_or_else(|| OathstoneError::not_found(network, token_name))?;

        let symbol = async {
            match contract.display_symbol() {
                Some(symbol) => Some(symbol.to_string()),
                None => erc20_utils::query_string(connection, contract, erc20_utils::SYMBOL).await.ok(),
            }
        };
        let name = async {
            match contract.display_name() {
                Some(name) => Some(name.to_string()),
                None => erc20_utils::query_string(connection, contract, erc20_utils::NAME).await.ok(),
            }
        };
        let decimals = erc20_utils::resolve_decimals(connection, contract);
        let (symbol, name, decimals) = tokio::join!(symbol, name, decimals);

        Ok(TokenMetadata {
            network: network.to_string(),
            token_name: token_name.to_string(),
            address: contract.address(),
            symbol,
            name,
            decimals,
        })
    }

    /// `(network, token)` pairs declared without a contract address
    ///
    /// These are skipped by [`Oathstone::load_contracts`]; callers wanting
    /// strict validation can reject a non-empty result.
    pub fn incomplete_tokens(&self) -> Vec<(String, String)> {
        self.config.incomplete_tokens()
    }

    pub fn config(&self) -> &OathstoneConfig {
        &self.config
    }

    /// Configured network names, connected or not
    pub fn network_names(&self) -> impl Iterator<Item = &str> {
        self.config.networks.keys().map(String::as_str)
    }

    pub fn is_connected(&self, network: &str) -> bool {
        self.networks.is_connected(network)
    }

    pub fn connection(&self, network: &str) -> Option<&K::Connection> {
        self.networks.get_connection(network)
    }

    pub fn binding(&self, network: &str, token_name: &str) -> Option<&ContractBinding> {
        self.contracts.get_binding(network, token_name)
    }

    /// Drops all connections and bindings
    pub fn reset(&mut self) {
        self.contracts.clear();
        self.networks.clear();
    }
}

//! Network and token configuration
//!
//! Provides:
//! - [`RawConfig`]: the caller-facing JSON document, deserialized as-is
//! - [`normalize`]: validation and canonicalization into [`OathstoneConfig`]
//! - [`resolve_rpc_url`]: strict testnet/mainnet endpoint selection
//!
//! # Example
//! ```no_run
//! use oathstone::config::{RawConfig, normalize};
//!
//! # fn example() -> Result<(), oathstone::OathstoneError> {
//! let raw = RawConfig::from_json_str(r#"{
//!     "networks": {
//!         "celo": {
//!             "environment": 0,
//!             "rpcUrl": { "testnet": "https://alfajores-forno.celo-testnet.org" },
//!             "tokens": {
//!                 "USD": { "address": "0x874069Fa1Eb16D44d622F2e0Ca25eeA172369bC1", "decimals": 18 }
//!             }
//!         }
//!     }
//! }"#)?;
//! let config = normalize(&raw)?;
//! assert!(config.networks.contains_key("celo"));
//! # Ok(())
//! # }
//! ```

use std::{collections::BTreeMap, fs, path::Path};

use alloy::{json_abi::JsonAbi, primitives::Address};
use serde::Deserialize;

use crate::{
    errors::{ConfigError, Result},
    types::Environment,
};

/// Configuration document as supplied by the caller
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfig {
    pub networks: Option<BTreeMap<String, RawNetworkConfig>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNetworkConfig {
    /// `0` for testnet, anything else for mainnet; required
    pub environment: i64,
    #[serde(default)]
    pub rpc_url: RpcEndpoints,
    #[serde(default)]
    pub tokens: BTreeMap<String, RawTokenConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTokenConfig {
    pub contract_address: Option<String>,
    pub address: Option<String>,
    pub abi: Option<JsonAbi>,
    pub decimals: Option<u8>,
    pub symbol: Option<String>,
    pub name: Option<String>,
}

/// Testnet and mainnet endpoints of a network
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RpcEndpoints {
    pub testnet: Option<String>,
    pub mainnet: Option<String>,
}

impl RawConfig {
    /// Parses a JSON configuration document
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()).into())
    }

    /// Reads and parses a JSON configuration file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| ConfigError::Parse(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&contents)
    }
}

/// Validated configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OathstoneConfig {
    pub networks: BTreeMap<String, NetworkConfig>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NetworkConfig {
    pub environment: Environment,
    pub rpc_endpoints: RpcEndpoints,
    pub tokens: BTreeMap<String, TokenConfig>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TokenConfig {
    /// `contractAddress` if given, else `address`; `None` when neither was set
    pub contract_address: Option<Address>,
    pub abi_override: Option<JsonAbi>,
    pub decimals_override: Option<u8>,
    pub display_symbol: Option<String>,
    pub display_name: Option<String>,
}

impl OathstoneConfig {
    /// `(network, token)` pairs declared without any contract address
    pub fn incomplete_tokens(&self) -> Vec<(String, String)> {
        self.networks
            .iter()
            .flat_map(|(network, config)| {
                config
                    .tokens
                    .iter()
                    .filter(|(_, token)| token.contract_address.is_none())
                    .map(move |(token, _)| (network.clone(), token.clone()))
            })
            .collect()
    }
}

/// Validates and canonicalizes a raw configuration
///
/// # Errors
/// * [`ConfigError::MissingNetworks`] - no `networks` table
/// * [`ConfigError::NoEndpoints`] - a network has neither endpoint
/// * [`ConfigError::InvalidAddress`] - a token address is not valid hex
///
/// Tokens with no address at all are kept with `contract_address: None`.
pub fn normalize(raw: &RawConfig) -> Result<OathstoneConfig> {
    let raw_networks = raw.networks.as_ref().ok_or(ConfigError::MissingNetworks)?;

    let mut networks = BTreeMap::new();
    for (name, raw_network) in raw_networks {
        let endpoints = &raw_network.rpc_url;
        if is_blank(&endpoints.testnet) && is_blank(&endpoints.mainnet) {
            return Err(ConfigError::NoEndpoints { network: name.clone() }.into());
        }

        let mut tokens = BTreeMap::new();
        for (token_name, raw_token) in &raw_network.tokens {
            tokens.insert(token_name.clone(), normalize_token(name, token_name, raw_token)?);
        }

        networks.insert(
            name.clone(),
            NetworkConfig {
                environment: Environment::from_code(raw_network.environment),
                rpc_endpoints: endpoints.clone(),
                tokens,
            },
        );
    }

    Ok(OathstoneConfig { networks })
}

fn normalize_token(network: &str, token: &str, raw: &RawTokenConfig) -> Result<TokenConfig> {
    let canonical = raw
        .contract_address
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .or_else(|| raw.address.as_deref().filter(|s| !s.trim().is_empty()));

    let contract_address = canonical
        .map(|address| {
            address.trim().parse::<Address>().map_err(|_| ConfigError::InvalidAddress {
                network: network.to_string(),
                token: token.to_string(),
                address: address.to_string(),
            })
        })
        .transpose()?;

    Ok(TokenConfig {
        contract_address,
        abi_override: raw.abi.clone(),
        decimals_override: raw.decimals,
        display_symbol: raw.symbol.clone(),
        display_name: raw.name.clone(),
    })
}

/// Selects the endpoint for the network's environment
///
/// Testnet when `environment == 0`, mainnet otherwise. There is no fallback
/// to the other endpoint: a missing or empty selection is an error.
pub fn resolve_rpc_url<'a>(network: &str, config: &'a NetworkConfig) -> Result<&'a str> {
    let selected = match config.environment {
        Environment::Testnet => config.rpc_endpoints.testnet.as_deref(),
        Environment::Mainnet => config.rpc_endpoints.mainnet.as_deref(),
    };
    match selected.map(str::trim) {
        Some(url) if !url.is_empty() => Ok(url),
        _ => Err(ConfigError::MissingRpcUrl {
            network: network.to_string(),
            environment: config.environment.as_str(),
        }
        .into()),
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |s| s.trim().is_empty())
}

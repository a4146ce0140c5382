//! Error types for the network and contract registries
//!
//! This module defines the error handling used across the crate:
//! - Configuration errors, detected eagerly at normalization/connect time
//! - Registry lookup errors (missing connection or contract binding)
//! - Amount conversion errors
//! - ABI encoding errors, raised before anything reaches the node
//! - Remote errors (transport failures and rejected submissions)

use thiserror::Error;

/// Top-level error type for all client operations
///
/// Every variant names the network (and token, where one is involved) so the
/// caller can tell whether to fix configuration, retry, or abort.
#[derive(Debug, Error)]
pub enum OathstoneError {
    /// Malformed or incomplete configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Operation on a network with no established connection
    #[error("Network '{network}' is not connected")]
    NotConnected { network: String },

    /// Operation on a token with no loaded contract binding
    #[error("Token '{token}' is not loaded on network '{network}'")]
    NotFound { network: String, token: String },

    /// Amount cannot be represented exactly in smallest units
    #[error("Invalid amount '{amount}' for {decimals} decimals: {reason}")]
    InvalidAmount {
        amount: String,
        decimals: u8,
        reason: String,
    },

    /// Malformed address or private key supplied to an operation
    #[error("Invalid {what} on network '{network}': {reason}")]
    InvalidInput {
        network: String,
        what: &'static str,
        reason: String,
    },

    /// Function missing from the token's ABI, or arguments that do not match it
    ///
    /// Raised before anything is sent to the node.
    #[error("Cannot encode '{function}' for token '{token}' on network '{network}': {reason}")]
    Contract {
        network: String,
        token: String,
        function: String,
        reason: String,
    },

    /// The network rejected a signed transaction
    #[error("Transaction rejected on network '{network}': {reason}")]
    Submission { network: String, reason: String },

    /// Key generation or derivation failed
    #[error("Wallet generation failed: {0}")]
    Wallet(String),

    /// An RPC call failed for reasons outside this crate
    #[error("RPC call '{operation}' failed on network '{network}': {reason}")]
    Transport {
        network: String,
        operation: String,
        reason: String,
    },
}

/// Configuration-specific errors
///
/// Raised while normalizing a raw configuration or resolving a network's
/// RPC endpoint.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The `networks` table is missing entirely
    #[error("Configuration has no 'networks' table")]
    MissingNetworks,

    /// A network declares neither a testnet nor a mainnet endpoint
    #[error("Network '{network}' has no RPC endpoint configured")]
    NoEndpoints { network: String },

    /// The endpoint selected by `environment` is absent or empty
    ///
    /// # Fields
    /// * `network` - Network name
    /// * `environment` - "testnet" or "mainnet"
    #[error("Network '{network}' has no {environment} RPC endpoint")]
    MissingRpcUrl {
        network: String,
        environment: &'static str,
    },

    /// Endpoint could not be parsed or connected to
    #[error("Invalid RPC URL for network '{network}': {reason}")]
    InvalidRpcUrl { network: String, reason: String },

    /// Token address is not a 20-byte hex address
    #[error("Invalid contract address '{address}' for token '{token}' on network '{network}'")]
    InvalidAddress {
        network: String,
        token: String,
        address: String,
    },

    /// Source document could not be read or parsed
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Coarse error category, independent of payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    NotConnected,
    NotFound,
    InvalidAmount,
    InvalidInput,
    Contract,
    Submission,
    Transport,
    Wallet,
}

impl OathstoneError {
    /// Returns the category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            OathstoneError::Config(_) => ErrorKind::Config,
            OathstoneError::NotConnected { .. } => ErrorKind::NotConnected,
            OathstoneError::NotFound { .. } => ErrorKind::NotFound,
            OathstoneError::InvalidAmount { .. } => ErrorKind::InvalidAmount,
            OathstoneError::InvalidInput { .. } => ErrorKind::InvalidInput,
            OathstoneError::Contract { .. } => ErrorKind::Contract,
            OathstoneError::Submission { .. } => ErrorKind::Submission,
            OathstoneError::Transport { .. } => ErrorKind::Transport,
            OathstoneError::Wallet(_) => ErrorKind::Wallet,
        }
    }

    pub(crate) fn not_connected(network: &str) -> Self {
        OathstoneError::NotConnected {
            network: network.to_string(),
        }
    }

    pub(crate) fn not_found(network: &str, token: &str) -> Self {
        OathstoneError::NotFound {
            network: network.to_string(),
            token: token.to_string(),
        }
    }

    pub(crate) fn transport(network: &str, operation: &str, reason: impl ToString) -> Self {
        OathstoneError::Transport {
            network: network.to_string(),
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T, E = OathstoneError> = std::result::Result<T, E>;

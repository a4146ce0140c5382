//! Core types shared by the registries and the client
//!
//! - Network environment selection
//! - Wallet material returned to callers
//! - Transfer results and token metadata

pub use alloy::primitives::{Address, TxHash, U256};
use serde::Serialize;

/// Decimal places of every EVM native currency (wei)
pub const NATIVE_DECIMALS: u8 = 18;

/// Fallback when a token does not answer `decimals()`
pub const DEFAULT_TOKEN_DECIMALS: u8 = 18;

/// Which of a network's endpoints is in use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Environment {
    Testnet,
    Mainnet,
}

impl Environment {
    /// `0` selects testnet, any other value mainnet
    pub fn from_code(code: i64) -> Self {
        if code == 0 {
            Environment::Testnet
        } else {
            Environment::Mainnet
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Testnet => "testnet",
            Environment::Mainnet => "mainnet",
        }
    }
}

/// Freshly generated wallet
///
/// Never retained by the client; the caller owns its confidentiality.
#[derive(Clone, Serialize)]
pub struct WalletInfo {
    /// Checksummed address
    pub address: String,
    /// 0x-prefixed hex private key
    pub private_key: String,
    /// BIP-39 phrase the key was derived from, if any
    pub mnemonic_phrase: Option<String>,
}

impl std::fmt::Debug for WalletInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletInfo")
            .field("address", &self.address)
            .field("private_key", &"<redacted>")
            .field("mnemonic_phrase", &self.mnemonic_phrase.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Hash and receipt status of a confirmed transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmittedTx {
    pub hash: TxHash,
    /// `Some(1)` success, `Some(0)` reverted, `None` if the node did not report it
    pub status: Option<u64>,
}

/// Outcome of a completed transfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferResult {
    /// Network the transfer was submitted on
    pub network: String,
    /// Token name; `None` for native transfers
    pub token_name: Option<String>,
    pub transaction_hash: TxHash,
    pub confirmation_status: Option<u64>,
}

impl TransferResult {
    pub fn is_native(&self) -> bool {
        self.token_name.is_none()
    }
}

/// Display metadata for a loaded token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenMetadata {
    pub network: String,
    pub token_name: String,
    pub address: Address,
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub decimals: u8,
}

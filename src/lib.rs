//! # Oathstone
//!
//! A client library for working with several EVM networks at once: it turns
//! a declarative network/token configuration into live RPC connections and
//! token contract bindings, then reads balances and sends native or ERC20
//! transfers with consistent result shapes.
//!
//! ## Core Features
//!
//! - **Configuration**
//!   - Testnet/mainnet endpoint selection per network
//!   - `address`/`contractAddress` aliasing for tokens
//!   - Per-token ABI and decimals overrides
//!
//! - **Registries**
//!   - One connection per network
//!   - One contract binding per (network, token)
//!
//! - **Operations**
//!   - Native and token balances as exact decimal strings
//!   - Native and token transfers, confirmed before returning
//!   - Wallet generation
//!
//! ## Features
//!
//! - `rustls-tls`: Uses rustls as the TLS implementation instead of native-tls (OpenSSL).
//!   This is useful for environments where OpenSSL is not available or not desired.
//!
//!   Usage example:
//!   ```toml
//!   [dependencies]
//!   oathstone = { version = "0.1", default-features = false, features = ["rustls-tls"] }
//!   ```
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use oathstone::Oathstone;
//!
//! # async fn example() -> Result<(), oathstone::OathstoneError> {
//! let mut client = Oathstone::from_json_str(r#"{
//!     "networks": {
//!         "celo": {
//!             "environment": 0,
//!             "rpcUrl": {
//!                 "testnet": "https://alfajores-forno.celo-testnet.org",
//!                 "mainnet": "https://forno.celo.org"
//!             },
//!             "tokens": {
//!                 "USD": { "address": "0x874069Fa1Eb16D44d622F2e0Ca25eeA172369bC1", "decimals": 18 }
//!             }
//!         }
//!     }
//! }"#)?;
//!
//! client.connect_networks().await?;
//! client.load_contracts().await?;
//!
//! let wallet = client.create_wallet()?;
//! println!("new wallet {}", wallet.address);
//!
//! let balance = client.get_token_balance("celo", "USD", &wallet.address).await?;
//! println!("cUSD balance: {balance}");
//!
//! let result = client
//!     .transfer_token("celo", "USD", &wallet.private_key, "0x000000000000000000000000000000000000dEaD", "0.5")
//!     .await?;
//! println!("sent in {} (status {:?})", result.transaction_hash, result.confirmation_status);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Structure
//!
//! - `client`: the [`Oathstone`] orchestrator
//! - `config`: raw configuration, normalization and endpoint resolution
//! - `registry`: network and contract registries
//! - `evm`: alloy-backed connections
//! - `traits`: connection capability traits
//! - `utils`: units, ERC20 reads, balances and transfers
//! - `types`: shared data types
//! - `errors`: error types and handling

pub mod client;
pub mod config;
pub mod errors;
pub mod evm;
pub mod registry;
pub mod traits;
pub mod types;
pub mod utils;
pub mod wallet;

// Re-export only the essential types and functions
pub use client::Oathstone;
pub use config::{OathstoneConfig, RawConfig};
pub use errors::{ConfigError, ErrorKind, OathstoneError};
pub use evm::{AlloyConnection, AlloyConnector};
pub use traits::{ChainConnection, Connector};
pub use types::{TokenMetadata, TransferResult, WalletInfo};

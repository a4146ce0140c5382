//! Helpers behind the client operations
//!
//! # Modules
//!
//! - [`units`]: fixed-point conversion between human amounts and smallest units
//! - [`erc20_utils`]: built-in ERC20 ABI and typed token reads
//!   - Balance and decimals queries
//!   - Decimals resolution with the 18-decimal fallback
//! - [`balance_utils`]: native and token balance queries
//! - [`transfer_utils`]: native and token transfers
//! - [`error_utils`]: revert reason decoding for node errors
//!
//! # Example
//!
//! ```
//! use oathstone::utils::units::{format_amount, parse_amount};
//!
//! let raw = parse_amount("5.5", 6).unwrap();
//! assert_eq!(raw.to::<u64>(), 5_500_000);
//! assert_eq!(format_amount(raw, 6), "5.5");
//! ```

/// Amount conversion utilities
pub mod units;

/// ERC20 token interaction utilities
pub mod erc20_utils;

/// Error parsing utilities
pub mod error_utils;

/// Balance query utilities
pub mod balance_utils;

/// Transfer utilities
pub mod transfer_utils;

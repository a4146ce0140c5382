//! Network and contract registries
//!
//! - [`NetworkRegistry`]: one connection per configured network
//! - [`ContractRegistry`]: one [`ContractBinding`] per (network, token)
//!
//! Both are plain owned maps. They are mutated only by connect/load/reset and
//! read by everything else.

pub mod contract;
pub mod network;

pub use contract::{ContractBinding, ContractRegistry};
pub use network::NetworkRegistry;

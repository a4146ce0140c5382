//! Connection capability traits
//!
//! The registries and the balance/transfer helpers never talk to a node
//! directly. They go through two narrow traits:
//!
//! - [`Connector`]: turns a network name and resolved RPC URL into a connection
//! - [`ChainConnection`]: the per-network operations (reads, signed submissions)
//!
//! [`crate::evm::AlloyConnector`] is the production implementation. Tests plug
//! in their own connector to count or script calls without a node.

use alloy::{
    dyn_abi::DynSolValue,
    primitives::{Address, U256},
    signers::local::PrivateKeySigner,
};
use async_trait::async_trait;

use crate::{errors::Result, registry::ContractBinding, types::SubmittedTx};

/// Operations available on one network's live RPC transport
///
/// Implementations do not serialize concurrent calls; callers needing strict
/// ordering on one network must await each call before issuing the next.
#[async_trait]
pub trait ChainConnection: Send + Sync {
    /// Native balance of `owner` in wei
    async fn native_balance(&self, owner: Address) -> Result<U256>;

    /// Read-only contract call, returning the decoded outputs
    async fn call(
        &self,
        contract: &ContractBinding,
        function: &str,
        args: &[DynSolValue],
    ) -> Result<Vec<DynSolValue>>;

    /// Signs and submits a value transfer, then waits for one confirmation
    async fn send_value(
        &self,
        signer: &PrivateKeySigner,
        to: Address,
        value: U256,
    ) -> Result<SubmittedTx>;

    /// Signs and submits a contract call, then waits for one confirmation
    async fn send_call(
        &self,
        signer: &PrivateKeySigner,
        contract: &ContractBinding,
        function: &str,
        args: &[DynSolValue],
    ) -> Result<SubmittedTx>;
}

/// Factory for [`ChainConnection`]s
#[async_trait]
pub trait Connector: Send + Sync {
    type Connection: ChainConnection;

    /// Establishes a connection for `network` at `rpc_url`
    async fn connect(&self, network: &str, rpc_url: &str) -> Result<Self::Connection>;
}

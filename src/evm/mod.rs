//! Alloy-backed network connections
//!
//! This module is the only place that touches alloy's provider, contract and
//! signer machinery. Everything above it works against
//! [`crate::traits::ChainConnection`].
//!
//! - Reads go through a plain provider without fillers
//! - Signed submissions layer a wallet (plus nonce/gas/chain-id fillers) over
//!   the same provider for the duration of one transfer
//! - Every submission waits for its receipt (one confirmation)

pub mod builder;

pub use builder::{get_provider, AlloyConnector};

use alloy::{
    contract::{ContractInstance, Error as ContractError},
    dyn_abi::DynSolValue,
    network::{Ethereum, EthereumWallet, TransactionBuilder},
    primitives::{Address, U256},
    providers::{DynProvider, PendingTransactionBuilder, Provider, ProviderBuilder},
    rpc::types::TransactionRequest,
    signers::local::PrivateKeySigner,
    transports::TransportError,
};
use async_trait::async_trait;
use log::{debug, info};

use crate::{
    errors::{OathstoneError, Result},
    registry::ContractBinding,
    traits::ChainConnection,
    types::SubmittedTx,
    utils::error_utils::revert_reason,
};

/// Live RPC transport for one network
#[derive(Clone)]
pub struct AlloyConnection {
    network: String,
    chain_id: u64,
    provider: DynProvider,
}

impl std::fmt::Debug for AlloyConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlloyConnection")
            .field("network", &self.network)
            .field("chain_id", &self.chain_id)
            .finish_non_exhaustive()
    }
}

impl AlloyConnection {
    pub fn new(network: &str, chain_id: u64, provider: DynProvider) -> Self {
        Self {
            network: network.to_string(),
            chain_id,
            provider,
        }
    }

    /// Chain id reported by the node at connect time
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    fn submission_error(&self, reason: String) -> OathstoneError {
        OathstoneError::Submission {
            network: self.network.clone(),
            reason,
        }
    }

    async fn confirm(&self, pending: PendingTransactionBuilder<Ethereum>) -> Result<SubmittedTx> {
        let hash = *pending.tx_hash();
        info!("submitted transaction {} on '{}'", hash, self.network);
        let receipt = pending
            .get_receipt()
            .await
            .map_err(|e| OathstoneError::transport(&self.network, "wait for receipt", e))?;
        let status = u64::from(receipt.status());
        info!(
            "transaction {} confirmed on '{}' with status {}",
            receipt.transaction_hash, self.network, status
        );
        Ok(SubmittedTx {
            hash: receipt.transaction_hash,
            status: Some(status),
        })
    }
}

#[async_trait]
impl ChainConnection for AlloyConnection {
    async fn native_balance(&self, owner: Address) -> Result<U256> {
        self.provider
            .get_balance(owner)
            .await
            .map_err(|e| OathstoneError::transport(&self.network, "eth_getBalance", describe_rpc_error(&e)))
    }

    async fn call(
        &self,
        contract: &ContractBinding,
        function: &str,
        args: &[DynSolValue],
    ) -> Result<Vec<DynSolValue>> {
        let instance = ContractInstance::new(
            contract.address(),
            self.provider.clone(),
            contract.interface().clone(),
        );
        let call = instance
            .function(function, args)
            .map_err(|e| encoding_error(contract, function, e))?;
        call.call()
            .await
            .map_err(|e| OathstoneError::transport(&self.network, function, describe_contract_error(&e)))
    }

    async fn send_value(
        &self,
        signer: &PrivateKeySigner,
        to: Address,
        value: U256,
    ) -> Result<SubmittedTx> {
        let signed = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer.clone()))
            .connect_provider(self.provider.clone());
        let tx = TransactionRequest::default()
            .with_from(signer.address())
            .with_to(to)
            .with_value(value);
        debug!("sending {} wei to {} on '{}'", value, to, self.network);
        let pending = signed
            .send_transaction(tx)
            .await
            .map_err(|e| self.submission_error(describe_rpc_error(&e)))?;
        self.confirm(pending).await
    }

    async fn send_call(
        &self,
        signer: &PrivateKeySigner,
        contract: &ContractBinding,
        function: &str,
        args: &[DynSolValue],
    ) -> Result<SubmittedTx> {
        let signed = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer.clone()))
            .connect_provider(self.provider.clone());
        let instance = ContractInstance::new(contract.address(), signed, contract.interface().clone());
        let call = instance
            .function(function, args)
            .map_err(|e| encoding_error(contract, function, e))?
            .from(signer.address());
        debug!(
            "calling {}.{} on '{}' from {}",
            contract.token_name(),
            function,
            self.network,
            signer.address()
        );
        let pending = call
            .send()
            .await
            .map_err(|e| self.submission_error(describe_contract_error(&e)))?;
        self.confirm(pending).await
    }
}

fn encoding_error(contract: &ContractBinding, function: &str, error: ContractError) -> OathstoneError {
    OathstoneError::Contract {
        network: contract.network().to_string(),
        token: contract.token_name().to_string(),
        function: function.to_string(),
        reason: error.to_string(),
    }
}

/// Node error message, with the decoded revert reason appended when present
fn describe_rpc_error(error: &TransportError) -> String {
    let reason = error
        .as_error_resp()
        .and_then(|payload| payload.as_revert_data())
        .and_then(|data| revert_reason(&data));
    match reason {
        Some(reason) => format!("{error} ({reason})"),
        None => error.to_string(),
    }
}

fn describe_contract_error(error: &ContractError) -> String {
    match error {
        ContractError::TransportError(e) => describe_rpc_error(e),
        other => other.to_string(),
    }
}

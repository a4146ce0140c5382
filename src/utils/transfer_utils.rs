//! Native and token transfers
//!
//! Each transfer runs the same sequence: derive a signer from the private
//! key, scale the amount to smallest units, submit through the network's
//! connection and wait for one confirmation. Nothing is retried: a failed
//! submission is returned as-is to avoid sending the same value twice.

use std::{fmt::Display, str::FromStr};

use alloy::{dyn_abi::DynSolValue, signers::local::PrivateKeySigner};
use log::info;

use crate::{
    errors::{OathstoneError, Result},
    registry::{ContractRegistry, NetworkRegistry},
    traits::ChainConnection,
    types::{TransferResult, NATIVE_DECIMALS},
    utils::{
        balance_utils::parse_address,
        erc20_utils::{self, TRANSFER},
        units::parse_amount,
    },
};

/// Sends `amount` of the native currency to `to`
///
/// `amount` is a human decimal such as `"0.5"` or `2`, scaled by 10^18.
///
/// # Errors
/// * `NotConnected` - no connection for `network`
/// * `InvalidInput` - malformed private key or recipient
/// * `InvalidAmount` - amount not representable in wei
/// * `Submission` - the node rejected the transaction
/// * `Transport` - waiting for the receipt failed
pub async fn transfer_native<C: ChainConnection>(
    networks: &NetworkRegistry<C>,
    network: &str,
    private_key: &str,
    to: &str,
    amount: impl Display,
) -> Result<TransferResult> {
    let connection = networks
        .get_connection(network)
        .ok_or_else(|| OathstoneError::not_connected(network))?;
    let signer = signer_from_key(network, private_key)?;
    let to = parse_address(network, "recipient address", to)?;
    let value = parse_amount(&amount.to_string(), NATIVE_DECIMALS)?;

    info!(
        "native transfer of {} on '{}' from {} to {}",
        amount,
        network,
        signer.address(),
        to
    );
    let submitted = connection.send_value(&signer, to, value).await?;
    Ok(TransferResult {
        network: network.to_string(),
        token_name: None,
        transaction_hash: submitted.hash,
        confirmation_status: submitted.status,
    })
}

/// Sends `amount` of `token_name` to `to` via the token's `transfer` function
///
/// Decimals: configured override, else on-chain `decimals()`, else 18.
///
/// # Errors
/// As [`transfer_native`], plus `NotFound` when the token is not loaded.
pub async fn transfer_token<C: ChainConnection>(
    networks: &NetworkRegistry<C>,
    contracts: &ContractRegistry,
    network: &str,
    token_name: &str,
    private_key: &str,
    to: &str,
    amount: impl Display,
) -> Result<TransferResult> {
    let connection = networks
        .get_connection(network)
        .ok_or_else(|| OathstoneError::not_connected(network))?;
    let contract = contracts
        .get_binding(network, token_name)
        .ok_or_else(|| OathstoneError::not_found(network, token_name))?;
    let signer = signer_from_key(network, private_key)?;
    let to = parse_address(network, "recipient address", to)?;

    let decimals = erc20_utils::resolve_decimals(connection, contract).await;
    let value = parse_amount(&amount.to_string(), decimals)?;

    info!(
        "token transfer of {} {} on '{}' from {} to {}",
        amount,
        token_name,
        network,
        signer.address(),
        to
    );
    let args = [DynSolValue::Address(to), DynSolValue::Uint(value, 256)];
    let submitted = connection.send_call(&signer, contract, TRANSFER, &args).await?;
    Ok(TransferResult {
        network: network.to_string(),
        token_name: Some(token_name.to_string()),
        transaction_hash: submitted.hash,
        confirmation_status: submitted.status,
    })
}

fn signer_from_key(network: &str, private_key: &str) -> Result<PrivateKeySigner> {
    PrivateKeySigner::from_str(private_key.trim()).map_err(|_| OathstoneError::InvalidInput {
        network: network.to_string(),
        what: "private key",
        reason: "not a valid secp256k1 private key".to_string(),
    })
}

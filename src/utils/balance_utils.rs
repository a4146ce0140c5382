//! Balance queries
//!
//! Reads native and token balances through the registries and formats them
//! as fixed-point decimal strings.

use alloy::primitives::Address;

use crate::{
    errors::{OathstoneError, Result},
    registry::{ContractRegistry, NetworkRegistry},
    traits::ChainConnection,
    types::NATIVE_DECIMALS,
    utils::{erc20_utils, units::format_amount},
};

/// Native balance of `owner` on `network`, in whole units
///
/// # Errors
/// * `NotConnected` - no connection for `network`
/// * `InvalidInput` - `owner` is not an address
/// * `Transport` - the RPC call failed
pub async fn query_native_balance<C: ChainConnection>(
    networks: &NetworkRegistry<C>,
    network: &str,
    owner: &str,
) -> Result<String> {
    let connection = networks
        .get_connection(network)
        .ok_or_else(|| OathstoneError::not_connected(network))?;
    let owner = parse_address(network, "owner address", owner)?;
    let raw = connection.native_balance(owner).await?;
    Ok(format_amount(raw, NATIVE_DECIMALS))
}

/// Token balance of `owner`, in whole token units
///
/// The balance and `decimals()` reads run concurrently. A configured decimals
/// override skips the `decimals()` read entirely.
///
/// # Errors
/// * `NotConnected` - no connection for `network`
/// * `NotFound` - no binding for `token_name` on `network`
/// * `InvalidInput` - `owner` is not an address
/// * `Transport` - the balance read failed
pub async fn query_token_balance<C: ChainConnection>(
    networks: &NetworkRegistry<C>,
    contracts: &ContractRegistry,
    network: &str,
    token_name: &str,
    owner: &str,
) -> Result<String> {
    let connection = networks
        .get_connection(network)
        .ok_or_else(|| OathstoneError::not_connected(network))?;
    let contract = contracts
        .get_binding(network, token_name)
        .ok_or_else(|| OathstoneError::not_found(network, token_name))?;
    let owner = parse_address(network, "owner address", owner)?;

    let balance = erc20_utils::query_balance(connection, contract, owner);
    let (raw, decimals) = match contract.decimals_override() {
        Some(decimals) => (balance.await?, decimals),
        None => {
            let (raw, decimals) = tokio::join!(
                balance,
                erc20_utils::resolve_decimals(connection, contract)
            );
            (raw?, decimals)
        }
    };
    Ok(format_amount(raw, decimals))
}

pub(crate) fn parse_address(network: &str, what: &'static str, value: &str) -> Result<Address> {
    value.trim().parse().map_err(|_| OathstoneError::InvalidInput {
        network: network.to_string(),
        what,
        reason: format!("'{}' is not a 20-byte hex address", value),
    })
}

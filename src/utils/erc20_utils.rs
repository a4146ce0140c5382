//! ERC20 token utilities
//!
//! Provides the built-in minimal ERC20 ABI used for tokens without an ABI
//! override, plus typed wrappers over [`ChainConnection::call`] for the
//! standard read functions.

use alloy::{
    dyn_abi::DynSolValue,
    json_abi::JsonAbi,
    primitives::{Address, U256},
};
use log::warn;
use once_cell::sync::Lazy;

use crate::{
    errors::{OathstoneError, Result},
    registry::ContractBinding,
    traits::ChainConnection,
    types::DEFAULT_TOKEN_DECIMALS,
};

pub const BALANCE_OF: &str = "balanceOf";
pub const TRANSFER: &str = "transfer";
pub const DECIMALS: &str = "decimals";
pub const SYMBOL: &str = "symbol";
pub const NAME: &str = "name";

/// Minimal ERC20 interface
///
/// Covers:
/// - name(): Returns token name
/// - symbol(): Returns token symbol
/// - decimals(): Returns token decimal places
/// - balanceOf(address): Returns token balance for an address
/// - transfer(address,uint256): Moves tokens from the caller
pub static DEFAULT_ERC20_ABI: Lazy<JsonAbi> = Lazy::new(|| {
    JsonAbi::parse([
        "function name() view returns (string)",
        "function symbol() view returns (string)",
        "function decimals() view returns (uint8)",
        "function balanceOf(address owner) view returns (uint256)",
        "function transfer(address to, uint256 amount) returns (bool)",
    ])
    .expect("built-in ERC20 signatures are valid")
});

/// Query the token balance of `owner` in smallest units
pub async fn query_balance<C: ChainConnection>(
    connection: &C,
    contract: &ContractBinding,
    owner: Address,
) -> Result<U256> {
    let output = connection
        .call(contract, BALANCE_OF, &[DynSolValue::Address(owner)])
        .await?;
    first_uint(&output).ok_or_else(|| {
        OathstoneError::transport(
            contract.network(),
            BALANCE_OF,
            format!("unexpected output from token '{}'", contract.token_name()),
        )
    })
}

/// Query `decimals()` on chain
pub async fn query_decimals<C: ChainConnection>(connection: &C, contract: &ContractBinding) -> Result<u8> {
    let output = connection.call(contract, DECIMALS, &[]).await?;
    first_uint(&output)
        .filter(|value| *value <= U256::from(u8::MAX))
        .map(|value| value.to::<u8>())
        .ok_or_else(|| {
            OathstoneError::transport(
                contract.network(),
                DECIMALS,
                format!("token '{}' returned invalid decimals", contract.token_name()),
            )
        })
}

/// Query a `string`-returning getter such as `symbol()` or `name()`
pub async fn query_string<C: ChainConnection>(
    connection: &C,
    contract: &ContractBinding,
    function: &str,
) -> Result<String> {
    let output = connection.call(contract, function, &[]).await?;
    match output.into_iter().next() {
        Some(DynSolValue::String(value)) => Ok(value),
        _ => Err(OathstoneError::transport(
            contract.network(),
            function,
            format!("token '{}' returned a non-string value", contract.token_name()),
        )),
    }
}

/// Decimals for `contract`: configured override, else on chain, else 18
///
/// A failed or malformed `decimals()` call is not an error; many non-standard
/// tokens omit it.
pub async fn resolve_decimals<C: ChainConnection>(connection: &C, contract: &ContractBinding) -> u8 {
    if let Some(decimals) = contract.decimals_override() {
        return decimals;
    }
    match query_decimals(connection, contract).await {
        Ok(decimals) => decimals,
        Err(e) => {
            warn!(
                "decimals() failed for token '{}' on '{}', assuming {}: {}",
                contract.token_name(),
                contract.network(),
                DEFAULT_TOKEN_DECIMALS,
                e
            );
            DEFAULT_TOKEN_DECIMALS
        }
    }
}

fn first_uint(values: &[DynSolValue]) -> Option<U256> {
    match values.first()? {
        DynSolValue::Uint(value, _) => Some(*value),
        _ => None,
    }
}

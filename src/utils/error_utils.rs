//! Revert data decoding
//!
//! Nodes attach ABI-encoded revert data to rejected `eth_sendRawTransaction`
//! and `eth_call` responses. This module turns the two standard shapes into
//! readable text for submission and transport errors:
//! - `Error(string)` (selector 0x08c379a0), e.g. "ERC20: transfer amount exceeds balance"
//! - `Panic(uint256)` (selector 0x4e487b71), e.g. arithmetic overflow

use alloy::dyn_abi::{DynSolType, DynSolValue};

/// Decode revert data into a message
///
/// # Returns
/// * `Some(String)` - decoded revert message or panic description
/// * `None` - unknown selector or malformed payload
pub fn revert_reason(output: &[u8]) -> Option<String> {
    if output.len() < 4 {
        return None;
    }

    let (selector, payload) = output.split_at(4);
    match selector {
        [0x08, 0xc3, 0x79, 0xa0] => match DynSolType::String.abi_decode(payload) {
            Ok(DynSolValue::String(reason)) => Some(format!("reverted: {reason}")),
            _ => None,
        },
        [0x4e, 0x48, 0x7b, 0x71] => match DynSolType::Uint(256).abi_decode(payload) {
            Ok(DynSolValue::Uint(code, _)) => Some(panic_description(code.saturating_to::<u64>())),
            _ => None,
        },
        _ => None,
    }
}

fn panic_description(code: u64) -> String {
    let what = match code {
        0x01 => "assertion failed",
        0x11 => "arithmetic overflow",
        0x12 => "division by zero",
        0x21 => "invalid enum value",
        0x22 => "invalid storage byte array",
        0x31 => "pop on empty array",
        0x32 => "array index out of bounds",
        0x41 => "out of memory",
        0x51 => "call to zero-initialized function",
        code => return format!("panic: unknown code 0x{code:x}"),
    };
    format!("panic: {what}")
}

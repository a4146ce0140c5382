//! Wallet generation
//!
//! Key material comes from a fresh BIP-39 mnemonic; the first account of the
//! standard Ethereum path (`m/44'/60'/0'/0/0`) is returned.

use alloy::{
    hex,
    signers::local::{coins_bip39::English, MnemonicBuilder},
};
use bip39::{Language, Mnemonic};
use rand::RngCore;

use crate::{
    errors::{OathstoneError, Result},
    types::WalletInfo,
};

/// Generates a new wallet with a 12-word mnemonic
///
/// Nothing is stored: the returned [`WalletInfo`] is the only copy.
pub fn create_wallet() -> Result<WalletInfo> {
    // 12 words = 128 bits of entropy
    let mut entropy = [0u8; 16];
    rand::rngs::OsRng.fill_bytes(&mut entropy);
    let mnemonic = Mnemonic::from_entropy_in(Language::English, &entropy)
        .map_err(|e| OathstoneError::Wallet(e.to_string()))?;
    entropy.fill(0);
    let phrase = mnemonic.to_string();

    let signer = MnemonicBuilder::<English>::default()
        .phrase(phrase.as_str())
        .build()
        .map_err(|e| OathstoneError::Wallet(e.to_string()))?;

    Ok(WalletInfo {
        address: signer.address().to_checksum(None),
        private_key: hex::encode_prefixed(signer.to_bytes()),
        mnemonic_phrase: Some(phrase),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::{primitives::Address, signers::local::PrivateKeySigner};

    #[test]
    fn test_create_wallet_is_consistent() {
        let wallet = create_wallet().unwrap();
        let phrase = wallet.mnemonic_phrase.clone().unwrap();
        assert_eq!(phrase.split_whitespace().count(), 12);

        let signer: PrivateKeySigner = wallet.private_key.parse().unwrap();
        assert_eq!(signer.address(), wallet.address.parse::<Address>().unwrap());

        let rederived = MnemonicBuilder::<English>::default()
            .phrase(phrase)
            .build()
            .unwrap();
        assert_eq!(rederived.address(), signer.address());
    }

    #[test]
    fn test_create_wallet_is_fresh() {
        let a = create_wallet().unwrap();
        let b = create_wallet().unwrap();
        assert_ne!(a.address, b.address);
        assert!(!format!("{a:?}").contains(&a.private_key));
    }
}

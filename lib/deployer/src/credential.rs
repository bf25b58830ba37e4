//! Operator-supplied credentials and the on-chain identity derived from them.
use std::{fmt, str::FromStr};

use alloy::{
    network::EthereumWallet, primitives::Address,
    signers::local::PrivateKeySigner,
};
use eyre::{bail, WrapErr};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Length of a hex-encoded secp256k1 secret key, without the `0x` prefix.
const PRIVATE_KEY_HEX_LEN: usize = 64;

/// A secret private key exactly as the operator entered it.
///
/// The buffer is wiped on drop and never shows up in `Debug` output.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Credential(String);

impl Credential {
    /// Wrap `secret` so that it gets zeroized once dropped.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Exposes the secret.
    ///
    /// The returned value must not be logged, stored or printed.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Whether the operator entered nothing but whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// The caller identity: a private key and the address it controls.
#[derive(Clone, Debug)]
pub struct Identity {
    signer: PrivateKeySigner,
}

impl Identity {
    /// Derive the identity controlled by `credential`.
    ///
    /// Surrounding whitespace and a `0x` prefix are accepted.
    ///
    /// # Errors
    ///
    /// May fail if the credential is not a hex-encoded 32-byte secp256k1
    /// secret key.
    pub fn from_credential(credential: &Credential) -> eyre::Result<Self> {
        let key = credential.expose().trim();
        let key = key.strip_prefix("0x").unwrap_or(key);
        if key.len() != PRIVATE_KEY_HEX_LEN {
            bail!(
                "invalid private key: expected {PRIVATE_KEY_HEX_LEN} hex characters, got {}",
                key.len()
            );
        }

        let signer = PrivateKeySigner::from_str(key)
            .wrap_err("invalid private key")?;
        Ok(Self { signer })
    }

    /// Wrap an already parsed signer.
    #[must_use]
    pub fn from_signer(signer: PrivateKeySigner) -> Self {
        Self { signer }
    }

    /// Retrieve the address this identity acts as.
    #[must_use]
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// The underlying local signer.
    #[must_use]
    pub fn signer(&self) -> &PrivateKeySigner {
        &self.signer
    }

    /// An `alloy` wallet signing on behalf of this identity.
    #[must_use]
    pub fn wallet(&self) -> EthereumWallet {
        EthereumWallet::from(self.signer.clone())
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::address;

    use super::*;

    // First pre-funded account of every anvil node.
    const DEV_KEY: &str =
        "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const DEV_ADDRESS: Address =
        address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

    #[test]
    fn derives_known_address() {
        let identity =
            Identity::from_credential(&Credential::new(DEV_KEY)).unwrap();
        assert_eq!(identity.address(), DEV_ADDRESS);
    }

    #[test]
    fn derivation_is_deterministic() {
        let credential = Credential::new(DEV_KEY);
        let first = Identity::from_credential(&credential).unwrap();
        let second = Identity::from_credential(&credential).unwrap();
        assert_eq!(first.address(), second.address());
    }

    #[test]
    fn accepts_prefix_and_whitespace() {
        let credential = Credential::new(format!("  0x{DEV_KEY}\n"));
        let identity = Identity::from_credential(&credential).unwrap();
        assert_eq!(identity.address(), DEV_ADDRESS);
    }

    #[test]
    fn different_keys_give_different_addresses() {
        let other = Credential::new(
            "59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d",
        );
        let other = Identity::from_credential(&other).unwrap();
        assert_eq!(
            other.address(),
            address!("0x70997970C51812dc3A010C7d01b50e0d17dc79C8")
        );
        assert_ne!(other.address(), DEV_ADDRESS);
    }

    #[test]
    fn rejects_wrong_length() {
        let err = Identity::from_credential(&Credential::new("0xdeadbeef"))
            .unwrap_err();
        assert!(err.to_string().contains("expected 64 hex characters"));
    }

    #[test]
    fn rejects_non_hex() {
        let key = "zz".repeat(32);
        let err =
            Identity::from_credential(&Credential::new(key)).unwrap_err();
        assert!(err.to_string().contains("invalid private key"));
    }

    #[test]
    fn rejects_zero_scalar() {
        let key = "0".repeat(64);
        assert!(Identity::from_credential(&Credential::new(key)).is_err());
    }

    #[test]
    fn rejects_empty_input() {
        let credential = Credential::new("   ");
        assert!(credential.is_blank());
        assert!(Identity::from_credential(&credential).is_err());
    }

    #[test]
    fn debug_output_is_redacted() {
        let credential = Credential::new(DEV_KEY);
        let printed = format!("{credential:?}");
        assert!(!printed.contains(DEV_KEY));
        assert!(printed.contains("redacted"));
    }

    #[test]
    fn identity_debug_does_not_leak_key() {
        let identity =
            Identity::from_credential(&Credential::new(DEV_KEY)).unwrap();
        assert!(!format!("{identity:?}").contains(DEV_KEY));
    }
}

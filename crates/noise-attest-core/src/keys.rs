//! Curve parameters and static keypairs.

use crate::{Error, Result};
use zeroize::Zeroizing;

/// Elliptic-curve parameter set: algorithm name and expected key sizes.
///
/// This is the capability the protocol needs from a curve; the actual
/// Diffie-Hellman runs inside the handshake primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Curve {
    /// Algorithm identifier, named in key-length errors.
    pub alg: &'static str,
    /// Expected public key length in bytes.
    pub pk_len: usize,
    /// Expected secret key length in bytes.
    pub sk_len: usize,
}

/// The X25519 curve used by the default Noise pattern.
pub const X25519: Curve = Curve {
    alg: "25519",
    pk_len: 32,
    sk_len: 32,
};

/// A long-lived static keypair.
///
/// The secret key is wiped from memory when the keypair is dropped.
pub struct KeyPair {
    /// Public key bytes.
    pub public: Vec<u8>,
    secret: Zeroizing<Vec<u8>>,
}

impl KeyPair {
    pub fn new(public: Vec<u8>, secret: Vec<u8>) -> Self {
        Self {
            public,
            secret: Zeroizing::new(secret),
        }
    }

    /// The secret key bytes (handle with care).
    pub fn secret(&self) -> &[u8] {
        &self.secret
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print secret material.
        f.debug_struct("KeyPair")
            .field("public", &hex::encode(&self.public))
            .finish_non_exhaustive()
    }
}

/// Check that the supplied keys match the byte lengths a curve expects.
///
/// Keys that are not supplied are not checked; calling with neither key
/// is vacuously valid.
pub fn validate_key_for_curve(
    curve: &Curve,
    public_key: Option<&[u8]>,
    secret_key: Option<&[u8]>,
) -> Result<()> {
    if let Some(pk) = public_key {
        if pk.len() != curve.pk_len {
            return Err(Error::InvalidPublicKeyLength { curve: curve.alg });
        }
    }

    if let Some(sk) = secret_key {
        if sk.len() != curve.sk_len {
            return Err(Error::InvalidSecretKeyLength { curve: curve.alg });
        }
    }

    Ok(())
}

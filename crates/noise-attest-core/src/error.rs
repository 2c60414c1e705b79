//! Error types for noise-attest-core.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid publicKey size for curve: {curve}")]
    InvalidPublicKeyLength { curve: &'static str },

    #[error("invalid secretKey size for curve: {curve}")]
    InvalidSecretKeyLength { curve: &'static str },

    #[error("challenge length must be greater than zero")]
    EmptyChallenge,

    #[error("random generator failure: {0}")]
    Rng(#[from] getrandom::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_implements_std_error() {
        // The Rng source must satisfy this bound for the derive to hold.
        fn assert_impl<E: std::error::Error + Send + Sync>() {}
        assert_impl::<Error>();
    }
}

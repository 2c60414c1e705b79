//! Error types for the attestation protocol.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("malformed challenge message")]
    MalformedChallengeMessage,

    #[error("malformed attestation")]
    MalformedAttestation,

    #[error("unknown or expired session")]
    UnknownOrExpiredSession,

    #[error("invalid noise parameter string: {0}")]
    Pattern(String),

    #[error("core error: {0}")]
    Core(#[from] noise_attest_core::Error),

    #[error("handshake failure: {0}")]
    Noise(#[from] snow::Error),
}

pub type Result<T> = std::result::Result<T, AuthError>;

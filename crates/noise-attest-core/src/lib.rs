//! # noise-attest-core
//!
//! Core primitives for the noise-attest challenge-response protocol.
//!
//! This crate provides:
//! - Random challenge generation
//! - Curve parameters and key-length validation
//! - The session store binding live challenges to an expiry

pub mod challenge;
pub mod error;
pub mod keys;
pub mod sessions;

pub use challenge::{generate_challenge, DEFAULT_CHALLENGE_LENGTH};
pub use error::Error;
pub use keys::{validate_key_for_curve, Curve, KeyPair, X25519};
pub use sessions::{session_id, Clock, Session, SessionId, SessionStore, SystemClock};

/// Result type for noise-attest-core operations.
pub type Result<T> = std::result::Result<T, Error>;

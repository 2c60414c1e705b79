//! # noise-attest
//!
//! Challenge-response authentication over a Noise handshake.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use noise_attest::{create_auth, generate_keypair, AuthOptions};
//!
//! let keypair = generate_keypair().unwrap();
//! let (initiator, responder) = create_auth(keypair, AuthOptions::default());
//! ```
//!
//! ## Modules
//!
//! - [`core`] - Challenges, curve parameters and the session store
//! - [`handshake`] - Wire codec, Noise adapter and the authenticator
//!
//! ## Re-exports
//!
//! Common types are re-exported at the crate root for convenience.

pub use noise_attest_core as core;
pub use noise_attest_handshake as handshake;

// Re-export common types at root
pub use noise_attest_core::{generate_challenge, session_id, Curve, KeyPair, SessionStore, X25519};
pub use noise_attest_handshake::{
    create_auth, generate_keypair, AuthError, AuthOptions, Initiator, IssuedChallenge, Responder,
    Result, VerifiedAttestation,
};

//! Challenge-response attestation over a Noise IK handshake.
//!
//! A responder issues a random challenge bound to a single-use session;
//! an initiator proves possession of its static key by echoing the
//! challenge (plus optional metadata) through a one-shot handshake.
//!
//! # Example
//!
//! ```no_run
//! use noise_attest_handshake::handshake::generate_keypair;
//! use noise_attest_handshake::protocol::{create_auth, AuthOptions};
//!
//! // The server side issues a challenge...
//! let (_, responder) = create_auth(generate_keypair().unwrap(), AuthOptions::default());
//! let issued = responder.issue_challenge().unwrap();
//!
//! // ...the client side signs it...
//! let (initiator, _) = create_auth(generate_keypair().unwrap(), AuthOptions::default());
//! let attestation = initiator.sign_challenge(&issued.message, None).unwrap();
//!
//! // ...and the server verifies it, consuming the session.
//! let verified = responder.verify_attestation(&attestation).unwrap();
//! assert_eq!(verified.challenge, issued.challenge);
//! ```

pub mod error;
pub mod handshake;
pub mod messages;
pub mod protocol;

pub use error::{AuthError, Result};
pub use handshake::{create_handshake, generate_keypair, Handshake, NoiseHandshake};
pub use protocol::{create_auth, AuthOptions, Initiator, IssuedChallenge, Responder, VerifiedAttestation};

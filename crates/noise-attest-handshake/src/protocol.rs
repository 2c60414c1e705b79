//! The authenticator: initiator and responder facets.
//!
//! A responder issues random challenges and remembers them as single-use
//! sessions; an initiator proves possession of its static key by sending
//! the challenge (plus optional metadata) back through a one-shot Noise
//! handshake. Verification consumes the session, so an attestation can
//! never be replayed, and a rejected attempt requires a fresh challenge.

use crate::error::{AuthError, Result};
use crate::handshake::{create_handshake, Handshake, NOISE_PATTERN};
use crate::messages::{decode_attestation, decode_challenge, encode_attestation, encode_challenge};
use noise_attest_core::{
    generate_challenge, session_id, validate_key_for_curve, Clock, Curve, KeyPair, SessionStore,
    SystemClock, DEFAULT_CHALLENGE_LENGTH, X25519,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Default session lifetime (2 minutes).
pub const DEFAULT_SESSION_TIMEOUT_MS: i64 = 2 * 60 * 1000;

/// Configuration for [`create_auth`].
pub struct AuthOptions {
    /// Metadata attached to every attestation unless overridden per call.
    pub metadata: Option<Vec<u8>>,
    /// Noise pattern driving the handshake.
    pub pattern: String,
    /// Curve parameters the remote static key is validated against.
    pub curve: Curve,
    /// How long an issued challenge stays verifiable.
    pub session_timeout_ms: i64,
    /// Length of generated challenges in bytes.
    pub challenge_length: usize,
    /// Clock driving session expiry; defaults to system time.
    pub clock: Option<Arc<dyn Clock>>,
}

impl Default for AuthOptions {
    fn default() -> Self {
        Self {
            metadata: None,
            pattern: NOISE_PATTERN.to_string(),
            curve: X25519,
            session_timeout_ms: DEFAULT_SESSION_TIMEOUT_MS,
            challenge_length: DEFAULT_CHALLENGE_LENGTH,
            clock: None,
        }
    }
}

/// Settings shared by the two facets.
struct AuthConfig {
    keypair: KeyPair,
    metadata: Option<Vec<u8>>,
    pattern: String,
    curve: Curve,
}

/// A freshly issued challenge and the encoded message carrying it.
#[derive(Debug, Clone)]
pub struct IssuedChallenge {
    pub challenge: Vec<u8>,
    /// Wire message for the initiator: challenge plus our static key.
    pub message: Vec<u8>,
}

/// Outcome of a successful verification.
#[derive(Debug, Clone)]
pub struct VerifiedAttestation {
    /// The challenge recovered from the attestation.
    pub challenge: Vec<u8>,
    /// Metadata the initiator attached (empty when none was set).
    pub metadata: Vec<u8>,
    /// Metadata the responder stored when issuing the challenge.
    pub session_metadata: Vec<u8>,
    /// The initiator's static public key, authenticated by the handshake.
    pub remote_static: Vec<u8>,
}

/// Create an authenticator for `keypair`, returning its two facets.
///
/// The facets share the static keypair; the responder additionally owns
/// the session store.
pub fn create_auth(keypair: KeyPair, options: AuthOptions) -> (Initiator, Responder) {
    let clock = options
        .clock
        .unwrap_or_else(|| Arc::new(SystemClock) as Arc<dyn Clock>);
    let sessions = SessionStore::with_clock(options.session_timeout_ms, clock);

    let config = Arc::new(AuthConfig {
        keypair,
        metadata: options.metadata,
        pattern: options.pattern,
        curve: options.curve,
    });

    (
        Initiator {
            config: config.clone(),
        },
        Responder {
            config,
            sessions,
            challenge_length: options.challenge_length,
        },
    )
}

/// The proving side: answers challenges with attestations.
///
/// Stateless across calls; each attestation runs its own one-shot
/// handshake against the responder's static key.
pub struct Initiator {
    config: Arc<AuthConfig>,
}

impl Initiator {
    /// Sign a received challenge message, producing an attestation.
    ///
    /// `metadata` replaces the authenticator-wide metadata for this call;
    /// it is never merged with it. The remote static key carried in the
    /// message is validated against the configured curve before any
    /// handshake state is built.
    pub fn sign_challenge(&self, message: &[u8], metadata: Option<&[u8]>) -> Result<Vec<u8>> {
        let (challenge, remote_public_key) = decode_challenge(message)?;
        validate_key_for_curve(&self.config.curve, Some(remote_public_key), None)?;

        let metadata = metadata
            .or(self.config.metadata.as_deref())
            .unwrap_or_default();

        let mut plaintext = Vec::with_capacity(challenge.len() + metadata.len());
        plaintext.extend_from_slice(challenge);
        plaintext.extend_from_slice(metadata);

        let mut handshake = create_handshake(
            &self.config.pattern,
            true,
            &self.config.keypair,
            Some(remote_public_key),
        )?;
        let signed_message = handshake.send(&plaintext)?;

        debug!(
            challenge = %session_id(challenge),
            metadata_len = metadata.len(),
            "challenge signed"
        );
        Ok(encode_attestation(&signed_message, challenge.len()))
    }
}

/// The verifying side: issues challenges and verifies attestations
/// against its session store.
pub struct Responder {
    config: Arc<AuthConfig>,
    sessions: SessionStore,
    challenge_length: usize,
}

impl Responder {
    /// Issue a fresh challenge and register its session.
    pub fn issue_challenge(&self) -> Result<IssuedChallenge> {
        self.issue(None)
    }

    /// Issue a fresh challenge with responder-side metadata stored on the
    /// session and returned by [`Responder::verify_attestation`].
    pub fn issue_challenge_with_metadata(&self, metadata: &[u8]) -> Result<IssuedChallenge> {
        self.issue(Some(metadata))
    }

    fn issue(&self, metadata: Option<&[u8]>) -> Result<IssuedChallenge> {
        let challenge = generate_challenge(self.challenge_length)?;
        self.sessions.add(&challenge, metadata);

        let message = encode_challenge(&challenge, &self.config.keypair.public);
        Ok(IssuedChallenge { challenge, message })
    }

    /// Verify an attestation against a stored session.
    ///
    /// The session is consumed on success: a second attestation for the
    /// same challenge fails with [`AuthError::UnknownOrExpiredSession`],
    /// as does one arriving after the session timeout. A forged or
    /// tampered attestation fails inside the handshake primitive before
    /// any session is touched.
    pub fn verify_attestation(&self, attestation: &[u8]) -> Result<VerifiedAttestation> {
        let (metadata_offset, signed_message) = decode_attestation(attestation)?;

        let mut handshake =
            create_handshake(&self.config.pattern, false, &self.config.keypair, None)?;
        let plaintext = handshake.recv(signed_message)?;

        if metadata_offset > plaintext.len() {
            warn!(metadata_offset, plaintext_len = plaintext.len(), "attestation rejected: offset out of range");
            return Err(AuthError::MalformedAttestation);
        }
        let (challenge, metadata) = plaintext.split_at(metadata_offset);

        let id = session_id(challenge);
        let session = self.sessions.consume(&id).ok_or_else(|| {
            warn!(session = %id, "attestation rejected: unknown or expired session");
            AuthError::UnknownOrExpiredSession
        })?;

        let remote_static = handshake
            .remote_static()
            .map(<[u8]>::to_vec)
            .unwrap_or_default();

        debug!(session = %id, "attestation verified");
        Ok(VerifiedAttestation {
            challenge: session.challenge,
            metadata: metadata.to_vec(),
            session_metadata: session.metadata,
            remote_static,
        })
    }

    /// Drop expired sessions without waiting for a lookup to hit them.
    pub fn purge_expired(&self) {
        self.sessions.purge_expired();
    }

    /// Number of sessions currently registered, expired ones included
    /// until the next purge.
    pub fn pending_sessions(&self) -> usize {
        self.sessions.len()
    }
}

//! Adapter over the `snow` Noise implementation.
//!
//! The protocol core never touches Diffie-Hellman or AEAD state directly;
//! it drives the primitive through [`Handshake`], and this module supplies
//! the one production implementation. Noise_IK fits the one-shot exchange:
//! the initiator already knows the responder's static key from the
//! challenge message, so the first (and only) handshake message both
//! authenticates the initiator's static key and carries the payload.

use crate::error::{AuthError, Result};
use noise_attest_core::KeyPair;
use snow::{Builder, HandshakeState};

/// Noise pattern used for attestations.
pub const NOISE_PATTERN: &str = "Noise_IK_25519_ChaChaPoly_BLAKE2s";

/// Prologue binding both sides to this protocol.
pub const PROLOGUE: &[u8] = b"noise-attest";

// Worst-case handshake overhead on top of the payload:
// ephemeral key, encrypted static key and two AEAD tags.
const MESSAGE_OVERHEAD: usize = 96;

/// The handshake capability the protocol consumes: one `send` on the
/// initiator side, one `recv` on the responder side.
pub trait Handshake {
    /// Encrypt `payload` into the next handshake message.
    fn send(&mut self, payload: &[u8]) -> Result<Vec<u8>>;

    /// Process a handshake message and recover its payload.
    fn recv(&mut self, message: &[u8]) -> Result<Vec<u8>>;
}

/// A Noise handshake session backed by `snow`.
pub struct NoiseHandshake {
    state: HandshakeState,
}

impl Handshake for NoiseHandshake {
    fn send(&mut self, payload: &[u8]) -> Result<Vec<u8>> {
        let mut message = vec![0u8; payload.len() + MESSAGE_OVERHEAD];
        let len = self.state.write_message(payload, &mut message)?;
        message.truncate(len);
        Ok(message)
    }

    fn recv(&mut self, message: &[u8]) -> Result<Vec<u8>> {
        let mut payload = vec![0u8; message.len()];
        let len = self.state.read_message(message, &mut payload)?;
        payload.truncate(len);
        Ok(payload)
    }
}

impl NoiseHandshake {
    /// The remote party's static public key, once the handshake has
    /// authenticated it.
    pub fn remote_static(&self) -> Option<&[u8]> {
        self.state.get_remote_static()
    }
}

/// Construct a handshake session for one protocol role.
///
/// Allocation only; no handshake message is processed until `send` or
/// `recv`. Initiators must supply the responder's static key
/// (IK encrypts the first message to it); responders must not.
pub fn create_handshake(
    pattern: &str,
    initiator: bool,
    keypair: &KeyPair,
    remote_static: Option<&[u8]>,
) -> Result<NoiseHandshake> {
    let params = pattern
        .parse()
        .map_err(|_| AuthError::Pattern(pattern.to_string()))?;

    let mut builder = Builder::new(params)
        .prologue(PROLOGUE)
        .local_private_key(keypair.secret());

    if let Some(remote) = remote_static {
        builder = builder.remote_public_key(remote);
    }

    let state = if initiator {
        builder.build_initiator()?
    } else {
        builder.build_responder()?
    };

    Ok(NoiseHandshake { state })
}

/// Generate a fresh X25519 static keypair.
pub fn generate_keypair() -> Result<KeyPair> {
    let params = NOISE_PATTERN
        .parse()
        .map_err(|_| AuthError::Pattern(NOISE_PATTERN.to_string()))?;
    let keypair = Builder::new(params).generate_keypair()?;
    Ok(KeyPair::new(keypair.public, keypair.private))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_keypair_lengths() {
        let keypair = generate_keypair().unwrap();
        assert_eq!(keypair.public.len(), 32);
        assert_eq!(keypair.secret().len(), 32);
    }

    #[test]
    fn test_one_shot_round_trip() {
        let initiator_keys = generate_keypair().unwrap();
        let responder_keys = generate_keypair().unwrap();

        let mut initiator = create_handshake(
            NOISE_PATTERN,
            true,
            &initiator_keys,
            Some(&responder_keys.public),
        )
        .unwrap();
        let mut responder = create_handshake(NOISE_PATTERN, false, &responder_keys, None).unwrap();

        let message = initiator.send(b"challenge bytes").unwrap();
        let payload = responder.recv(&message).unwrap();

        assert_eq!(payload, b"challenge bytes");
        // IK authenticates the initiator's static key in message 1.
        assert_eq!(responder.remote_static().unwrap(), &initiator_keys.public);
    }

    #[test]
    fn test_tampered_message_rejected() {
        let initiator_keys = generate_keypair().unwrap();
        let responder_keys = generate_keypair().unwrap();

        let mut initiator = create_handshake(
            NOISE_PATTERN,
            true,
            &initiator_keys,
            Some(&responder_keys.public),
        )
        .unwrap();
        let mut responder = create_handshake(NOISE_PATTERN, false, &responder_keys, None).unwrap();

        let mut message = initiator.send(b"payload").unwrap();
        let last = message.len() - 1;
        message[last] ^= 0xff;

        assert!(matches!(responder.recv(&message), Err(AuthError::Noise(_))));
    }

    #[test]
    fn test_unknown_pattern() {
        let keypair = generate_keypair().unwrap();
        assert!(matches!(
            create_handshake("Noise_Bogus", true, &keypair, None),
            Err(AuthError::Pattern(_))
        ));
    }
}

//! Wire framing for challenge messages and attestations.
//!
//! Both formats are self-describing: a little-endian `u32` prefix locates
//! the variable-length boundary, so decoders need no out-of-band knowledge
//! of challenge or metadata lengths.
//!
//! ```text
//! challenge message = [challenge_len: u32 LE][challenge][remote_public_key]
//! attestation       = [metadata_offset: u32 LE][signed_message]
//! ```
//!
//! `metadata_offset` is an offset into the *plaintext* recovered from
//! `signed_message`, not into the attestation itself: bytes before it are
//! the challenge, bytes from it onward are caller metadata.

use crate::error::{AuthError, Result};

const HEADER_LEN: usize = 4;

/// Encode the message a responder sends alongside a fresh challenge:
/// the challenge itself plus the responder's static public key.
pub fn encode_challenge(challenge: &[u8], remote_public_key: &[u8]) -> Vec<u8> {
    let mut message = Vec::with_capacity(HEADER_LEN + challenge.len() + remote_public_key.len());
    message.extend_from_slice(&(challenge.len() as u32).to_le_bytes());
    message.extend_from_slice(challenge);
    message.extend_from_slice(remote_public_key);
    message
}

/// Split a challenge message back into `(challenge, remote_public_key)`.
pub fn decode_challenge(message: &[u8]) -> Result<(&[u8], &[u8])> {
    if message.len() < HEADER_LEN {
        return Err(AuthError::MalformedChallengeMessage);
    }

    let mut header = [0u8; HEADER_LEN];
    header.copy_from_slice(&message[..HEADER_LEN]);
    let challenge_len = u32::from_le_bytes(header) as usize;

    let rest = &message[HEADER_LEN..];
    // An empty challenge or a missing public key is never valid.
    if challenge_len == 0 || challenge_len >= rest.len() {
        return Err(AuthError::MalformedChallengeMessage);
    }

    Ok(rest.split_at(challenge_len))
}

/// Frame a handshake ciphertext into an attestation.
///
/// `metadata_offset` marks where caller metadata begins inside the
/// plaintext; for an attestation this is always the challenge length.
/// Noise messages cap at 64 KiB, so the offset always fits in a `u32`.
pub fn encode_attestation(signed_message: &[u8], metadata_offset: usize) -> Vec<u8> {
    let mut attestation = Vec::with_capacity(HEADER_LEN + signed_message.len());
    attestation.extend_from_slice(&(metadata_offset as u32).to_le_bytes());
    attestation.extend_from_slice(signed_message);
    attestation
}

/// Split an attestation into `(metadata_offset, signed_message)`.
///
/// The signed message is still ciphertext; the offset only becomes
/// meaningful once the handshake primitive has recovered the plaintext.
pub fn decode_attestation(attestation: &[u8]) -> Result<(usize, &[u8])> {
    if attestation.len() < HEADER_LEN {
        return Err(AuthError::MalformedAttestation);
    }

    let mut header = [0u8; HEADER_LEN];
    header.copy_from_slice(&attestation[..HEADER_LEN]);

    Ok((
        u32::from_le_bytes(header) as usize,
        &attestation[HEADER_LEN..],
    ))
}

//! Random challenge generation.

use crate::{Error, Result};

/// Default challenge length in bytes.
pub const DEFAULT_CHALLENGE_LENGTH: usize = 32;

/// Generate a new random challenge of `length` bytes.
///
/// The bytes come from the operating system CSPRNG. A zero-length
/// challenge is rejected: it would make every session share one id.
pub fn generate_challenge(length: usize) -> Result<Vec<u8>> {
    if length == 0 {
        return Err(Error::EmptyChallenge);
    }

    let mut challenge = vec![0u8; length];
    getrandom::fill(&mut challenge)?;
    Ok(challenge)
}

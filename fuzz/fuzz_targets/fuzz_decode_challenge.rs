//! Fuzz target for challenge message decoding.
//!
//! Tests that decode_challenge handles arbitrary input safely, without
//! panicking or causing undefined behavior.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Decoding may reject the input but must never panic
    if let Ok((challenge, remote_public_key)) =
        noise_attest_handshake::messages::decode_challenge(data)
    {
        // A successful decode must round-trip byte for byte
        let encoded = noise_attest_handshake::messages::encode_challenge(challenge, remote_public_key);
        assert_eq!(encoded, data);
    }
});

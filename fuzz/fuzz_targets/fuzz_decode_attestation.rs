//! Fuzz target for attestation decoding.
//!
//! Tests that decode_attestation handles arbitrary input safely, without
//! panicking or causing undefined behavior.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Decoding may reject the input but must never panic
    if let Ok((metadata_offset, signed_message)) =
        noise_attest_handshake::messages::decode_attestation(data)
    {
        // A successful decode must round-trip byte for byte
        let encoded =
            noise_attest_handshake::messages::encode_attestation(signed_message, metadata_offset);
        assert_eq!(encoded, data);
    }
});

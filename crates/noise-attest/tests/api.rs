//! Smoke test for the umbrella crate's public surface.

use noise_attest::{
    create_auth, generate_keypair, AuthOptions, IssuedChallenge, VerifiedAttestation,
};

#[test]
fn test_root_reexports_cover_protocol_flow() {
    let (initiator, _) = create_auth(generate_keypair().unwrap(), AuthOptions::default());
    let (_, responder) = create_auth(generate_keypair().unwrap(), AuthOptions::default());

    let issued: IssuedChallenge = responder.issue_challenge().unwrap();
    let attestation = initiator.sign_challenge(&issued.message, None).unwrap();
    let verified: VerifiedAttestation = responder.verify_attestation(&attestation).unwrap();

    assert_eq!(verified.challenge, issued.challenge);
}

use super::*;
use crate::fixtures::*;

#[test]
fn end_to_end_registration_and_vote() {
    let config = DerivationConfig::default();

    // The registration authority holds the full key, voters only (N, e)
    let authority = authority_params();
    let voter = authority.to_public();

    // Voter's offline master secret
    let master_token = Token::master(TEST_MASTER_TOKEN).unwrap();
    let master_r = BlindingFactor::master(TEST_MASTER_R).unwrap();

    // Derive the election-scoped token and blinding factor
    let token = derive_election_token(TEST_ELECTION_ID, &master_token, &config).unwrap();
    assert_eq!(top_nibble(token.value()), Some(0x0));

    let r = derive_election_r(TEST_ELECTION_ID, &master_r, &token, &voter, &config).unwrap();
    assert!(is_unit(&decode_hex(r.value()).unwrap(), &voter.n));

    // Blind and hand over to the authority
    let blinded = blind(&token, &r, &voter).unwrap();
    assert_eq!(top_nibble(blinded.value()), Some(0x1));
    let blind_signature = sign(&blinded, &authority).unwrap();

    // Unblind and verify
    let signature = unblind(&blind_signature, &r, &voter).unwrap();
    assert!(verify(&signature, &token, &voter).unwrap());

    // Assemble credentials and carry them on a QR code
    let credentials = create_credentials(&signature, &token, &master_token, TEST_ELECTION_ID).unwrap();
    let packed = pack_for_transport(&credentials).unwrap();
    let credentials = unpack_from_transport(&packed).unwrap();

    // Cast a vote
    let encrypted = encrypt_vote(&credentials.encryption_key, b"Candidate 2").unwrap();
    let tx = VotingTransaction::new(&credentials, &encrypted).unwrap();
    let tx = tx.sign(&credentials.wallet().unwrap()).unwrap();
    tx.validate(&voter).unwrap();

    let vote = decrypt_vote(&credentials.encryption_key, &tx.encrypted_vote).unwrap();
    assert_eq!(vote, b"Candidate 2");
}

#[test]
fn fresh_master_secret_registers() {
    let config = DerivationConfig::default();
    let authority = authority_params();
    let voter = authority.to_public();

    let secret = generate_master_secret();
    for election_id in 1..=3 {
        let token = derive_election_token(election_id, &secret.token, &config).unwrap();
        let r = derive_election_r(election_id, &secret.r, &token, &voter, &config).unwrap();

        let blinded = blind(&token, &r, &voter).unwrap();
        let signature = unblind(&sign(&blinded, &authority).unwrap(), &r, &voter).unwrap();
        assert!(verify(&signature, &token, &voter).unwrap());

        // A signature for one election does not verify another's token
        let other = derive_election_token(election_id + 10, &secret.token, &config).unwrap();
        assert!(!verify(&signature, &other, &voter).unwrap());
    }
}

#[test]
fn forged_signature_is_rejected() {
    let voter = voter_params();
    let master_token = Token::master(TEST_MASTER_TOKEN).unwrap();
    let token = Token::election(TEST_ELECTION_TOKEN).unwrap();

    let forged = Signature::Unblinded(format!("0x{}", "7".repeat(512)));
    assert!(!verify(&forged, &token, &voter).unwrap());

    let credentials = create_credentials(&forged, &token, &master_token, TEST_ELECTION_ID).unwrap();
    let tx = VotingTransaction::new(&credentials, "0x01").unwrap();
    let tx = tx.sign(&credentials.wallet().unwrap()).unwrap();
    assert_eq!(
        tx.validate(&voter),
        Err(ValidationError::BlindSignatureMismatch.into())
    );
}

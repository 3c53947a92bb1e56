use blindvote::*;

pub fn command_credentials(matches: &clap::ArgMatches, params: &RsaParams) {
    let election_id = crate::election_id(matches);
    let secret: MasterSecret = crate::read_json(matches.value_of("secret").unwrap());
    let blinded_signature = matches.value_of("BLINDED-SIGNATURE").unwrap();
    let config = DerivationConfig::from_env();

    // R is re-derived rather than stored
    let (token, r) = crate::command_secret::derive(election_id, &secret, params, &config);

    let blinded_signature =
        Signature::blinded(blinded_signature).unwrap_or_else(|e| crate::fail("credentials", e));
    let signature =
        unblind(&blinded_signature, &r, params).unwrap_or_else(|e| crate::fail("credentials", e));

    match verify(&signature, &token, params) {
        Ok(true) => {}
        Ok(false) => crate::fail("credentials", "authority signature does not verify"),
        Err(e) => crate::fail("credentials", e),
    }

    let credentials = create_credentials(&signature, &token, &secret.token, election_id)
        .unwrap_or_else(|e| crate::fail("credentials", e));

    if matches.is_present("json") {
        println!("{}", serde_json::to_string_pretty(&credentials).unwrap());
    } else {
        let packed =
            pack_for_transport(&credentials).unwrap_or_else(|e| crate::fail("credentials", e));
        println!("{}", packed);
    }
}

pub fn command_verify(matches: &clap::ArgMatches, params: &RsaParams) {
    let packed = matches.value_of("PACKED").unwrap();

    let credentials = unpack_from_transport(packed).unwrap_or_else(|e| crate::fail("verify", e));
    let wallet = credentials.wallet().unwrap_or_else(|e| crate::fail("verify", e));

    match verify(
        &credentials.unblinded_signature,
        &credentials.unblinded_election_token,
        params,
    ) {
        Ok(true) => {
            println!("> Credentials verified OK");
            println!("election: {}", credentials.election_id);
            println!("wallet:   {}", wallet.address());
        }
        Ok(false) => crate::fail("verify", "authority signature does not verify"),
        Err(e) => crate::fail("verify", e),
    }
}

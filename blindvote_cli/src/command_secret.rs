use blindvote::*;
use std::fs::File;
use std::io::prelude::*;

pub fn command_master(matches: &clap::ArgMatches) {
    let secret = generate_master_secret();
    let secret = serde_json::to_string_pretty(&secret).unwrap();

    match matches.value_of("out") {
        Some(location) => {
            let location = crate::expand(location);
            let mut file = File::create(&location).unwrap_or_else(|e| {
                eprintln!("blindvote master: cannot create file {}: {}", &location, e);
                std::process::exit(1);
            });
            file.write_all(secret.as_bytes()).unwrap_or_else(|e| {
                eprintln!("blindvote master: unable to write secret to {}: {}", &location, e);
                std::process::exit(1);
            });
            log::info!("master secret written to {}", location);
        }
        None => println!("{}", secret),
    }
}

pub fn command_derive(matches: &clap::ArgMatches, params: &RsaParams) {
    let election_id = crate::election_id(matches);
    let secret: MasterSecret = crate::read_json(matches.value_of("secret").unwrap());
    let config = DerivationConfig::from_env();

    let (token, r) = derive(election_id, &secret, params, &config);
    let derived = serde_json::json!({
        "election_id": election_id,
        "token": token,
        "r": r,
    });

    println!("{}", serde_json::to_string_pretty(&derived).unwrap());
}

pub fn command_blind(matches: &clap::ArgMatches, params: &RsaParams) {
    let election_id = crate::election_id(matches);
    let secret: MasterSecret = crate::read_json(matches.value_of("secret").unwrap());
    let config = DerivationConfig::from_env();

    let (token, r) = derive(election_id, &secret, params, &config);
    let blinded = blind(&token, &r, params).unwrap_or_else(|e| crate::fail("blind", e));

    println!("{}", blinded.value());
}

/// Re-derive the election token and blinding factor from the master secret.
pub fn derive(
    election_id: ElectionId,
    secret: &MasterSecret,
    params: &RsaParams,
    config: &DerivationConfig,
) -> (Token, BlindingFactor) {
    let token = derive_election_token(election_id, &secret.token, config)
        .unwrap_or_else(|e| crate::fail("derive", e));
    let r = derive_election_r(election_id, &secret.r, &token, params, config)
        .unwrap_or_else(|e| crate::fail("derive", e));
    (token, r)
}

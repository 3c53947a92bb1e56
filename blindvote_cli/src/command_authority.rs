use blindvote::*;

pub fn command_sign(matches: &clap::ArgMatches, params: &RsaParams) {
    // Unwrap is OK, the argument is required
    let blinded = matches.value_of("BLINDED-TOKEN").unwrap();

    let token = Token::blinded_election(blinded).unwrap_or_else(|e| crate::fail("sign", e));
    let signature = sign(&token, params).unwrap_or_else(|e| crate::fail("sign", e));

    println!("{}", signature.value());
}

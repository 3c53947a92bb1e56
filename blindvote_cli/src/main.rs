use blindvote::RsaParams;
use clap::{App, AppSettings, Arg, SubCommand};
use log::LevelFilter;
use serde::de::DeserializeOwned;

mod command_authority;
mod command_credentials;
mod command_secret;

fn main() {
    let election_id_arg = Arg::with_name("ELECTION-ID")
        .index(1)
        .required(true)
        .help("Numeric election id");
    let secret_arg = Arg::with_name("secret")
        .long("secret")
        .takes_value(true)
        .required(true)
        .help("Master secret JSON file, as written by `blindvote master`");

    let matches = App::new("blindvote")
        .version("0.1")
        .about("Blind-signature voter credentials")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("key")
                .long("key")
                .takes_value(true)
                .global(true)
                .help("Authority RSA key JSON file - can also be set with BLINDVOTE_RSA_KEY"),
        )
        .arg(
            Arg::with_name("v")
                .short("v")
                .multiple(true)
                .global(true)
                .help("Sets the level of verbosity"),
        )
        .subcommand(
            SubCommand::with_name("master")
                .about("Generate a new master secret")
                .arg(
                    Arg::with_name("out")
                        .long("out")
                        .takes_value(true)
                        .help("Write the secret to this file instead of stdout"),
                ),
        )
        .subcommand(
            SubCommand::with_name("derive")
                .about("Print the election token and blinding factor for an election")
                .arg(election_id_arg.clone())
                .arg(secret_arg.clone()),
        )
        .subcommand(
            SubCommand::with_name("blind")
                .about("Derive the election token and print it blinded for the authority")
                .arg(election_id_arg.clone())
                .arg(secret_arg.clone()),
        )
        .subcommand(
            SubCommand::with_name("sign")
                .about("Sign a blinded token (registration authority only)")
                .arg(
                    Arg::with_name("BLINDED-TOKEN")
                        .index(1)
                        .required(true)
                        .help("Blinded token as 0x hex"),
                ),
        )
        .subcommand(
            SubCommand::with_name("credentials")
                .about("Unblind the authority's signature and assemble election credentials")
                .arg(election_id_arg)
                .arg(
                    Arg::with_name("BLINDED-SIGNATURE")
                        .index(2)
                        .required(true)
                        .help("Blinded signature as 0x hex"),
                )
                .arg(secret_arg)
                .arg(
                    Arg::with_name("json")
                        .long("json")
                        .help("Print credentials as JSON instead of the QR transport string"),
                ),
        )
        .subcommand(
            SubCommand::with_name("verify")
                .about("Verify a packed credential bundle against the authority key")
                .arg(
                    Arg::with_name("PACKED")
                        .index(1)
                        .required(true)
                        .help("Credential transport string"),
                ),
        )
        .get_matches();

    let level = match matches.occurrences_of("v") {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    let env_var = std::env::var("BLINDVOTE_RSA_KEY");
    let key_path = match matches.value_of("key") {
        Some(path) => Some(path.to_owned()),
        None => env_var.ok(),
    };

    // Subcommands
    match matches.subcommand() {
        ("master", Some(matches)) => command_secret::command_master(matches),
        ("derive", Some(matches)) => {
            let params = load_params(key_path.as_deref());
            command_secret::command_derive(matches, &params);
        }
        ("blind", Some(matches)) => {
            let params = load_params(key_path.as_deref());
            command_secret::command_blind(matches, &params);
        }
        ("sign", Some(matches)) => {
            let params = load_params(key_path.as_deref());
            command_authority::command_sign(matches, &params);
        }
        ("credentials", Some(matches)) => {
            let params = load_params(key_path.as_deref());
            command_credentials::command_credentials(matches, &params);
        }
        ("verify", Some(matches)) => {
            let params = load_params(key_path.as_deref());
            command_credentials::command_verify(matches, &params);
        }
        _ => unreachable!("clap enforces a subcommand"),
    }
}

/// Expand `~` and environment variables in a user-supplied path
pub fn expand(input: &str) -> String {
    match shellexpand::full(input) {
        Ok(expanded) => expanded.to_string(),
        Err(e) => {
            eprintln!("blindvote: cannot expand {}: {}", input, e);
            std::process::exit(1);
        }
    }
}

/// Read and parse a JSON file, exiting with a message on failure
pub fn read_json<T: DeserializeOwned>(path: &str) -> T {
    let path = expand(path);
    let bytes = std::fs::read(&path).unwrap_or_else(|e| {
        eprintln!("blindvote: unable to read {}: {}", path, e);
        std::process::exit(1);
    });
    serde_json::from_slice(&bytes).unwrap_or_else(|e| {
        eprintln!("blindvote: unable to parse {}: {}", path, e);
        std::process::exit(1);
    })
}

/// Parse an election id argument
pub fn election_id(matches: &clap::ArgMatches) -> blindvote::ElectionId {
    // Unwrap is OK, the argument is required
    let raw = matches.value_of("ELECTION-ID").unwrap();
    raw.parse().unwrap_or_else(|e| {
        eprintln!("blindvote: invalid election id {}: {}", raw, e);
        std::process::exit(1);
    })
}

/// Print an error and exit
pub fn fail<E: std::fmt::Display>(context: &str, e: E) -> ! {
    eprintln!("blindvote {}: {}", context, e);
    std::process::exit(1);
}

fn load_params(key_path: Option<&str>) -> RsaParams {
    let key_path = key_path.unwrap_or_else(|| {
        eprintln!("blindvote: an RSA key is required (--key or BLINDVOTE_RSA_KEY)");
        std::process::exit(1);
    });
    let params: RsaParams = read_json(key_path);
    if let Err(e) = params.validate() {
        fail("key", e);
    }
    log::info!("loaded {}-bit authority key from {}", params.bit_length, key_path);
    params
}

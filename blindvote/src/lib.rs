//! Anonymous election credentials built on RSA blind signatures.
//!
//! A voter keeps a master token and master blinding factor offline. For each
//! election they derive an election token and blinding factor, have the
//! registration authority sign the blinded token, unblind the result, and
//! derive a wallet key and vote-encryption key for that election.

#[macro_use]
extern crate serde;

mod blind;
mod codec;
mod config;
mod credentials;
mod derive;
mod error;
mod padding;
mod params;
mod serde_hex;
mod token;
mod transaction;
mod vote;
mod wallet;

pub use blind::*;
pub use codec::*;
pub use config::*;
pub use credentials::*;
pub use derive::*;
pub use error::*;
pub use padding::*;
pub use params::*;
pub use serde_hex::*;
pub use token::*;
pub use transaction::*;
pub use vote::*;
pub use wallet::*;

#[cfg(test)]
mod fixtures;

#[cfg(test)]
mod tests;

//! Shared test fixtures: a fixed 2048-bit authority key and known-answer
//! values derived from it.

use crate::*;

/// Fixed authority modulus.
pub const TEST_N: &str = concat!(
    "0x",
    "d896106f762c9ae15af3f17728d30ae354a26aede383df27761c8a9f048c677a",
    "c23c8f0b8eee6c5284283a15df315fec229888c1344360384eee1057eb8d9eb3",
    "800c6a87ab6223b7ddd566741b63cdc03d8b6c94fa8daec91e43994ef2da8385",
    "56932236411ffba349cc455aa9191ee7aed14f317543434657555f6ba209cf92",
    "823b4cfc019351508fe256be86a5099c9aa9e053e6af3e21240dcf471d8c9bf9",
    "5e4f455763040cea871e39157c777a5ad65ddddf4c5a8a6dc5b3d9418e4a5d9d",
    "6a5b1107d7691a1b48442d2ba2157f29a721c42f1afd82a0a44ca6ef3beb6833",
    "9b8253911b7a9773f0faf69d2f677e8a2d9344e8767bed923d68ed741abac859",
);

/// Fixed authority private exponent.
pub const TEST_D: &str = concat!(
    "0x",
    "4c1389fa5cdc161b0a439d91697997dd7a2102c644a051861eeaaf9663969dd2",
    "74dfa8af3aa96ccb1f38b20e74b3772a0e8cdd9c5fab3ae50c747ab127403b7a",
    "7983e2f77cafa034396b77ed58a199e7e8b64c9197e0a480686cfe30c9051025",
    "89df6ca8f9ff2df891377b34f928a5be639d89dfa97cd2e8a64c8a93d7faf239",
    "b2968379e702593b4765cb05dd750692ad6b0e10d82a8ec0e41b2faf09354cf7",
    "75e87916115a80437bcd158ac1769b217c1c7c26cc7f02cab68097e63fe1b9bb",
    "3536583fbc9e584ae50b0b426d5698549725812370946a594d9a44e67be83897",
    "f4a7163d258f6cd3495182ea851682720db6f95e41b7f70b5a94acd2dc845f31",
);

pub const TEST_E: &str = "0x010001";

pub const TEST_ELECTION_ID: ElectionId = 1;

pub const TEST_MASTER_TOKEN: &str =
    "0xabababababababababababababababababababababababababababababababab";

pub const TEST_MASTER_R: &str =
    "0xcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcdcd";

/// Election token for `TEST_MASTER_TOKEN` in election 1 (nonce 10).
pub const TEST_ELECTION_TOKEN: &str =
    "0x03587663fff185e4aaebef0c932693c721200da1f1c6851a037ac4ce62cf2f1b";

/// Election R for `TEST_MASTER_R` and `TEST_ELECTION_TOKEN` (nonce 6).
pub const TEST_ELECTION_R: &str =
    "0x93abf408a6ab8da003320e6637916599c45124d0f9411dff8299a64d6bd20bb8";

pub const TEST_WALLET_KEY: &str =
    "0x20e653a55a8d374a12579a0a7597f15eef023c480d6ed6b0c49402eeb893b3e2";

pub const TEST_ENCRYPTION_KEY: &str =
    "0xb3395b460238d60b1badd902c850203cea26518d22d8ab973247a81043585c7e";

pub fn authority_params() -> RsaParams {
    RsaParams::from_hex(TEST_N, Some(TEST_E), Some(TEST_D)).unwrap()
}

pub fn voter_params() -> RsaParams {
    RsaParams::from_hex(TEST_N, Some(TEST_E), None).unwrap()
}

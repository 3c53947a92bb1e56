use crate::*;
use aes_gcm::aead::{generic_array::GenericArray, Aead, NewAead};
use aes_gcm::Aes256Gcm;
use hkdf::Hkdf;
use rand::{thread_rng, Rng};
use sha2::Sha256;

const AES_IV_LENGTH: usize = 12;
const VOTE_KDF_INFO: &[u8] = b"Vote-Encryption";

type AesKey = [u8; 32];

fn vote_key(encryption_key: &str) -> Result<AesKey> {
    let master = hex_to_bytes(encryption_key, SECRET_BYTES)?;
    let h = Hkdf::<Sha256>::new(None, &master);
    let mut out = [0u8; 32];
    h.expand(VOTE_KDF_INFO, &mut out)
        .map_err(|_| Error::VoteEncryption)?;
    Ok(out)
}

/// Encrypt a vote under a credential's encryption key.
///
/// Returns `0x` hex of `nonce || ciphertext`.
pub fn encrypt_vote(encryption_key: &str, vote: &[u8]) -> Result<String> {
    let key = vote_key(encryption_key)?;
    let aead = Aes256Gcm::new(GenericArray::from_slice(&key));

    let mut nonce = [0u8; AES_IV_LENGTH];
    thread_rng().fill(&mut nonce);
    let nonce = GenericArray::from_slice(&nonce);

    let ciphertext = aead
        .encrypt(nonce, vote)
        .map_err(|_| Error::VoteEncryption)?;

    let mut output = Vec::with_capacity(AES_IV_LENGTH + ciphertext.len());
    output.extend(nonce);
    output.extend(ciphertext);

    Ok(bytes_to_hex(&output))
}

/// Decrypt a vote produced by [`encrypt_vote`].
pub fn decrypt_vote(encryption_key: &str, encrypted_vote: &str) -> Result<Vec<u8>> {
    let key = vote_key(encryption_key)?;
    let aead = Aes256Gcm::new(GenericArray::from_slice(&key));

    let digits = encrypted_vote
        .strip_prefix("0x")
        .ok_or_else(|| Error::MalformedHex(encrypted_vote.to_owned()))?;
    let ciphertext =
        hex::decode(digits).map_err(|_| Error::MalformedHex(encrypted_vote.to_owned()))?;
    if ciphertext.len() < AES_IV_LENGTH {
        return Err(Error::VoteDecryption);
    }

    let nonce = GenericArray::from_slice(&ciphertext[..AES_IV_LENGTH]);
    let encrypted = &ciphertext[AES_IV_LENGTH..];

    aead.decrypt(nonce, encrypted)
        .map_err(|_| Error::VoteDecryption)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::*;

    #[test]
    fn test_vote_encryption() {
        let plaintext = b"Candidate 3";

        let encrypted = encrypt_vote(TEST_ENCRYPTION_KEY, plaintext).unwrap();
        assert!(encrypted.starts_with("0x"));
        let decrypted = decrypt_vote(TEST_ENCRYPTION_KEY, &encrypted).unwrap();
        assert_eq!(plaintext, decrypted.as_slice());

        // Fresh nonce every time
        assert_ne!(encrypted, encrypt_vote(TEST_ENCRYPTION_KEY, plaintext).unwrap());

        // Wrong key fails
        assert_eq!(
            decrypt_vote(TEST_WALLET_KEY, &encrypted),
            Err(Error::VoteDecryption)
        );
    }

    #[test]
    fn test_malformed_ciphertext() {
        assert_eq!(
            decrypt_vote(TEST_ENCRYPTION_KEY, "0x0102"),
            Err(Error::VoteDecryption)
        );
        assert!(matches!(
            decrypt_vote(TEST_ENCRYPTION_KEY, "0102"),
            Err(Error::MalformedHex(_))
        ));
    }
}

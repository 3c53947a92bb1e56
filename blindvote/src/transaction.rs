use crate::*;

/// A vote ready for relay to the election contract.
///
/// Created unsigned; [`VotingTransaction::sign`] returns a signed copy and
/// the signed copy is never modified again.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct VotingTransaction {
    pub election_id: ElectionId,
    pub voter_address: String,
    pub encrypted_vote: String,
    pub unblinded_election_token: Token,
    pub unblinded_signature: Signature,
    pub authority_signature: Option<String>,
}

impl VotingTransaction {
    /// Build an unsigned transaction carrying the credentials' proof of
    /// eligibility and wallet address.
    pub fn new(credentials: &ElectionCredentials, encrypted_vote: &str) -> Result<Self> {
        validate_credentials(credentials)?;
        hex_to_bytes(encrypted_vote, hex_width(encrypted_vote) / 2)?;

        Ok(VotingTransaction {
            election_id: credentials.election_id,
            voter_address: credentials.wallet()?.address(),
            encrypted_vote: encrypted_vote.to_ascii_lowercase(),
            unblinded_election_token: credentials.unblinded_election_token.clone(),
            unblinded_signature: credentials.unblinded_signature.clone(),
            authority_signature: None,
        })
    }

    /// Bytes covered by the wallet signature.
    pub fn signing_payload(&self) -> Result<Vec<u8>> {
        let address = hex_to_bytes(&self.voter_address, 20)?;
        let vote = hex_to_bytes(&self.encrypted_vote, hex_width(&self.encrypted_vote) / 2)?;
        let token = hex_to_bytes(self.unblinded_election_token.value(), SECRET_BYTES)?;
        let signature = hex_to_bytes(
            self.unblinded_signature.value(),
            hex_width(self.unblinded_signature.value()) / 2,
        )?;

        let mut payload = Vec::with_capacity(32 + 20 + vote.len() + 32 + signature.len());
        payload.extend_from_slice(&be256(self.election_id));
        payload.extend_from_slice(&address);
        payload.extend_from_slice(&vote);
        payload.extend_from_slice(&token);
        payload.extend_from_slice(&signature);
        Ok(payload)
    }

    /// keccak256 of the signing payload; this is the message that is signed.
    pub fn digest(&self) -> Result<[u8; 32]> {
        Ok(keccak256(&self.signing_payload()?))
    }

    /// Sign with the voter's wallet, producing a new signed transaction.
    pub fn sign(&self, wallet: &WalletKeypair) -> Result<Self> {
        if self.authority_signature.is_some() {
            return Err(ValidationError::AlreadySigned.into());
        }
        if wallet.address() != self.voter_address {
            return Err(ValidationError::MismatchedVoterAddress.into());
        }

        let signature = wallet.sign_message(&self.digest()?)?;
        Ok(VotingTransaction {
            authority_signature: Some(signature),
            ..self.clone()
        })
    }

    /// Verify that the signature was produced by `voter_address`.
    pub fn verify_authority_signature(&self) -> Result<()> {
        let signature = self
            .authority_signature
            .as_ref()
            .ok_or(ValidationError::NotSigned)?;

        let signer = recover_signer(&self.digest()?, signature)?;
        if signer != self.voter_address {
            return Err(ValidationError::MismatchedVoterAddress.into());
        }
        Ok(())
    }

    /// Verify the wallet signature and the authority's blind signature on
    /// the election token.
    pub fn validate(&self, params: &RsaParams) -> Result<()> {
        self.verify_authority_signature()?;

        if !verify(&self.unblinded_signature, &self.unblinded_election_token, params)? {
            return Err(ValidationError::BlindSignatureMismatch.into());
        }
        Ok(())
    }
}

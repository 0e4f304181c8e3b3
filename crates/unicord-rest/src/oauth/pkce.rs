//! PKCE verifier/challenge generation (S256)

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::RngCore;
use sha2::{Digest, Sha256};

/// A PKCE code verifier and its S256 challenge
#[derive(Debug, Clone)]
pub struct PkcePair {
    /// Sent with the token request
    pub verifier: String,
    /// Sent with the authorize redirect
    pub challenge: String,
}

impl PkcePair {
    /// Generate a fresh pair from 32 random bytes
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        let verifier = URL_SAFE_NO_PAD.encode(bytes);
        Self::from_verifier(verifier)
    }

    fn from_verifier(verifier: String) -> Self {
        let challenge = URL_SAFE_NO_PAD.encode(Sha256::digest(verifier.as_bytes()));
        Self {
            verifier,
            challenge,
        }
    }
}

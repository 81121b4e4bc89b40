//! Schema fingerprints.
//!
//! A fingerprint is blake3 over the JSON form of a value, keyed with a
//! format tag so a change to the descriptor layout never collides with old
//! fingerprints.

use serde::{Deserialize, Serialize};

use crate::error::Result;

const FINGERPRINT_CONTEXT: &str = "arrowmodel schema fingerprint v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(pub [u8; 32]);

impl Fingerprint {
    pub fn to_hex(&self) -> String {
        blake3::Hash::from(self.0).to_hex().to_string()
    }

    /// First 8 bytes as hex, for log lines.
    pub fn short(&self) -> String {
        self.to_hex()[..16].to_string()
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

pub fn fingerprint_of<T: Serialize>(value: &T) -> Result<Fingerprint> {
    let json = serde_json::to_vec(value)?;
    let mut hasher = blake3::Hasher::new_derive_key(FINGERPRINT_CONTEXT);
    hasher.update(&json);
    Ok(Fingerprint(hasher.finalize().into()))
}

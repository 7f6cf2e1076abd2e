//! HMAC commitment over the opponent's move.

use super::secret::Secret;
use crate::error::GameError;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::fmt;
use std::str::FromStr;

/// Length of a commitment digest in bytes
pub const DIGEST_LEN: usize = 32;

/// A keyed hash producing a fixed-length digest
pub trait KeyedHash {
    fn keyed_digest(&self, key: &[u8], message: &[u8]) -> [u8; DIGEST_LEN];
}

/// HMAC-SHA256
#[derive(Clone, Copy, Debug, Default)]
pub struct HmacSha256;

impl KeyedHash for HmacSha256 {
    fn keyed_digest(&self, key: &[u8], message: &[u8]) -> [u8; DIGEST_LEN] {
        let mut mac =
            Hmac::<Sha256>::new_from_slice(key).expect("HMAC accepts keys of any length");
        mac.update(message);
        mac.finalize().into_bytes().into()
    }
}

/// Commitment = HMAC(secret, move label)
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Commitment(#[serde(with = "digest_hex")] [u8; DIGEST_LEN]);

impl Commitment {
    /// Commit to `message` under `secret` with HMAC-SHA256
    pub fn new(secret: &Secret, message: &[u8]) -> Self {
        Self::with_hasher(&HmacSha256, secret, message)
    }

    /// Commit using a different keyed hash
    pub fn with_hasher<H: KeyedHash + ?Sized>(hasher: &H, secret: &Secret, message: &[u8]) -> Self {
        Self(hasher.keyed_digest(secret.as_bytes(), message))
    }

    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Lowercase hex, as published to the player
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Verify that the given secret and message produce this commitment
    pub fn verify(&self, secret: &Secret, message: &[u8]) -> bool {
        *self == Self::new(secret, message)
    }

    /// Like [`Commitment::verify`], but a mismatch is reported as
    /// [`GameError::FairnessViolation`] carrying both digests.
    pub fn check(&self, secret: &Secret, message: &[u8]) -> Result<(), GameError> {
        let recomputed = Self::new(secret, message);
        if recomputed == *self {
            Ok(())
        } else {
            Err(GameError::FairnessViolation {
                published: self.to_hex(),
                recomputed: recomputed.to_hex(),
            })
        }
    }
}

impl FromStr for Commitment {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; DIGEST_LEN];
        hex::decode_to_slice(s.trim(), &mut bytes)
            .map_err(|e| GameError::InvalidHex(format!("commitment: {}", e)))?;
        Ok(Self(bytes))
    }
}

impl fmt::Debug for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Commitment({})", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

mod digest_hex {
    use super::DIGEST_LEN;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8; DIGEST_LEN], s: S) -> Result<S::Ok, S::Error> {
        hex::encode(bytes).serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<[u8; DIGEST_LEN], D::Error> {
        let hex_str = String::deserialize(d)?;
        let mut arr = [0u8; DIGEST_LEN];
        hex::decode_to_slice(&hex_str, &mut arr).map_err(serde::de::Error::custom)?;
        Ok(arr)
    }
}

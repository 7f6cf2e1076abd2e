//! Secret key for the commit-reveal scheme.

use crate::error::GameError;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use std::fmt;
use std::str::FromStr;

/// Length of the secret key in bytes (256 bits).
pub const SECRET_LEN: usize = 32;

/// A source of cryptographically secure random bytes.
///
/// The only failure mode is an unavailable entropy source, which callers
/// treat as fatal.
pub trait SecureRandomSource {
    /// Fill `dest` entirely with random bytes
    fn fill(&mut self, dest: &mut [u8]) -> Result<(), GameError>;
}

/// Adapts any cryptographically secure `rand` generator to [`SecureRandomSource`].
#[derive(Clone, Debug, Default)]
pub struct RngSource<R>(R);

impl RngSource<OsRng> {
    /// The operating system's entropy source
    pub fn os() -> Self {
        Self(OsRng)
    }
}

impl<R: RngCore + CryptoRng> RngSource<R> {
    /// Wrap an existing generator
    pub fn new(rng: R) -> Self {
        Self(rng)
    }
}

impl<R: RngCore + CryptoRng> SecureRandomSource for RngSource<R> {
    fn fill(&mut self, dest: &mut [u8]) -> Result<(), GameError> {
        self.0
            .try_fill_bytes(dest)
            .map_err(|e| GameError::Environment(e.to_string()))
    }
}

/// Draw an index uniformly from `[0, n)`.
///
/// Uses rejection sampling over 64-bit words so that no index is favoured.
pub fn uniform_index<S: SecureRandomSource + ?Sized>(
    source: &mut S,
    n: usize,
) -> Result<usize, GameError> {
    assert!(n > 0, "cannot pick from an empty range");
    let range = n as u64;
    let zone = u64::MAX - (u64::MAX - range + 1) % range;
    loop {
        let mut word = [0u8; 8];
        source.fill(&mut word)?;
        let value = u64::from_le_bytes(word);
        if value <= zone {
            return Ok((value % range) as usize);
        }
    }
}

/// 256-bit secret key, generated once per session and revealed at the end
#[derive(Clone, PartialEq, Eq)]
pub struct Secret([u8; SECRET_LEN]);

impl Secret {
    /// Generate a new secret from the given source
    pub fn generate<S: SecureRandomSource + ?Sized>(source: &mut S) -> Result<Self, GameError> {
        let mut bytes = [0u8; SECRET_LEN];
        source.fill(&mut bytes)?;
        Ok(Self(bytes))
    }

    /// Generate a new secret from the operating system's entropy source
    pub fn random() -> Result<Self, GameError> {
        Self::generate(&mut RngSource::os())
    }

    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; SECRET_LEN]) -> Self {
        Self(bytes)
    }

    /// Parse a revealed key from its 64-character hex form
    pub fn from_hex(s: &str) -> Result<Self, GameError> {
        let mut bytes = [0u8; SECRET_LEN];
        hex::decode_to_slice(s.trim(), &mut bytes)
            .map_err(|e| GameError::InvalidHex(format!("secret key: {}", e)))?;
        Ok(Self(bytes))
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; SECRET_LEN] {
        &self.0
    }

    /// Lowercase hex, as revealed to the player
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl FromStr for Secret {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

// Never print key material through Debug; the session may be logged before reveal.
impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret(..)")
    }
}

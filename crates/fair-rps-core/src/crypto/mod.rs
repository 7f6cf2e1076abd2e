//! Cryptographic primitives for the commit-reveal protocol.
//!
//! This module provides:
//! - Secret and the SecureRandomSource capability for key generation
//! - Commitment and the KeyedHash capability for HMAC commitments

mod commitment;
mod secret;

pub use commitment::{Commitment, HmacSha256, KeyedHash, DIGEST_LEN};
pub use secret::{uniform_index, RngSource, Secret, SecureRandomSource, SECRET_LEN};

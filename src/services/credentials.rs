// SPDX-License-Identifier: MIT

//! Password hashing and verification.
//!
//! PBKDF2-HMAC-SHA256 with 100,000 iterations and a 256-bit derived
//! key, hex-encoded. These parameters are load-bearing: documents
//! written by earlier versions of the dashboard carry hashes produced
//! with exactly this derivation, so they must not change.

use ring::rand::{SecureRandom, SystemRandom};
use subtle::ConstantTimeEq;

/// Salt length in raw bytes (32 hex chars on the wire).
const SALT_LEN: usize = 16;

/// Derived key length in raw bytes (64 hex chars on the wire).
const KEY_LEN: usize = 32;

const PBKDF2_ITERATIONS: u32 = 100_000;

/// Credential service failures.
///
/// These indicate an environment or data problem, not a wrong
/// password; `verify_password` never returns an error.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("secure random source unavailable")]
    Rng,

    #[error("salt is not valid hex")]
    MalformedSalt,
}

/// Generate a fresh random salt, hex-encoded.
///
/// Fails loudly if the system's secure randomness source is
/// unavailable rather than degrading to a predictable salt.
pub fn generate_salt() -> Result<String, CredentialError> {
    let rng = SystemRandom::new();
    let mut salt = [0u8; SALT_LEN];
    rng.fill(&mut salt).map_err(|_| CredentialError::Rng)?;
    Ok(hex::encode(salt))
}

/// Derive the password hash for the given password and hex salt.
///
/// Deterministic: identical inputs always produce identical output.
pub fn hash_password(password: &str, salt: &str) -> Result<String, CredentialError> {
    let salt_bytes = hex::decode(salt).map_err(|_| CredentialError::MalformedSalt)?;

    let iterations =
        std::num::NonZeroU32::new(PBKDF2_ITERATIONS).expect("iteration count is non-zero");

    let mut key = [0u8; KEY_LEN];
    ring::pbkdf2::derive(
        ring::pbkdf2::PBKDF2_HMAC_SHA256,
        iterations,
        &salt_bytes,
        password.as_bytes(),
        &mut key,
    );

    Ok(hex::encode(key))
}

/// Check a password against a stored hash and salt.
///
/// Comparison is constant-time. Malformed salts or hashes verify as
/// `false`; no side effects, no network.
pub fn verify_password(password: &str, stored_hash: &str, salt: &str) -> bool {
    let computed = match hash_password(password, salt) {
        Ok(h) => h,
        Err(_) => return false,
    };

    let (computed_bytes, stored_bytes) = match (hex::decode(&computed), hex::decode(stored_hash)) {
        (Ok(c), Ok(s)) => (c, s),
        _ => return false,
    };

    computed_bytes.ct_eq(&stored_bytes).into()
}

//! Deterministic salted credential hashing.
//!
//! Stored password secrets are the hex digest of `salt ‖ plaintext`,
//! iterated a configured number of times. The algorithm and iteration
//! count are configuration constants, never request input.

use std::str::FromStr;

use rand::RngExt;
use rand::distr::Alphanumeric;
use sha2::{Digest, Sha256, Sha512};

use atrium_core::AppError;
use atrium_core::config::auth::AuthConfig;
use atrium_core::result::AppResult;
use atrium_entity::account::{Account, AuthType};

/// Length of the generated secret salt.
pub const SALT_LENGTH: usize = 8;

/// Digest algorithms supported for stored password secrets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    /// SHA-256.
    Sha256,
    /// SHA-512.
    Sha512,
}

impl FromStr for HashAlgorithm {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sha256" => Ok(Self::Sha256),
            "sha512" => Ok(Self::Sha512),
            _ => Err(AppError::configuration(format!(
                "Unknown hash algorithm: '{s}'. Supported: sha256, sha512"
            ))),
        }
    }
}

/// Hashes stored password secrets with the configured salted digest.
#[derive(Debug, Clone)]
pub struct SaltedPasswordHasher {
    /// Configured digest algorithm.
    algorithm: HashAlgorithm,
    /// Configured iteration count, at least 1.
    iterations: u32,
}

impl SaltedPasswordHasher {
    /// Create a hasher from auth configuration.
    ///
    /// Fails with a configuration error on an unknown algorithm name or a
    /// zero iteration count.
    pub fn new(config: &AuthConfig) -> AppResult<Self> {
        let algorithm = config.hash_algorithm.parse()?;
        if config.hash_iterations == 0 {
            return Err(AppError::configuration(
                "hash iteration count must be at least 1",
            ));
        }
        Ok(Self {
            algorithm,
            iterations: config.hash_iterations,
        })
    }

    /// Hash a plaintext secret with the given salt, returning hex.
    ///
    /// Deterministic: the same plaintext and salt always yield the same
    /// digest. Fails only on a malformed salt.
    pub fn hash(&self, plaintext: &str, salt: &str) -> AppResult<String> {
        if salt.is_empty() || !salt.is_ascii() {
            return Err(AppError::configuration("malformed secret salt"));
        }
        Ok(match self.algorithm {
            HashAlgorithm::Sha256 => digest_hex::<Sha256>(plaintext, salt, self.iterations),
            HashAlgorithm::Sha512 => digest_hex::<Sha512>(plaintext, salt, self.iterations),
        })
    }

    /// Encrypt a password account's secret in place.
    ///
    /// Generates the salt once if unset, then replaces `auth_secret` with
    /// the digest of the current plaintext value. Non-password accounts are
    /// left untouched. Must be called exactly once per plaintext-secret
    /// lifecycle: a second call without a fresh plaintext would hash the
    /// hash.
    pub fn encrypt_account(&self, account: &mut Account) -> AppResult<()> {
        if account.auth_type != AuthType::Password {
            return Ok(());
        }
        let salt = match &account.secret_salt {
            Some(salt) => salt.clone(),
            None => {
                let salt = generate_salt();
                account.secret_salt = Some(salt.clone());
                salt
            }
        };
        account.auth_secret = self.hash(&account.auth_secret, &salt)?;
        Ok(())
    }
}

/// Generate a fresh random alphanumeric salt.
pub fn generate_salt() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(SALT_LENGTH)
        .map(char::from)
        .collect()
}

/// Digest `salt ‖ plaintext`, re-digesting the output `iterations - 1`
/// more times, and return the final digest as lowercase hex.
fn digest_hex<D: Digest>(plaintext: &str, salt: &str, iterations: u32) -> String {
    let mut hasher = D::new();
    hasher.update(salt.as_bytes());
    hasher.update(plaintext.as_bytes());
    let mut digest = hasher.finalize();
    for _ in 1..iterations {
        digest = D::digest(digest.as_slice());
    }
    digest
        .as_slice()
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect()
}

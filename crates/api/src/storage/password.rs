// Author secret hashing and verification
// Decision: Argon2id (default parameters) when secret hashing is enabled
// Decision: Stored values that do not parse as Argon2 PHC strings are plaintext
//           secrets and keep exact-equality semantics, even if they start with `$argon2`

use anyhow::Result;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

const ARGON2_PREFIX: &str = "$argon2";

/// Hash a secret using Argon2id
pub fn hash_secret(secret: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let hash = argon2
        .hash_password(secret.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash secret: {}", e))?;

    Ok(hash.to_string())
}

/// Parse a stored value as a complete Argon2 PHC string (salt and hash present)
fn parse_hash(stored: &str) -> Option<PasswordHash<'_>> {
    if !stored.starts_with(ARGON2_PREFIX) {
        return None;
    }
    PasswordHash::new(stored)
        .ok()
        .filter(|parsed| parsed.salt.is_some() && parsed.hash.is_some())
}

/// Whether a stored secret is an Argon2 hash rather than plaintext
pub fn is_hashed(stored: &str) -> bool {
    parse_hash(stored).is_some()
}

/// Check a presented secret against the stored value
pub fn verify_secret(presented: &str, stored: &str) -> bool {
    match parse_hash(stored) {
        Some(parsed_hash) => Argon2::default()
            .verify_password(presented.as_bytes(), &parsed_hash)
            .is_ok(),
        None => presented == stored,
    }
}

use anyhow::{anyhow, Context};
use argon2::{
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;

/// Digest a plaintext secret into an Argon2id PHC string. Every call draws a
/// new salt, so equal secrets never share a digest.
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|digest| digest.to_string())
        .map_err(|e| anyhow!("argon2 hashing failed: {e}"))
}

/// `Ok(false)` only for a mismatch. A digest that does not parse, or any
/// other Argon2 failure, is an error rather than a silent rejection.
pub fn verify_password(plain: &str, digest: &str) -> anyhow::Result<bool> {
    let parsed =
        PasswordHash::new(digest).map_err(|e| anyhow!("stored digest is not a PHC string: {e}"))?;
    match Argon2::default().verify_password(plain.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(anyhow!("argon2 verification failed: {e}")),
    }
}

// Argon2 is CPU-bound; these run it on the blocking pool.

pub async fn hash_password_blocking(plain: String) -> anyhow::Result<String> {
    tokio::task::spawn_blocking(move || hash_password(&plain))
        .await
        .context("hash task panicked")?
}

pub async fn verify_password_blocking(plain: String, digest: String) -> anyhow::Result<bool> {
    tokio::task::spawn_blocking(move || verify_password(&plain, &digest))
        .await
        .context("verify task panicked")?
}

//! Password hashing with Argon2id.
//!
//! Hashes are stored as PHC strings, which embed the salt and parameters.

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use crate::{EngineError, ResultEngine};

/// Hash `password` with a fresh random salt.
pub(crate) fn hash(password: &str) -> ResultEngine<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| EngineError::PasswordHash(err.to_string()))
}

/// Check `password` against a stored PHC string.
///
/// A mismatch is `Ok(false)`; only an unreadable hash is an error.
pub(crate) fn verify(password: &str, stored: &str) -> ResultEngine<bool> {
    let parsed =
        PasswordHash::new(stored).map_err(|err| EngineError::PasswordHash(err.to_string()))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(err) => Err(EngineError::PasswordHash(err.to_string())),
    }
}

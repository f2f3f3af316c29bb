//! Password storage and verification.
//!
//! Login only ever asks a [`CredentialVerifier`] whether a password matches
//! the stored secret, so the scheme can change without touching callers.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use serde::{Deserialize, Serialize};

use super::AppError;

pub trait CredentialVerifier: Send + Sync {
    /// Turn a password into the secret stored for the account.
    fn seal(&self, password: &str) -> Result<String, AppError>;

    /// Check a password against a stored secret.
    fn verify(&self, password: &str, stored: &str) -> bool;
}

/// Salted Argon2id hashes in PHC string format.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2Credentials;

impl CredentialVerifier for Argon2Credentials {
    fn seal(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Credential(format!("Password hashing failed: {}", e)))?;
        Ok(hash.to_string())
    }

    fn verify(&self, password: &str, stored: &str) -> bool {
        // Secrets that are not PHC strings (e.g. legacy plaintext rows) never match
        match PasswordHash::new(stored) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }
}

/// Plaintext storage with exact, case-sensitive comparison. Only for
/// databases written by older versions of the tool.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaintextCredentials;

impl CredentialVerifier for PlaintextCredentials {
    fn seal(&self, password: &str) -> Result<String, AppError> {
        Ok(password.to_string())
    }

    fn verify(&self, password: &str, stored: &str) -> bool {
        password == stored
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordScheme {
    #[default]
    Argon2,
    Plaintext,
}

impl PasswordScheme {
    pub fn verifier(&self) -> Box<dyn CredentialVerifier> {
        match self {
            PasswordScheme::Argon2 => Box::new(Argon2Credentials),
            PasswordScheme::Plaintext => Box::new(PlaintextCredentials),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argon2_roundtrip() {
        let creds = Argon2Credentials;
        let sealed = creds.seal("pw1").unwrap();
        assert_ne!(sealed, "pw1");
        assert!(sealed.starts_with("$argon2"));
        assert!(creds.verify("pw1", &sealed));
        assert!(!creds.verify("pw2", &sealed));
        assert!(!creds.verify("PW1", &sealed));
    }

    #[test]
    fn test_argon2_salts_each_seal() {
        let creds = Argon2Credentials;
        assert_ne!(creds.seal("pw1").unwrap(), creds.seal("pw1").unwrap());
    }

    #[test]
    fn test_argon2_rejects_plaintext_rows() {
        assert!(!Argon2Credentials.verify("pw1", "pw1"));
    }

    #[test]
    fn test_plaintext_is_exact_match() {
        let creds = PlaintextCredentials;
        let sealed = creds.seal("pw1").unwrap();
        assert_eq!(sealed, "pw1");
        assert!(creds.verify("pw1", &sealed));
        assert!(!creds.verify("Pw1", &sealed));
        assert!(!creds.verify("pw1 ", &sealed));
    }
}

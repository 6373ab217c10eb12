use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::rngs::OsRng;
use rand::Rng;

use crate::errors::ServiceError;

const GENERATED_CHARSET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*()-_=+<>?";
pub const GENERATED_LEN: usize = 12;

pub fn hash_password(plain: &str) -> Result<String, ServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| ServiceError::Internal(format!("hashing error: {}", e)))
}

pub fn verify_password(plain: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default().verify_password(plain.as_bytes(), &parsed).is_ok(),
        Err(_) => false,
    }
}

/// Random password for accounts created on the remote platform on the user's behalf.
pub fn generate_password() -> String {
    let mut rng = rand::thread_rng();
    (0..GENERATED_LEN)
        .map(|_| GENERATED_CHARSET[rng.gen_range(0..GENERATED_CHARSET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_and_hides_plaintext() {
        let h = hash_password("Secret123").unwrap();
        assert!(h.starts_with("$argon2"));
        assert!(!h.contains("Secret123"));
        assert!(verify_password("Secret123", &h));
        assert!(!verify_password("secret123", &h));
    }

    #[test]
    fn generated_password_uses_charset() {
        let p = generate_password();
        assert_eq!(p.len(), GENERATED_LEN);
        assert!(p.bytes().all(|b| GENERATED_CHARSET.contains(&b)));
        assert_ne!(generate_password(), generate_password());
    }
}

use bcrypt::{hash, verify, BcryptError, DEFAULT_COST};

/// One-way, salted hash of a plaintext password for storage.
pub fn hash_password(plain: &str) -> Result<String, BcryptError> {
    hash(plain, DEFAULT_COST)
}

/// Check a plaintext password against a stored hash.
pub fn verify_password(plain: &str, hashed: &str) -> Result<bool, BcryptError> {
    verify(plain, hashed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_never_the_plaintext() {
        let hashed = hash_password("P@ssw0rd!").unwrap();
        assert_ne!(hashed, "P@ssw0rd!");
    }

    #[test]
    fn verify_accepts_the_original_password() {
        let hashed = hash_password("P@ssw0rd!").unwrap();
        assert!(verify_password("P@ssw0rd!", &hashed).unwrap());
    }

    #[test]
    fn verify_rejects_a_different_password() {
        let hashed = hash_password("P@ssw0rd!").unwrap();
        assert!(!verify_password("wrong-password", &hashed).unwrap());
    }
}

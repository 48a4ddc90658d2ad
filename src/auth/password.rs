use bcrypt::BcryptError;

/// Fixed bcrypt cost factor for stored credentials.
pub const COST: u32 = 10;

/// Hash a password for storage.
pub fn hash(password: &str) -> Result<String, BcryptError> {
    bcrypt::hash(password, COST)
}

/// Verify a password against a stored hash. A hash that does not parse
/// verifies as false rather than erroring.
pub fn verify(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_correct_password() {
        let password = "mySecurePassword123";
        let hash = hash(password).expect("Failed to hash password");

        assert!(verify(password, &hash));
    }

    #[test]
    fn test_verify_wrong_password_fails() {
        let hash = hash("correct_password").expect("Failed to hash password");

        assert!(!verify("wrong_password", &hash));
    }

    #[test]
    fn test_same_password_different_hashes() {
        let password = "test_password";
        let hash1 = hash(password).expect("Failed to hash password");
        let hash2 = hash(password).expect("Failed to hash password");

        // Random salts keep equal passwords from producing equal hashes.
        assert_ne!(hash1, hash2);
        assert!(verify(password, &hash1));
        assert!(verify(password, &hash2));
    }

    #[test]
    fn test_hash_encodes_fixed_cost() {
        let hash = hash("password").expect("Failed to hash password");

        assert!(hash.starts_with("$2"));
        assert!(hash.contains("$10$"), "unexpected cost in hash: {hash}");
    }

    #[test]
    fn test_verify_with_invalid_hash_format() {
        assert!(!verify("password", "not-a-valid-bcrypt-hash"));
        assert!(!verify("password", ""));
    }
}

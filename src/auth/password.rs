use crate::error::AppError;

/// Bcrypt-backed credential store. The cost factor is injected from
/// configuration so deployments can retune hashing time as hardware changes.
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hashes a password with a per-call random salt; hashing the same
    /// password twice yields different digests.
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        Ok(bcrypt::hash(password, self.cost)?)
    }

    /// Returns true iff `password` matches `hash`. A malformed hash counts
    /// as a failed match, never an error.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        bcrypt::verify(password, hash).unwrap_or(false)
    }
}

use crate::types::{AppError, Result};
use tracing::warn;

/// bcrypt work factor used when none is configured.
pub const DEFAULT_COST: u32 = 10;

const MIN_COST: u32 = 4;
const MAX_COST: u32 = 31;

/// Salted, adaptive one-way hashing of user passwords (bcrypt).
///
/// The hasher holds no state besides the work factor, so it is `Copy` and
/// every call is independent of every other. The `*_blocking` variants move
/// the CPU-bound work onto tokio's blocking pool.
#[derive(Debug, Clone, Copy)]
pub struct CredentialHasher {
    cost: u32,
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self { cost: DEFAULT_COST }
    }
}

impl CredentialHasher {
    /// Creates a hasher with the given bcrypt cost (4..=31).
    pub fn new(cost: u32) -> Result<Self> {
        if !(MIN_COST..=MAX_COST).contains(&cost) {
            return Err(AppError::Config(format!(
                "hash cost must be between {} and {}, got {}",
                MIN_COST,
                MAX_COST,
                cost
            )));
        }
        Ok(Self { cost })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hashes a plaintext password into a modular-crypt bcrypt digest.
    pub fn hash(&self, plaintext: &str) -> Result<String> {
        bcrypt::hash(plaintext, self.cost)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
    }

    /// Checks a plaintext password against a stored digest.
    ///
    /// A wrong password and an unparseable digest both yield `false`.
    pub fn verify(&self, plaintext: &str, digest: &str) -> bool {
        match bcrypt::verify(plaintext, digest) {
            Ok(matched) => matched,
            Err(e) => {
                warn!("stored password digest could not be parsed: {}", e);
                false
            }
        }
    }

    pub async fn hash_blocking(&self, plaintext: String) -> Result<String> {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.hash(&plaintext))
            .await
            .map_err(|e| AppError::Internal(format!("Hashing task failed: {}", e)))?
    }

    pub async fn verify_blocking(&self, plaintext: String, digest: String) -> Result<bool> {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.verify(&plaintext, &digest))
            .await
            .map_err(|e| AppError::Internal(format!("Verification task failed: {}", e)))
    }
}

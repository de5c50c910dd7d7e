//! Password hashing (argon2id, PHC string format).

use argon2::password_hash::SaltString;
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use rand_core::OsRng;
use tracing::error;

use crate::services::error::{ServiceError, ServiceResult};

/// Argon2id hasher with fixed cost parameters.
///
/// `Default` uses the argon2 crate's recommended parameters. Verification
/// reads the parameters from the stored PHC string, so hashes made with other
/// parameters still verify.
#[derive(Clone)]
pub struct Passwords {
    argon2: Argon2<'static>,
}

impl std::fmt::Debug for Passwords {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Passwords").finish_non_exhaustive()
    }
}

impl Default for Passwords {
    fn default() -> Self {
        Self::new(Params::default())
    }
}

impl Passwords {
    pub fn new(params: Params) -> Self {
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        }
    }

    pub fn hash(&self, plain: &str) -> ServiceResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(plain.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| {
                error!(error = %e, "Failed to hash password");
                ServiceError::Hashing
            })
    }

    /// `false` for a wrong password and for a stored hash that does not parse.
    pub fn verify(&self, plain: &str, phc: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(phc) else {
            return false;
        };
        self.argon2.verify_password(plain.as_bytes(), &parsed).is_ok()
    }
}

/// Low-cost hasher so tests that register many users stay fast.
#[cfg(test)]
pub fn cheap() -> std::sync::Arc<Passwords> {
    let params = Params::new(1024, 1, 1, None).expect("valid argon2 params");
    std::sync::Arc::new(Passwords::new(params))
}

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error};

use crate::repos::CredentialStore;
use crate::services::auth::Passwords;
use crate::services::auth::token::TokenCodec;
use crate::services::deadline::bounded;
use crate::services::error::{ServiceError, ServiceResult};

/// Email + password → identity token.
pub struct LoginService {
    users: Arc<dyn CredentialStore>,
    codec: Arc<TokenCodec>,
    passwords: Arc<Passwords>,
    deadline: Duration,
}

impl std::fmt::Debug for LoginService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginService")
            .field("deadline", &self.deadline)
            .finish()
    }
}

impl LoginService {
    pub fn new(
        users: Arc<dyn CredentialStore>,
        codec: Arc<TokenCodec>,
        passwords: Arc<Passwords>,
        deadline: Duration,
    ) -> Self {
        Self {
            users,
            codec,
            passwords,
            deadline,
        }
    }

    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn login(&self, email: &str, plain_password: &str) -> ServiceResult<String> {
        let user = bounded(self.deadline, "find_by_email", self.users.find_by_email(email))
            .await?
            .ok_or_else(|| {
                debug!("Login rejected: unknown email");
                ServiceError::InvalidCredentials
            })?;

        if !self.passwords.verify(plain_password, &user.password_hash) {
            debug!(user_id = %user.id, "Login rejected: password mismatch");
            return Err(ServiceError::InvalidCredentials);
        }

        self.codec.issue(&user.id, &user.email).map_err(|e| {
            error!(user_id = %user.id, error = ?e, "Failed to sign token");
            ServiceError::Signing
        })
    }
}

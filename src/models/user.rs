use serde::Serialize;

use crate::models::{Resource, Timestamps, max_chars, merge, require};
use crate::services::auth::Passwords;
use crate::services::error::{ServiceError, ServiceResult};

pub const MIN_PASSWORD_LEN: usize = 6;
pub const MIN_AGE: i32 = 8;
pub const MAX_AGE: i32 = 63;

/// Account identity. Owns its photos, comments and social media links.
#[derive(Clone)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub age: i32,
    pub profile_image_url: Option<String>,
    pub timestamps: Timestamps,
    // Plain password submitted on registration, hashed away by `before_store`.
    plain_password: Option<String>,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print credentials
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("age", &self.age)
            .finish()
    }
}

impl User {
    pub fn register(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        age: i32,
    ) -> Self {
        Self {
            id: String::new(),
            username: username.into(),
            email: email.into(),
            password_hash: String::new(),
            age,
            profile_image_url: None,
            timestamps: Timestamps::default(),
            plain_password: Some(password.into()),
        }
    }

    /// Rebuild a user loaded from storage.
    pub fn from_stored(
        id: String,
        username: String,
        email: String,
        password_hash: String,
        age: i32,
        profile_image_url: Option<String>,
        timestamps: Timestamps,
    ) -> Self {
        Self {
            id,
            username,
            email,
            password_hash,
            age,
            profile_image_url,
            timestamps,
            plain_password: None,
        }
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id.clone(),
            email: self.email.clone(),
            username: self.username.clone(),
            profile_image_url: self.profile_image_url.clone(),
        }
    }
}

/// Public owner fields embedded in comment and social media listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub username: String,
    #[serde(rename = "profileImageUrl", skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
}

/// Public owner fields embedded in photo listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    pub id: String,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Default)]
pub struct UserPatch {
    pub username: Option<String>,
    pub email: Option<String>,
}

impl Resource for User {
    const KIND: &'static str = "user";
    const LABEL: &'static str = "user";

    type Listing = UserProfile;
    type Patch = UserPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn owner_id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: String) {
        self.id = id;
    }

    fn timestamps_mut(&mut self) -> &mut Timestamps {
        &mut self.timestamps
    }

    fn validate(&self) -> ServiceResult<()> {
        require(&self.username, "username")?;
        max_chars(&self.username, "username", 50)?;
        require(&self.email, "email")?;
        max_chars(&self.email, "email", 50)?;
        if !is_email(&self.email) {
            return Err(ServiceError::validation("email must be a valid email address"));
        }

        match &self.plain_password {
            Some(plain) => {
                require(plain, "password")?;
                if plain.chars().count() < MIN_PASSWORD_LEN {
                    return Err(ServiceError::validation(format!(
                        "password must be at least {MIN_PASSWORD_LEN} chars"
                    )));
                }
            }
            None => require(&self.password_hash, "password")?,
        }

        if self.age == 0 {
            return Err(ServiceError::validation("age is required"));
        }
        if !(MIN_AGE..=MAX_AGE).contains(&self.age) {
            return Err(ServiceError::validation(format!(
                "age must be between {MIN_AGE} and {MAX_AGE}"
            )));
        }

        Ok(())
    }

    fn apply(&mut self, patch: UserPatch) {
        merge(&mut self.username, patch.username);
        merge(&mut self.email, patch.email);
    }

    fn before_store(&mut self, passwords: &Passwords) -> ServiceResult<()> {
        if let Some(plain) = self.plain_password.take() {
            self.password_hash = passwords.hash(&plain)?;
        }
        Ok(())
    }
}

fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !value.chars().any(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::password;

    fn johndoe() -> User {
        User::register("johndoe", "johndoe@example.com", "secret", 8)
    }

    #[test]
    fn registration_payload_is_valid() {
        assert!(johndoe().validate().is_ok());
    }

    #[test]
    fn rejects_missing_username() {
        let mut user = johndoe();
        user.username = " ".into();
        let err = user.validate().unwrap_err();
        assert_eq!(err.to_string(), "username is required");
    }

    #[test]
    fn rejects_malformed_email() {
        for email in ["johndoe", "@example.com", "john@", "john@example", "jo hn@example.com"] {
            let mut user = johndoe();
            user.email = email.into();
            assert!(
                matches!(user.validate(), Err(ServiceError::Validation(_))),
                "{email} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_short_password() {
        let user = User::register("johndoe", "johndoe@example.com", "12345", 8);
        assert!(matches!(user.validate(), Err(ServiceError::Validation(_))));
    }

    #[test]
    fn rejects_age_out_of_range() {
        for age in [0, 7, 64] {
            let user = User::register("johndoe", "johndoe@example.com", "secret", age);
            assert!(matches!(user.validate(), Err(ServiceError::Validation(_))));
        }
    }

    #[test]
    fn before_store_replaces_plain_password_with_hash() {
        let passwords = password::cheap();
        let mut user = johndoe();
        user.before_store(&passwords).unwrap();

        assert!(user.password_hash.starts_with("$argon2"));
        assert!(passwords.verify("secret", &user.password_hash));
        // validation now runs against the stored hash
        assert!(user.validate().is_ok());
    }

    #[test]
    fn patch_touches_only_submitted_fields() {
        let mut user = johndoe();
        user.apply(UserPatch {
            username: Some("newjohndoe".into()),
            email: None,
        });

        assert_eq!(user.username, "newjohndoe");
        assert_eq!(user.email, "johndoe@example.com");
        assert_eq!(user.age, 8);
    }

    #[test]
    fn debug_output_hides_credentials() {
        let mut user = johndoe();
        user.before_store(&password::cheap()).unwrap();
        let printed = format!("{user:?}");
        assert!(!printed.contains("secret"));
        assert!(!printed.contains("argon2"));
    }
}

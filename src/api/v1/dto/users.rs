/*
 * Responsibility
 * - /users 系 (register / login / update) の request/response DTO
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{User, UserPatch};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub age: i32,
}

impl From<RegisterRequest> for User {
    fn from(req: RegisterRequest) -> Self {
        User::register(req.username, req.email, req.password, req.age)
    }
}

#[derive(Debug, Serialize)]
pub struct RegisteredResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub age: i32,
}

impl From<User> for RegisteredResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            age: user.age,
        }
    }
}

#[derive(Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .finish()
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
}

impl From<UpdateUserRequest> for UserPatch {
    fn from(req: UpdateUserRequest) -> Self {
        UserPatch {
            username: req.username,
            email: req.email,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UpdatedUserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub age: i32,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UpdatedUserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            age: user.age,
            updated_at: user.timestamps.updated_at,
        }
    }
}

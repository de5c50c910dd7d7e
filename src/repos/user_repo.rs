/*
 * Responsibility
 * - users テーブル向け SQLx 操作
 * - 削除時は socialmedias を先に消す (同一 transaction)
 * - DB エラーは RepoError::from_sqlx で conflict / reference に振り分ける
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::models::{Timestamps, User, UserProfile};
use crate::repos::error::{RepoError, RepoResult};
use crate::repos::{CredentialStore, Repository};

#[derive(Debug, FromRow)]
struct UserRow {
    id: String,
    username: String,
    email: String,
    password_hash: String,
    age: i32,
    profile_image_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User::from_stored(
            row.id,
            row.username,
            row.email,
            row.password_hash,
            row.age,
            row.profile_image_url,
            Timestamps {
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
        )
    }
}

#[derive(Clone, Debug)]
pub struct UserRepo {
    pool: PgPool,
}

impl UserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<User> for UserRepo {
    async fn list(&self, owner_id: Option<&str>) -> RepoResult<Vec<UserProfile>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, email, password_hash, age, profile_image_url, created_at, updated_at
            FROM users
            WHERE $1::VARCHAR IS NULL OR id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(rows.into_iter().map(|r| User::from(r).profile()).collect())
    }

    async fn insert(&self, user: &User) -> RepoResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, username, email, password_hash, age, profile_image_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, username, email, password_hash, age, profile_image_url, created_at, updated_at
            "#,
        )
        .bind(&user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.age)
        .bind(&user.profile_image_url)
        .bind(user.timestamps.created_at)
        .bind(user.timestamps.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row.into())
    }

    async fn get(&self, id: &str) -> RepoResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, email, password_hash, age, profile_image_url, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row.map(Into::into))
    }

    async fn update(&self, user: &User) -> RepoResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET username = $2, email = $3, updated_at = $4
            WHERE id = $1
            RETURNING id, username, email, password_hash, age, profile_image_url, created_at, updated_at
            "#,
        )
        .bind(&user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(user.timestamps.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row.map(Into::into))
    }

    async fn delete(&self, id: &str) -> RepoResult<bool> {
        let mut tx = self.pool.begin().await.map_err(RepoError::Db)?;

        sqlx::query("DELETE FROM socialmedias WHERE user_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(RepoError::from_sqlx)?;

        // photos and comments go through ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(RepoError::from_sqlx)?;

        tx.commit().await.map_err(RepoError::Db)?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl CredentialStore for UserRepo {
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, email, password_hash, age, profile_image_url, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row.map(Into::into))
    }
}

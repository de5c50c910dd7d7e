/*
 * Responsibility
 * - socialmedias テーブル向け SQLx 操作
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::models::{SocialMedia, SocialMediaListing, Timestamps, UserProfile};
use crate::repos::Repository;
use crate::repos::error::{RepoError, RepoResult};

#[derive(Debug, FromRow)]
struct SocialMediaRow {
    id: String,
    name: String,
    social_media_url: String,
    user_id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<SocialMediaRow> for SocialMedia {
    fn from(row: SocialMediaRow) -> Self {
        SocialMedia {
            id: row.id,
            name: row.name,
            social_media_url: row.social_media_url,
            user_id: row.user_id,
            timestamps: Timestamps {
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
        }
    }
}

#[derive(Debug, FromRow)]
struct SocialMediaListingRow {
    id: String,
    name: String,
    social_media_url: String,
    user_id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    owner_username: String,
    owner_email: String,
    owner_profile_image_url: Option<String>,
}

impl From<SocialMediaListingRow> for SocialMediaListing {
    fn from(row: SocialMediaListingRow) -> Self {
        SocialMediaListing {
            user: UserProfile {
                id: row.user_id.clone(),
                email: row.owner_email,
                username: row.owner_username,
                profile_image_url: row.owner_profile_image_url,
            },
            id: row.id,
            name: row.name,
            social_media_url: row.social_media_url,
            user_id: row.user_id,
            timestamps: Timestamps {
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
        }
    }
}

#[derive(Clone, Debug)]
pub struct SocialMediaRepo {
    pool: PgPool,
}

impl SocialMediaRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<SocialMedia> for SocialMediaRepo {
    async fn list(&self, owner_id: Option<&str>) -> RepoResult<Vec<SocialMediaListing>> {
        let rows = sqlx::query_as::<_, SocialMediaListingRow>(
            r#"
            SELECT
                s.id, s.name, s.social_media_url, s.user_id, s.created_at, s.updated_at,
                u.username AS owner_username,
                u.email AS owner_email,
                u.profile_image_url AS owner_profile_image_url
            FROM socialmedias s
            JOIN users u ON u.id = s.user_id
            WHERE $1::VARCHAR IS NULL OR s.user_id = $1
            ORDER BY s.created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, link: &SocialMedia) -> RepoResult<SocialMedia> {
        let row = sqlx::query_as::<_, SocialMediaRow>(
            r#"
            INSERT INTO socialmedias (id, name, social_media_url, user_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, social_media_url, user_id, created_at, updated_at
            "#,
        )
        .bind(&link.id)
        .bind(&link.name)
        .bind(&link.social_media_url)
        .bind(&link.user_id)
        .bind(link.timestamps.created_at)
        .bind(link.timestamps.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row.into())
    }

    async fn get(&self, id: &str) -> RepoResult<Option<SocialMedia>> {
        let row = sqlx::query_as::<_, SocialMediaRow>(
            r#"
            SELECT id, name, social_media_url, user_id, created_at, updated_at
            FROM socialmedias
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row.map(Into::into))
    }

    async fn update(&self, link: &SocialMedia) -> RepoResult<Option<SocialMedia>> {
        let row = sqlx::query_as::<_, SocialMediaRow>(
            r#"
            UPDATE socialmedias
            SET name = $2, social_media_url = $3, updated_at = $4
            WHERE id = $1
            RETURNING id, name, social_media_url, user_id, created_at, updated_at
            "#,
        )
        .bind(&link.id)
        .bind(&link.name)
        .bind(&link.social_media_url)
        .bind(link.timestamps.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row.map(Into::into))
    }

    async fn delete(&self, id: &str) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM socialmedias WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(RepoError::from_sqlx)?;

        Ok(result.rows_affected() > 0)
    }
}

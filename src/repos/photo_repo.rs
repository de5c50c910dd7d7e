/*
 * Responsibility
 * - photos テーブル向け SQLx 操作
 * - 一覧は所有者の公開情報を join して返す
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::models::{Photo, PhotoListing, Timestamps, UserSummary};
use crate::repos::Repository;
use crate::repos::error::{RepoError, RepoResult};

#[derive(Debug, FromRow)]
struct PhotoRow {
    id: String,
    title: String,
    caption: String,
    photo_url: String,
    user_id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PhotoRow> for Photo {
    fn from(row: PhotoRow) -> Self {
        Photo {
            id: row.id,
            title: row.title,
            caption: row.caption,
            photo_url: row.photo_url,
            user_id: row.user_id,
            timestamps: Timestamps {
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
        }
    }
}

#[derive(Debug, FromRow)]
struct PhotoListingRow {
    id: String,
    title: String,
    caption: String,
    photo_url: String,
    user_id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    owner_username: String,
    owner_email: String,
}

impl From<PhotoListingRow> for PhotoListing {
    fn from(row: PhotoListingRow) -> Self {
        PhotoListing {
            user: UserSummary {
                id: row.user_id.clone(),
                username: row.owner_username,
                email: row.owner_email,
            },
            id: row.id,
            title: row.title,
            caption: row.caption,
            photo_url: row.photo_url,
            user_id: row.user_id,
            timestamps: Timestamps {
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
        }
    }
}

#[derive(Clone, Debug)]
pub struct PhotoRepo {
    pool: PgPool,
}

impl PhotoRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Photo> for PhotoRepo {
    async fn list(&self, owner_id: Option<&str>) -> RepoResult<Vec<PhotoListing>> {
        let rows = sqlx::query_as::<_, PhotoListingRow>(
            r#"
            SELECT
                p.id, p.title, p.caption, p.photo_url, p.user_id, p.created_at, p.updated_at,
                u.username AS owner_username,
                u.email AS owner_email
            FROM photos p
            JOIN users u ON u.id = p.user_id
            WHERE $1::VARCHAR IS NULL OR p.user_id = $1
            ORDER BY p.created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, photo: &Photo) -> RepoResult<Photo> {
        let row = sqlx::query_as::<_, PhotoRow>(
            r#"
            INSERT INTO photos (id, title, caption, photo_url, user_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, title, caption, photo_url, user_id, created_at, updated_at
            "#,
        )
        .bind(&photo.id)
        .bind(&photo.title)
        .bind(&photo.caption)
        .bind(&photo.photo_url)
        .bind(&photo.user_id)
        .bind(photo.timestamps.created_at)
        .bind(photo.timestamps.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row.into())
    }

    async fn get(&self, id: &str) -> RepoResult<Option<Photo>> {
        let row = sqlx::query_as::<_, PhotoRow>(
            r#"
            SELECT id, title, caption, photo_url, user_id, created_at, updated_at
            FROM photos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row.map(Into::into))
    }

    async fn update(&self, photo: &Photo) -> RepoResult<Option<Photo>> {
        let row = sqlx::query_as::<_, PhotoRow>(
            r#"
            UPDATE photos
            SET title = $2, caption = $3, photo_url = $4, updated_at = $5
            WHERE id = $1
            RETURNING id, title, caption, photo_url, user_id, created_at, updated_at
            "#,
        )
        .bind(&photo.id)
        .bind(&photo.title)
        .bind(&photo.caption)
        .bind(&photo.photo_url)
        .bind(photo.timestamps.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row.map(Into::into))
    }

    async fn delete(&self, id: &str) -> RepoResult<bool> {
        // comments on this photo go through ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM photos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(RepoError::from_sqlx)?;

        Ok(result.rows_affected() > 0)
    }
}

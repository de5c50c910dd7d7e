use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{SocialMedia, SocialMediaListing, SocialMediaPatch};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateSocialMediaRequest {
    pub name: String,
    pub social_media_url: String,
}

impl CreateSocialMediaRequest {
    pub fn into_social_media(self, user_id: &str) -> SocialMedia {
        SocialMedia::new(user_id, self.name, self.social_media_url)
    }
}

#[derive(Debug, Serialize)]
pub struct SocialMediaCreatedResponse {
    pub id: String,
    pub name: String,
    pub social_media_url: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<SocialMedia> for SocialMediaCreatedResponse {
    fn from(link: SocialMedia) -> Self {
        Self {
            id: link.id,
            name: link.name,
            social_media_url: link.social_media_url,
            user_id: link.user_id,
            created_at: link.timestamps.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateSocialMediaRequest {
    pub name: Option<String>,
    pub social_media_url: Option<String>,
}

impl From<UpdateSocialMediaRequest> for SocialMediaPatch {
    fn from(req: UpdateSocialMediaRequest) -> Self {
        SocialMediaPatch {
            name: req.name,
            social_media_url: req.social_media_url,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SocialMediaUpdatedResponse {
    pub id: String,
    pub name: String,
    pub social_media_url: String,
    pub user_id: String,
    pub updated_at: DateTime<Utc>,
}

impl From<SocialMedia> for SocialMediaUpdatedResponse {
    fn from(link: SocialMedia) -> Self {
        Self {
            id: link.id,
            name: link.name,
            social_media_url: link.social_media_url,
            user_id: link.user_id,
            updated_at: link.timestamps.updated_at,
        }
    }
}

/// Listing body: `{"social_medias": [...]}`.
#[derive(Debug, Serialize)]
pub struct SocialMediaListResponse {
    pub social_medias: Vec<SocialMediaListing>,
}

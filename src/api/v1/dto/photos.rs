use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Photo, PhotoPatch};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreatePhotoRequest {
    pub title: String,
    pub caption: String,
    pub photo_url: String,
}

impl CreatePhotoRequest {
    pub fn into_photo(self, user_id: &str) -> Photo {
        Photo::new(user_id, self.title, self.caption, self.photo_url)
    }
}

#[derive(Debug, Serialize)]
pub struct PhotoCreatedResponse {
    pub id: String,
    pub title: String,
    pub caption: String,
    pub photo_url: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<Photo> for PhotoCreatedResponse {
    fn from(photo: Photo) -> Self {
        Self {
            id: photo.id,
            title: photo.title,
            caption: photo.caption,
            photo_url: photo.photo_url,
            user_id: photo.user_id,
            created_at: photo.timestamps.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdatePhotoRequest {
    pub title: Option<String>,
    pub caption: Option<String>,
    pub photo_url: Option<String>,
}

impl From<UpdatePhotoRequest> for PhotoPatch {
    fn from(req: UpdatePhotoRequest) -> Self {
        PhotoPatch {
            title: req.title,
            caption: req.caption,
            photo_url: req.photo_url,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PhotoUpdatedResponse {
    pub id: String,
    pub title: String,
    pub caption: String,
    pub photo_url: String,
    pub user_id: String,
    pub updated_at: DateTime<Utc>,
}

impl From<Photo> for PhotoUpdatedResponse {
    fn from(photo: Photo) -> Self {
        Self {
            id: photo.id,
            title: photo.title,
            caption: photo.caption,
            photo_url: photo.photo_url,
            user_id: photo.user_id,
            updated_at: photo.timestamps.updated_at,
        }
    }
}

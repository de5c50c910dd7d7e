use serde::Serialize;

use crate::models::{Resource, Timestamps, UserSummary, max_chars, merge, require, require_url};
use crate::services::error::ServiceResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    pub id: String,
    pub title: String,
    pub caption: String,
    pub photo_url: String,
    pub user_id: String,
    pub timestamps: Timestamps,
}

impl Photo {
    pub fn new(
        user_id: impl Into<String>,
        title: impl Into<String>,
        caption: impl Into<String>,
        photo_url: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            title: title.into(),
            caption: caption.into(),
            photo_url: photo_url.into(),
            user_id: user_id.into(),
            timestamps: Timestamps::default(),
        }
    }
}

/// Photo with its owner's public fields, as returned by `Fetch`.
#[derive(Debug, Clone, Serialize)]
pub struct PhotoListing {
    pub id: String,
    pub title: String,
    pub caption: String,
    pub photo_url: String,
    pub user_id: String,
    #[serde(flatten)]
    pub timestamps: Timestamps,
    pub user: UserSummary,
}

/// Parent photo fields embedded in comment listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhotoSummary {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub photo_url: String,
    pub caption: String,
}

#[derive(Debug, Default)]
pub struct PhotoPatch {
    pub title: Option<String>,
    pub caption: Option<String>,
    pub photo_url: Option<String>,
}

impl Resource for Photo {
    const KIND: &'static str = "photo";
    const LABEL: &'static str = "photo";

    type Listing = PhotoListing;
    type Patch = PhotoPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn owner_id(&self) -> &str {
        &self.user_id
    }

    fn assign_id(&mut self, id: String) {
        self.id = id;
    }

    fn timestamps_mut(&mut self) -> &mut Timestamps {
        &mut self.timestamps
    }

    fn validate(&self) -> ServiceResult<()> {
        require(&self.title, "title")?;
        max_chars(&self.title, "title", 50)?;
        require_url(&self.photo_url, "photo_url")?;
        require(&self.user_id, "user_id")
    }

    fn apply(&mut self, patch: PhotoPatch) {
        merge(&mut self.title, patch.title);
        merge(&mut self.caption, patch.caption);
        merge(&mut self.photo_url, patch.photo_url);
    }
}

use serde::Serialize;

use crate::models::{Resource, Timestamps, UserProfile, max_chars, merge, require, require_url};
use crate::services::error::ServiceResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialMedia {
    pub id: String,
    pub name: String,
    pub social_media_url: String,
    pub user_id: String,
    pub timestamps: Timestamps,
}

impl SocialMedia {
    pub fn new(
        user_id: impl Into<String>,
        name: impl Into<String>,
        social_media_url: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            social_media_url: social_media_url.into(),
            user_id: user_id.into(),
            timestamps: Timestamps::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SocialMediaListing {
    pub id: String,
    pub name: String,
    pub social_media_url: String,
    pub user_id: String,
    #[serde(flatten)]
    pub timestamps: Timestamps,
    pub user: UserProfile,
}

#[derive(Debug, Default)]
pub struct SocialMediaPatch {
    pub name: Option<String>,
    pub social_media_url: Option<String>,
}

impl Resource for SocialMedia {
    const KIND: &'static str = "socialmedia";
    const LABEL: &'static str = "social media";

    type Listing = SocialMediaListing;
    type Patch = SocialMediaPatch;

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
        require(&self.name, "name")?;
        max_chars(&self.name, "name", 50)?;
        require_url(&self.social_media_url, "social_media_url")?;
        require(&self.user_id, "user_id")
    }

    fn apply(&mut self, patch: SocialMediaPatch) {
        merge(&mut self.name, patch.name);
        merge(&mut self.social_media_url, patch.social_media_url);
    }
}

use serde::Serialize;

use crate::models::{Photo, PhotoSummary, Resource, Timestamps, UserProfile, merge, require};
use crate::services::error::ServiceResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: String,
    pub user_id: String,
    pub photo_id: String,
    pub message: String,
    pub timestamps: Timestamps,
}

impl Comment {
    pub fn new(
        user_id: impl Into<String>,
        photo_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            user_id: user_id.into(),
            photo_id: photo_id.into(),
            message: message.into(),
            timestamps: Timestamps::default(),
        }
    }
}

/// Comment with its author and parent photo, as returned by `Fetch`.
#[derive(Debug, Clone, Serialize)]
pub struct CommentListing {
    pub id: String,
    pub user_id: String,
    pub photo_id: String,
    pub message: String,
    #[serde(flatten)]
    pub timestamps: Timestamps,
    pub user: UserProfile,
    pub photo: PhotoSummary,
}

#[derive(Debug, Default)]
pub struct CommentPatch {
    pub message: Option<String>,
}

impl Resource for Comment {
    const KIND: &'static str = "comment";
    const LABEL: &'static str = "comment";

    type Listing = CommentListing;
    type Patch = CommentPatch;

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
        require(&self.message, "message")?;
        require(&self.photo_id, "photo_id")?;
        require(&self.user_id, "user_id")
    }

    fn apply(&mut self, patch: CommentPatch) {
        merge(&mut self.message, patch.message);
    }

    fn dangling_reference(&self, constraint: &str) -> (&'static str, String) {
        if constraint.contains("photo") {
            (Photo::LABEL, self.photo_id.clone())
        } else {
            ("user", self.user_id.clone())
        }
    }
}

/*
 * Responsibility
 * - request/response DTO (resource 種別ごとに 1 module)
 * - request は欠けた field を空として受け、validation は model 側で行う
 */
use serde::Serialize;

pub mod comments;
pub mod photos;
pub mod social_medias;
pub mod users;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn deleted(label: &str) -> Self {
        Self {
            message: format!("your {label} has been successfully deleted"),
        }
    }
}

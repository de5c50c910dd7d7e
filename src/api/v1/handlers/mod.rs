pub mod comments;
pub mod health;
pub mod photos;
pub mod social_medias;
pub mod users;

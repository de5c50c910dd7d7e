/// Factory: build `TokenCodec` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::TokenCodec;

pub fn build_token_codec(config: &Config) -> Arc<TokenCodec> {
    Arc::new(TokenCodec::new(
        config.jwt_secret.as_bytes(),
        config.token_ttl_seconds,
    ))
}

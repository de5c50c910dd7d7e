pub mod factory;
pub mod login;
pub mod password;
pub mod token;

pub use factory::build_token_codec;
pub use login::LoginService;
pub use password::Passwords;
pub use token::{AuthError, TokenClaims, TokenCodec};

//! Domain entities

mod refresh_token;
mod user;

pub use refresh_token::{
    generate_refresh_token, RefreshToken, RefreshTokenState, REFRESH_TOKEN_BYTES,
    REFRESH_TOKEN_LEN,
};
pub use user::User;

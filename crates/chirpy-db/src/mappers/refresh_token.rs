//! Refresh token model -> entity mapper

use chirpy_core::{RefreshToken, UserId};

use crate::models::RefreshTokenModel;

impl From<RefreshTokenModel> for RefreshToken {
    fn from(model: RefreshTokenModel) -> Self {
        RefreshToken {
            token: model.token,
            user_id: UserId::new(model.user_id),
            created_at: model.created_at,
            updated_at: model.updated_at,
            expires_at: model.expires_at,
            revoked_at: model.revoked_at,
        }
    }
}

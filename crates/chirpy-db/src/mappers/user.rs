//! User model -> entity mapper

use chirpy_core::{User, UserId};

use crate::models::UserModel;

/// Convert UserModel to User entity
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: UserId::new(model.id),
            email: model.email,
            is_chirpy_red: model.is_chirpy_red,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

//! User entity <-> model mapper

use feed_core::entities::User;
use feed_core::value_objects::EntityId;

use crate::models::UserModel;

/// Convert UserModel to User entity
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: EntityId::new(model.id),
            username: model.username,
            name: model.name,
            surname: model.surname,
            created_at: model.created_at,
        }
    }
}

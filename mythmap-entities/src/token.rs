use crate::{id::Id, time::Timestamp};

/// Opaque key that authenticates API requests of a user.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthToken {
    pub key        : String,
    pub user_id    : Id,
    pub created_at : Timestamp,
}

impl AuthToken {
    pub fn generate(user_id: Id) -> Self {
        Self {
            key: uuid::Uuid::new_v4().simple().to_string(),
            user_id,
            created_at: Timestamp::now(),
        }
    }
}

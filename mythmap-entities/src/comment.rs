use crate::{id::*, moderation::*, time::*};

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id         : Id,
    pub place_id   : Id,
    pub user_id    : Id,
    pub text       : String,
    pub moderation : Moderation,
    pub created_at : Timestamp,
    pub updated_at : Timestamp,
}

impl Comment {
    pub fn is_owned_by(&self, user_id: &Id) -> bool {
        &self.user_id == user_id
    }
}

use crate::{id::*, moderation::*, rating::*, time::*};

/// A note (review) of a user about a place.
///
/// There is at most one note per place and user.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id         : Id,
    pub place_id   : Id,
    pub user_id    : Id,
    pub text       : String,
    pub rating     : Option<RatingValue>,
    pub moderation : Moderation,
    pub created_at : Timestamp,
    pub updated_at : Timestamp,
}

impl Note {
    pub fn is_owned_by(&self, user_id: &Id) -> bool {
        &self.user_id == user_id
    }

    /// Only approved notes count towards the rating of a place.
    pub fn effective_rating(&self) -> Option<RatingValue> {
        self.rating.filter(|_| self.moderation.is_approved())
    }
}

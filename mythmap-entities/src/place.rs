use crate::{geo::*, id::*, moderation::*, rating::*, time::*};

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub id          : Id,
    pub name        : String,
    pub description : String,
    pub pos         : MapPoint,
    pub categories  : Option<String>,
    pub moderation  : Moderation,
    pub owner       : Id,
    pub created_at  : Timestamp,
    pub updated_at  : Timestamp,
    // Derived from all approved and rated notes
    pub rating      : RatingSummary,
    // Number of approved notes with or without rating
    pub notes_count : u64,
}

impl Place {
    pub const fn max_name_len() -> usize {
        255
    }

    pub fn is_owned_by(&self, user_id: &Id) -> bool {
        &self.owner == user_id
    }
}

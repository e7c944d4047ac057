use num_derive::{FromPrimitive, ToPrimitive};
use strum::{AsRefStr, Display, EnumString};

use crate::{id::Id, password::Password};

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id       : Id,
    pub username : String,
    pub email    : Option<String>,
    pub password : Password,
    pub role     : Role,
}

impl User {
    pub const fn max_username_len() -> usize {
        150
    }

    /// Letters, digits and `@.+-_` are allowed.
    pub fn is_valid_username(username: &str) -> bool {
        let len = username.chars().count();
        len > 0
            && len <= Self::max_username_len()
            && username
                .chars()
                .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
    }

    pub fn can_moderate(&self) -> bool {
        self.role.can_moderate()
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[rustfmt::skip]
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
    FromPrimitive, ToPrimitive, EnumString, AsRefStr, Display,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Role {
    #[default]
    User      = 1,
    Moderator = 2,
    Admin     = 3,
}

impl Role {
    pub fn can_moderate(self) -> bool {
        self >= Role::Moderator
    }
}

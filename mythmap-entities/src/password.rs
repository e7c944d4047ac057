use std::{fmt, str::FromStr};
use thiserror::Error;

/// A bcrypt hashed password.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Password(String);

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("The password must contain at least {} characters", Password::min_len())]
    TooShort,
    #[error(transparent)]
    Hash(#[from] pwhash::error::Error),
}

impl Password {
    pub const fn min_len() -> usize {
        6
    }

    /// Wrap an already hashed password, e.g. when loading it from storage.
    pub fn from_hash(hash: String) -> Self {
        Self(hash)
    }

    pub fn verify(&self, password: &str) -> bool {
        pwhash::bcrypt::verify(password, &self.0)
    }
}

impl From<Password> for String {
    fn from(from: Password) -> Self {
        from.0
    }
}

impl AsRef<str> for Password {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Password {
    type Err = ParseError;

    fn from_str(password: &str) -> Result<Self, Self::Err> {
        if password.chars().count() < Password::min_len() {
            return Err(ParseError::TooShort);
        }
        let res = Self(pwhash::bcrypt::hash(password)?);
        debug_assert!(res.verify(password));
        Ok(res)
    }
}

impl fmt::Display for Password {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", self.0)
    }
}

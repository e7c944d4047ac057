// Low-level database access traits.
// Each repository is responsible for a single entity and
// its relationships. Related entities are only referenced
// by their id and never modified or loaded by another
// repository.

use std::{io, str::FromStr};

use strum::EnumString;
use thiserror::Error;

use crate::entities::*;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The requested object could not be found")]
    NotFound,
    #[error("The object already exists")]
    AlreadyExists,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

type Result<T> = std::result::Result<T, Error>;

#[derive(Clone, Debug, Copy, Default, PartialEq, Eq, Hash)]
pub struct Pagination {
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// A sort field with direction, parsed from `field` or `-field`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SortOrder<F> {
    pub field: F,
    pub direction: SortDirection,
}

impl<F> SortOrder<F> {
    pub const fn asc(field: F) -> Self {
        Self {
            field,
            direction: SortDirection::Ascending,
        }
    }

    pub const fn desc(field: F) -> Self {
        Self {
            field,
            direction: SortDirection::Descending,
        }
    }
}

#[derive(Debug, Error)]
#[error("Invalid sort order: {0}")]
pub struct SortOrderParseError(String);

impl<F: FromStr> FromStr for SortOrder<F> {
    type Err = SortOrderParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        let (field, direction) = match s.strip_prefix('-') {
            Some(field) => (field, SortDirection::Descending),
            None => (s, SortDirection::Ascending),
        };
        let field = field
            .parse()
            .map_err(|_| SortOrderParseError(s.to_owned()))?;
        Ok(Self { field, direction })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum PlaceSortField {
    #[default]
    Name,
    CreatedAt,
    UpdatedAt,
    AvgRating,
    RatingCount,
    NotesCount,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum NoteSortField {
    #[default]
    CreatedAt,
    UpdatedAt,
    Rating,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum CommentSortField {
    #[default]
    CreatedAt,
    UpdatedAt,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlaceQuery {
    /// Case-insensitive substring of the name
    pub name: Option<String>,
    /// Case-insensitive substring of the categories
    pub categories: Option<String>,
    /// Case-insensitive substring of name, description or categories
    pub search: Option<String>,
    pub owner: Option<Id>,
    /// Only places that have been marked as favorite by this user
    pub favorite_of: Option<Id>,
    /// Include places only if their status matches one of the given
    /// values. An empty list matches nothing.
    pub status: Vec<ModerationStatus>,
    pub bbox: Option<MapBbox>,
    pub order: SortOrder<PlaceSortField>,
    pub pagination: Pagination,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NoteQuery {
    pub place_id: Option<Id>,
    pub user_id: Option<Id>,
    pub text: Option<String>,
    pub search: Option<String>,
    /// An empty list matches nothing
    pub status: Vec<ModerationStatus>,
    pub rating_min: Option<RatingValue>,
    pub rating_max: Option<RatingValue>,
    pub order: SortOrder<NoteSortField>,
    pub pagination: Pagination,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommentQuery {
    pub place_id: Option<Id>,
    pub user_id: Option<Id>,
    pub text: Option<String>,
    pub search: Option<String>,
    /// An empty list matches nothing
    pub status: Vec<ModerationStatus>,
    pub order: SortOrder<CommentSortField>,
    pub pagination: Pagination,
}

pub trait PlaceRepo {
    fn create_place(&self, place: &Place) -> Result<()>;
    fn update_place(&self, place: &Place) -> Result<()>;
    // Deletes all notes, comments, images and favorites of the place
    fn delete_place(&self, id: &str) -> Result<()>;

    fn get_place(&self, id: &str) -> Result<Place>;
    fn query_places(&self, query: &PlaceQuery) -> Result<Vec<Place>>;
    fn count_places(&self) -> Result<usize>;

    fn update_place_rating(
        &self,
        id: &str,
        rating: &RatingSummary,
        notes_count: u64,
    ) -> Result<()>;
}

pub trait FavoriteRepo {
    fn is_favorite(&self, place_id: &str, user_id: &str) -> Result<bool>;
    fn add_favorite(&self, place_id: &str, user_id: &str) -> Result<()>;
    // Ok(false) => The place was not a favorite of the user
    fn remove_favorite(&self, place_id: &str, user_id: &str) -> Result<bool>;
}

pub trait NoteRepo {
    // Fails with `AlreadyExists` if the user already has a note for the place
    fn create_note(&self, note: &Note) -> Result<()>;
    fn update_note(&self, note: &Note) -> Result<()>;
    fn delete_note(&self, id: &str) -> Result<()>;

    fn get_note(&self, id: &str) -> Result<Note>;
    fn try_get_note_of_user(&self, place_id: &str, user_id: &str) -> Result<Option<Note>>;
    fn query_notes(&self, query: &NoteQuery) -> Result<Vec<Note>>;
    fn load_notes_of_place(&self, place_id: &str) -> Result<Vec<Note>>;
}

pub trait CommentRepo {
    fn create_comment(&self, comment: &Comment) -> Result<()>;
    fn update_comment(&self, comment: &Comment) -> Result<()>;
    fn delete_comment(&self, id: &str) -> Result<()>;

    fn get_comment(&self, id: &str) -> Result<Comment>;
    fn query_comments(&self, query: &CommentQuery) -> Result<Vec<Comment>>;
}

pub trait ImageRepo {
    fn create_image(&self, image: &Image) -> Result<()>;
    fn delete_image(&self, id: &str) -> Result<()>;

    fn get_image(&self, id: &str) -> Result<Image>;
    fn load_images(&self, parent: &ImageParent) -> Result<Vec<Image>>;
}

pub trait UserRepo {
    fn create_user(&self, user: &User) -> Result<()>;
    fn update_user(&self, user: &User) -> Result<()>;

    fn get_user(&self, id: &str) -> Result<User>;
    fn get_users(&self, ids: &[&str]) -> Result<Vec<User>>;
    fn try_get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    fn count_users(&self) -> Result<usize>;
}

pub trait AuthTokenRepo {
    fn create_auth_token(&self, token: &AuthToken) -> Result<()>;
    fn get_auth_token(&self, key: &str) -> Result<AuthToken>;
    fn try_get_auth_token_of_user(&self, user_id: &str) -> Result<Option<AuthToken>>;
    fn delete_auth_tokens_of_user(&self, user_id: &str) -> Result<usize>;
}

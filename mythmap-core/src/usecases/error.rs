use crate::{authorization, repositories};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Authentication credentials were not provided.")]
    Unauthorized,
    #[error("Invalid token.")]
    TokenInvalid,
    #[error("You do not have permission to perform this action.")]
    Forbidden,
    #[error("Unable to log in with provided credentials.")]
    Credentials,
    #[error("The name must contain between 1 and 255 characters.")]
    Name,
    #[error("The description must not be empty.")]
    Description,
    #[error("The categories must not exceed 255 characters.")]
    Categories,
    #[error("The text must not be empty.")]
    EmptyText,
    #[error("The rating must be an integer between 1 and 5.")]
    RatingValue,
    #[error("Invalid location.")]
    InvalidPosition,
    #[error("Parameters 'lat' and 'lon' are required.")]
    MissingCoordinates,
    #[error("Invalid values for 'lat' or 'lon'.")]
    InvalidCoordinates,
    #[error("Invalid value for 'radius_km'.")]
    InvalidRadius,
    #[error("The place does not exist.")]
    PlaceNotAvailable,
    #[error("You have already written a note for this place.")]
    NoteExists,
    #[error("A user with that username already exists.")]
    UserExists,
    #[error("The user does not exist.")]
    UserDoesNotExist,
    #[error("Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.")]
    Username,
    #[error("Enter a valid email address.")]
    Email,
    #[error("The password must contain at least 6 characters.")]
    Password,
    #[error("Invalid ordering: {0}")]
    Ordering(String),
    #[error("Invalid moderation status: {0}")]
    ModerationStatus(String),
    #[error("Unsupported media type: {0}")]
    ImageType(String),
    #[error("The uploaded image is empty.")]
    EmptyImage,
    #[error("Failed to store media file: {0}")]
    Media(std::io::Error),
    #[error(transparent)]
    Repo(#[from] repositories::Error),
}

impl From<mythmap_entities::password::ParseError> for Error {
    fn from(_: mythmap_entities::password::ParseError) -> Self {
        Self::Password
    }
}

impl From<repositories::SortOrderParseError> for Error {
    fn from(err: repositories::SortOrderParseError) -> Self {
        Self::Ordering(err.to_string())
    }
}

impl From<authorization::user::Error> for Error {
    fn from(_: authorization::user::Error) -> Self {
        Self::Forbidden
    }
}

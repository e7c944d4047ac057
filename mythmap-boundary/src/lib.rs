use serde::{Deserialize, Deserializer, Serialize};

#[cfg(feature = "entity-conversions")]
mod conv;

/// Distinguish between a missing field and an explicit `null`.
fn some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, thiserror::Error))]
#[cfg_attr(feature = "extra-derive", error("{message}"))]
pub struct Error {
    /// HTTP status code
    pub http_status: u16,
    /// Error message
    pub message: String,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(
    feature = "extra-derive",
    derive(Debug, Clone, Copy, PartialEq, Eq, Hash)
)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Moderator,
    Admin,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(
    feature = "extra-derive",
    derive(Debug, Clone, Copy, PartialEq, Eq, Hash)
)]
#[serde(rename_all = "lowercase")]
pub enum ModerationStatus {
    Pending,
    Approved,
    Rejected,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct UserInfo {
    pub id       : String,
    pub username : String,
    pub role     : UserRole,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct Image {
    pub id: String,
    pub url: String,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct Place {
    pub id                : String,
    pub name              : String,
    pub description       : String,
    pub lat               : f64,
    pub lon               : f64,
    pub categories        : Option<String>,
    pub status            : ModerationStatus,
    pub rejection_reason  : Option<String>,
    pub owner             : UserInfo,
    pub created_at        : String,
    pub updated_at        : String,
    pub notes_count       : u64,
    /// Rounded to one decimal, `null` without any rating
    pub avg_rating        : Option<f64>,
    /// Rounded to two decimals
    pub average_rating    : f64,
    pub rating_count      : u64,
    pub is_favorite       : bool,
    pub current_user_note : Option<Note>,
    pub images            : Vec<Image>,
    /// Distance in meters, only for nearby searches
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub distance          : Option<f64>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct NewPlace {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub categories: Option<String>,
}

#[derive(Default, Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct PlacePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
    #[serde(
        default,
        deserialize_with = "some",
        skip_serializing_if = "Option::is_none"
    )]
    pub categories: Option<Option<String>>,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct Note {
    pub id                : String,
    pub place             : String,
    pub user              : UserInfo,
    pub author_username   : String,
    pub text              : String,
    pub rating            : Option<u8>,
    pub moderation_status : ModerationStatus,
    pub rejection_reason  : Option<String>,
    pub images            : Vec<Image>,
    pub created_at        : String,
    pub updated_at        : String,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct NewNote {
    pub place: String,
    pub text: String,
    #[serde(default)]
    pub rating: Option<i64>,
}

#[derive(Default, Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct NotePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// `null` removes the rating
    #[serde(
        default,
        deserialize_with = "some",
        skip_serializing_if = "Option::is_none"
    )]
    pub rating: Option<Option<i64>>,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct Comment {
    pub id                : String,
    pub place             : String,
    pub user              : UserInfo,
    pub author_username   : String,
    pub text              : String,
    pub moderation_status : ModerationStatus,
    pub rejection_reason  : Option<String>,
    pub created_at        : String,
    pub updated_at        : String,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct NewComment {
    pub place: String,
    pub text: String,
}

#[derive(Default, Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct CommentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Default, Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct Rejection {
    #[serde(default)]
    pub reason: Option<String>,
}

/// Outcome of an approve or reject action, e.g. `"place approved"`.
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq, Eq))]
pub struct ModerationResult {
    pub status: String,
    pub id: String,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq, Eq))]
pub struct StatusMessage {
    pub status: String,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct Registration {
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    pub password: String,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq, Eq))]
pub struct Registered {
    pub user_id  : String,
    pub username : String,
    pub email    : Option<String>,
    pub token    : String,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq, Eq))]
pub struct LoggedIn {
    pub token    : String,
    pub user_id  : String,
    pub email    : Option<String>,
    pub username : String,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct Profile {
    pub id           : String,
    pub username     : String,
    pub email        : Option<String>,
    pub role         : UserRole,
    pub is_moderator : bool,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct RoleChange {
    pub role: UserRole,
}

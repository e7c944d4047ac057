#![allow(clippy::extra_unused_lifetimes)]

// NOTE:
// All timestamps with the `_at` postfix are stored
// as unix timestamp in **milli**seconds.

use super::schema::*;

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(treat_none_as_null = true)]
pub struct NewUser<'a> {
    pub id: &'a str,
    pub username: &'a str,
    pub email: Option<&'a str>,
    pub password: &'a str,
    pub role: i16,
}

#[derive(Queryable)]
pub struct UserEntity {
    pub id: String,
    pub username: String,
    pub email: Option<String>,
    pub password: String,
    pub role: i16,
}

#[derive(Insertable, Queryable)]
#[diesel(table_name = auth_tokens)]
pub struct AuthTokenEntity {
    pub token: String,
    pub user_id: String,
    pub created_at: i64,
}

#[derive(Insertable)]
#[diesel(table_name = places)]
pub struct NewPlace<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub description: &'a str,
    pub lat: f64,
    pub lng: f64,
    pub categories: Option<&'a str>,
    pub status: i16,
    pub rejection_reason: Option<&'a str>,
    pub owner_id: &'a str,
    pub created_at: i64,
    pub updated_at: i64,
    pub avg_rating: f64,
    pub rating_count: i64,
    pub notes_count: i64,
}

/// All editable columns of a place.
///
/// The rating columns are only written by the
/// rating recalculation.
#[derive(AsChangeset)]
#[diesel(table_name = places)]
#[diesel(treat_none_as_null = true)]
pub struct PlaceChangeset<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub lat: f64,
    pub lng: f64,
    pub categories: Option<&'a str>,
    pub status: i16,
    pub rejection_reason: Option<&'a str>,
    pub updated_at: i64,
}

#[derive(Queryable)]
pub struct PlaceEntity {
    pub id: String,
    pub name: String,
    pub description: String,
    pub lat: f64,
    pub lng: f64,
    pub categories: Option<String>,
    pub status: i16,
    pub rejection_reason: Option<String>,
    pub owner_id: String,
    pub created_at: i64,
    pub updated_at: i64,
    pub avg_rating: f64,
    pub rating_count: i64,
    pub notes_count: i64,
}

#[derive(Insertable)]
#[diesel(table_name = place_favorites)]
pub struct NewFavorite<'a> {
    pub place_id: &'a str,
    pub user_id: &'a str,
}

#[derive(Insertable)]
#[diesel(table_name = notes)]
pub struct NewNote<'a> {
    pub id: &'a str,
    pub place_id: &'a str,
    pub user_id: &'a str,
    pub text: &'a str,
    pub rating: Option<i16>,
    pub status: i16,
    pub rejection_reason: Option<&'a str>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(AsChangeset)]
#[diesel(table_name = notes)]
#[diesel(treat_none_as_null = true)]
pub struct NoteChangeset<'a> {
    pub text: &'a str,
    pub rating: Option<i16>,
    pub status: i16,
    pub rejection_reason: Option<&'a str>,
    pub updated_at: i64,
}

#[derive(Queryable)]
pub struct NoteEntity {
    pub id: String,
    pub place_id: String,
    pub user_id: String,
    pub text: String,
    pub rating: Option<i16>,
    pub status: i16,
    pub rejection_reason: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Insertable)]
#[diesel(table_name = comments)]
pub struct NewComment<'a> {
    pub id: &'a str,
    pub place_id: &'a str,
    pub user_id: &'a str,
    pub text: &'a str,
    pub status: i16,
    pub rejection_reason: Option<&'a str>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(AsChangeset)]
#[diesel(table_name = comments)]
#[diesel(treat_none_as_null = true)]
pub struct CommentChangeset<'a> {
    pub text: &'a str,
    pub status: i16,
    pub rejection_reason: Option<&'a str>,
    pub updated_at: i64,
}

#[derive(Queryable)]
pub struct CommentEntity {
    pub id: String,
    pub place_id: String,
    pub user_id: String,
    pub text: String,
    pub status: i16,
    pub rejection_reason: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Insertable)]
#[diesel(table_name = place_images)]
pub struct NewPlaceImage<'a> {
    pub id: &'a str,
    pub place_id: &'a str,
    pub file_name: &'a str,
    pub content_type: &'a str,
    pub created_at: i64,
}

#[derive(Insertable)]
#[diesel(table_name = note_images)]
pub struct NewNoteImage<'a> {
    pub id: &'a str,
    pub note_id: &'a str,
    pub file_name: &'a str,
    pub content_type: &'a str,
    pub created_at: i64,
}

/// Row of either `place_images` or `note_images`
#[derive(Queryable)]
pub struct ImageEntity {
    pub id: String,
    pub parent_id: String,
    pub file_name: String,
    pub content_type: String,
    pub created_at: i64,
}

// NOTE:
// All timestamps with the `_at` postfix are stored
// as unix timestamp in **milli**seconds.

use anyhow::anyhow;
use diesel::{
    self,
    prelude::*,
    result::{DatabaseErrorKind, Error as DieselError},
};
use num_traits::{FromPrimitive as _, ToPrimitive as _};

use mythmap_core::{
    entities::*,
    repositories::{self as repo, *},
};

use super::*;

mod auth_token;
mod comment;
mod favorite;
mod image;
mod note;
mod place;
mod user;

type Result<T> = std::result::Result<T, repo::Error>;

pub fn from_diesel_err(err: DieselError) -> repo::Error {
    match err {
        DieselError::NotFound => repo::Error::NotFound,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            repo::Error::AlreadyExists
        }
        _ => repo::Error::Other(err.into()),
    }
}

/// Pattern for a case-insensitive substring match with `LIKE`.
///
/// SQLite only folds the case of ASCII characters.
fn contains_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn to_status_primitives(status: &[ModerationStatus]) -> Vec<ModerationStatusPrimitive> {
    status.iter().copied().map(Into::into).collect()
}

// SQLite does not support an OFFSET without a LIMIT
// <https://www.sqlite.org/lang_select.html>
fn limit_and_offset(pagination: &Pagination) -> Option<(i64, i64)> {
    let offset = pagination.offset.unwrap_or(0) as i64;
    match pagination.limit {
        Some(limit) => Some((limit.min(i64::MAX as u64) as i64, offset)),
        None if offset > 0 => Some((i64::MAX, offset)),
        None => None,
    }
}

fn load_moderation(
    status: ModerationStatusPrimitive,
    rejection_reason: Option<String>,
) -> Result<Moderation> {
    let status = ModerationStatus::try_from(status)
        .map_err(|err| repo::Error::Other(anyhow!("{err}")))?;
    Ok(Moderation {
        status,
        rejection_reason,
    })
}

fn load_rating(rating: Option<i16>) -> Result<Option<RatingValue>> {
    rating
        .map(|v| {
            RatingValue::try_from(i64::from(v))
                .map_err(|v| repo::Error::Other(anyhow!("Invalid rating value: {v}")))
        })
        .transpose()
}

fn load_role(role: i16) -> Result<Role> {
    Role::from_i16(role).ok_or_else(|| anyhow!("Invalid role: {role}").into())
}

fn load_place(row: models::PlaceEntity) -> Result<Place> {
    let models::PlaceEntity {
        id,
        name,
        description,
        lat,
        lng,
        categories,
        status,
        rejection_reason,
        owner_id,
        created_at,
        updated_at,
        avg_rating,
        rating_count,
        notes_count,
    } = row;
    Ok(Place {
        id: id.into(),
        name,
        description,
        pos: MapPoint::from_lat_lng_deg(lat, lng),
        categories,
        moderation: load_moderation(status, rejection_reason)?,
        owner: owner_id.into(),
        created_at: Timestamp::from_millis(created_at),
        updated_at: Timestamp::from_millis(updated_at),
        rating: RatingSummary {
            average: avg_rating.into(),
            count: rating_count.max(0) as u64,
        },
        notes_count: notes_count.max(0) as u64,
    })
}

fn load_note(row: models::NoteEntity) -> Result<Note> {
    let models::NoteEntity {
        id,
        place_id,
        user_id,
        text,
        rating,
        status,
        rejection_reason,
        created_at,
        updated_at,
    } = row;
    Ok(Note {
        id: id.into(),
        place_id: place_id.into(),
        user_id: user_id.into(),
        text,
        rating: load_rating(rating)?,
        moderation: load_moderation(status, rejection_reason)?,
        created_at: Timestamp::from_millis(created_at),
        updated_at: Timestamp::from_millis(updated_at),
    })
}

fn load_comment(row: models::CommentEntity) -> Result<Comment> {
    let models::CommentEntity {
        id,
        place_id,
        user_id,
        text,
        status,
        rejection_reason,
        created_at,
        updated_at,
    } = row;
    Ok(Comment {
        id: id.into(),
        place_id: place_id.into(),
        user_id: user_id.into(),
        text,
        moderation: load_moderation(status, rejection_reason)?,
        created_at: Timestamp::from_millis(created_at),
        updated_at: Timestamp::from_millis(updated_at),
    })
}

fn load_user(row: models::UserEntity) -> Result<User> {
    let models::UserEntity {
        id,
        username,
        email,
        password,
        role,
    } = row;
    Ok(User {
        id: id.into(),
        username,
        email,
        password: Password::from_hash(password),
        role: load_role(role)?,
    })
}

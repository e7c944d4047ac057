mod change_user_role;
mod comments;
mod create_note;
mod create_place;
mod create_user;
mod delete_note;
mod delete_place;
mod error;
mod favorites;
mod get_place;
mod images;
mod login;
mod moderate;
mod nearest_places;
mod query_notes;
mod query_places;
mod rating;
mod update_note;
mod update_place;


pub use self::{
    change_user_role::*, comments::*, create_note::*, create_place::*, create_user::*,
    delete_note::*, delete_place::*, error::Error, favorites::*, get_place::*, images::*,
    login::*, moderate::*, nearest_places::*, query_notes::*, query_places::*, rating::*,
    update_note::*, update_place::*,
};

mod prelude {
    pub use super::{error::Error, Authored};
    pub type Result<T> = std::result::Result<T, Error>;
    pub use crate::{db::*, entities::*, repositories::*, RepoError};
}
use self::prelude::*;

use crate::{
    authorization::user::{authorize_owner_or_admin, authorize_role},
    visibility,
};

/// Content together with the user who wrote it.
#[derive(Debug, Clone, PartialEq)]
pub struct Authored<T> {
    pub item: T,
    pub author: User,
}

pub(crate) fn authenticated(requester: Option<&User>) -> Result<&User> {
    requester.ok_or(Error::Unauthorized)
}

pub(crate) fn authorize_moderator(requester: Option<&User>) -> Result<&User> {
    let user = authenticated(requester)?;
    authorize_role(user, Role::Moderator)?;
    Ok(user)
}

pub(crate) fn authorize_modification(user: &User, owner: &Id) -> Result<()> {
    Ok(authorize_owner_or_admin(user, owner)?)
}

/// Invisible items are reported as missing.
pub(crate) fn ensure_visible(requester: Option<&User>, moderation: &Moderation) -> Result<()> {
    if visibility::is_visible(requester, moderation) {
        Ok(())
    } else {
        Err(Error::Repo(RepoError::NotFound))
    }
}

pub(crate) fn get_visible_place<R: PlaceRepo>(
    repo: &R,
    requester: Option<&User>,
    id: &str,
) -> Result<Place> {
    let place = repo.get_place(id)?;
    ensure_visible(requester, &place.moderation)?;
    Ok(place)
}

pub(crate) fn get_visible_note<R: NoteRepo>(
    repo: &R,
    requester: Option<&User>,
    id: &str,
) -> Result<Note> {
    let note = repo.get_note(id)?;
    ensure_visible(requester, &note.moderation)?;
    Ok(note)
}

/// Like [`ensure_visible`], but owners also reach their own items.
pub(crate) fn ensure_accessible(
    requester: Option<&User>,
    owner: &Id,
    moderation: &Moderation,
) -> Result<()> {
    if visibility::is_accessible(requester, owner, moderation) {
        Ok(())
    } else {
        Err(Error::Repo(RepoError::NotFound))
    }
}

pub(crate) fn get_accessible_place<R: PlaceRepo>(
    repo: &R,
    requester: Option<&User>,
    id: &str,
) -> Result<Place> {
    let place = repo.get_place(id)?;
    ensure_accessible(requester, &place.owner, &place.moderation)?;
    Ok(place)
}

pub(crate) fn get_accessible_note<R: NoteRepo>(
    repo: &R,
    requester: Option<&User>,
    id: &str,
) -> Result<Note> {
    let note = repo.get_note(id)?;
    ensure_accessible(requester, &note.user_id, &note.moderation)?;
    Ok(note)
}

/// Trimmed, non-empty text.
pub(crate) fn validate_text(text: &str) -> Result<String> {
    let text = text.trim();
    if text.is_empty() {
        return Err(Error::EmptyText);
    }
    Ok(text.to_owned())
}

pub(crate) fn parse_rating(rating: Option<i64>) -> Result<Option<RatingValue>> {
    rating
        .map(|v| RatingValue::try_from(v).map_err(|_| Error::RatingValue))
        .transpose()
}

/// Empty filter values are ignored.
pub(crate) fn non_empty(filter: Option<String>) -> Option<String> {
    filter
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
}

pub fn parse_statuses<S: AsRef<str>>(statuses: &[S]) -> Result<Vec<ModerationStatus>> {
    statuses
        .iter()
        .map(AsRef::as_ref)
        .filter(|s| !s.trim().is_empty())
        .map(|s| {
            s.trim()
                .parse()
                .map_err(|_| Error::ModerationStatus(s.to_owned()))
        })
        .collect()
}

pub(crate) fn load_authors<R: UserRepo>(repo: &R, user_ids: &[&Id]) -> Result<Vec<User>> {
    let ids: Vec<&str> = user_ids.iter().map(|id| id.as_str()).collect();
    Ok(repo.get_users(&ids)?)
}

pub(crate) fn with_authors<R, T, F>(
    repo: &R,
    items: Vec<T>,
    author_id: F,
) -> Result<Vec<Authored<T>>>
where
    R: UserRepo,
    F: Fn(&T) -> &Id,
{
    use itertools::Itertools as _;
    let ids: Vec<&Id> = items.iter().map(&author_id).unique().collect();
    let authors = load_authors(repo, &ids)?;
    items
        .into_iter()
        .map(|item| {
            let author = authors
                .iter()
                .find(|u| &u.id == author_id(&item))
                .cloned()
                .ok_or(Error::UserDoesNotExist)?;
            Ok(Authored { item, author })
        })
        .collect()
}

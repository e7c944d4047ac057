use super::{
    authenticated, authorize_moderator, get_visible_note, non_empty, prelude::*, with_authors,
};
use crate::visibility;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFilter {
    pub place_id: Option<Id>,
    pub user_id: Option<Id>,
    pub text: Option<String>,
    pub search: Option<String>,
    pub status: Vec<ModerationStatus>,
    pub rating_min: Option<i64>,
    pub rating_max: Option<i64>,
    pub order: Option<SortOrder<NoteSortField>>,
    pub pagination: Pagination,
}

pub fn get_note<R>(repo: &R, requester: Option<&User>, id: &str) -> Result<Authored<Note>>
where
    R: NoteRepo + UserRepo,
{
    authenticated(requester)?;
    let note = get_visible_note(repo, requester, id)?;
    let author = repo.get_user(note.user_id.as_str())?;
    Ok(Authored { item: note, author })
}

/// Newest notes first unless requested otherwise.
pub fn query_notes<R>(
    repo: &R,
    requester: Option<&User>,
    filter: NoteFilter,
) -> Result<Vec<Authored<Note>>>
where
    R: NoteRepo + UserRepo,
{
    authenticated(requester)?;
    let NoteFilter {
        place_id,
        user_id,
        text,
        search,
        status,
        rating_min,
        rating_max,
        order,
        pagination,
    } = filter;
    let (min, max) = (RatingValue::min(), RatingValue::max());
    if rating_min.is_some_and(|v| v > i64::from(max))
        || rating_max.is_some_and(|v| v < i64::from(min))
    {
        // Out of range
        return Ok(vec![]);
    }
    let rating_min = rating_min.and_then(|v| RatingValue::try_from(v).ok());
    let rating_max = rating_max.and_then(|v| RatingValue::try_from(v).ok());
    let permitted = visibility::listed_statuses(requester, user_id.as_ref());
    let query = NoteQuery {
        place_id,
        user_id,
        text: non_empty(text),
        search: non_empty(search),
        status: visibility::restrict_statuses(permitted, &status),
        rating_min,
        rating_max,
        order: order.unwrap_or(SortOrder::desc(NoteSortField::CreatedAt)),
        pagination,
    };
    load_notes(repo, &query)
}

/// Pending notes, oldest first.
pub fn note_moderation_queue<R>(
    repo: &R,
    requester: Option<&User>,
    pagination: Pagination,
) -> Result<Vec<Authored<Note>>>
where
    R: NoteRepo + UserRepo,
{
    authorize_moderator(requester)?;
    let query = NoteQuery {
        status: visibility::queued_statuses().to_vec(),
        order: SortOrder::asc(NoteSortField::CreatedAt),
        pagination,
        ..Default::default()
    };
    load_notes(repo, &query)
}

fn load_notes<R>(repo: &R, query: &NoteQuery) -> Result<Vec<Authored<Note>>>
where
    R: NoteRepo + UserRepo,
{
    if query.status.is_empty() {
        return Ok(vec![]);
    }
    let notes = repo.query_notes(query)?;
    with_authors(repo, notes, |n| &n.user_id)
}

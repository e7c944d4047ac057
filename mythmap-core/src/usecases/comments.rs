use super::{
    authenticated, authorize_moderator, authorize_modification, ensure_accessible, ensure_visible,
    get_visible_place,
    non_empty, prelude::*, validate_text, with_authors,
};
use crate::visibility;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub place_id: String,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentFilter {
    pub place_id: Option<Id>,
    pub user_id: Option<Id>,
    pub text: Option<String>,
    pub search: Option<String>,
    pub status: Vec<ModerationStatus>,
    pub order: Option<SortOrder<CommentSortField>>,
    pub pagination: Pagination,
}

fn get_visible_comment<R: CommentRepo>(
    repo: &R,
    requester: Option<&User>,
    id: &str,
) -> Result<Comment> {
    let comment = repo.get_comment(id)?;
    ensure_visible(requester, &comment.moderation)?;
    Ok(comment)
}

fn get_accessible_comment<R: CommentRepo>(
    repo: &R,
    requester: Option<&User>,
    id: &str,
) -> Result<Comment> {
    let comment = repo.get_comment(id)?;
    ensure_accessible(requester, &comment.user_id, &comment.moderation)?;
    Ok(comment)
}

pub fn create_comment<R>(
    repo: &R,
    requester: Option<&User>,
    new_comment: NewComment,
) -> Result<Comment>
where
    R: PlaceRepo + CommentRepo,
{
    let user = authenticated(requester)?;
    let NewComment { place_id, text } = new_comment;
    let place = match get_visible_place(repo, requester, &place_id) {
        Err(Error::Repo(RepoError::NotFound)) => return Err(Error::PlaceNotAvailable),
        res => res?,
    };
    let now = Timestamp::now();
    let comment = Comment {
        id: Id::new(),
        place_id: place.id,
        user_id: user.id.clone(),
        text: validate_text(&text)?,
        moderation: Moderation::pending(),
        created_at: now,
        updated_at: now,
    };
    repo.create_comment(&comment)?;
    Ok(comment)
}

pub fn get_comment<R>(repo: &R, requester: Option<&User>, id: &str) -> Result<Authored<Comment>>
where
    R: CommentRepo + UserRepo,
{
    authenticated(requester)?;
    let comment = get_visible_comment(repo, requester, id)?;
    let author = repo.get_user(comment.user_id.as_str())?;
    Ok(Authored {
        item: comment,
        author,
    })
}

pub fn update_comment<R: CommentRepo>(
    repo: &R,
    requester: Option<&User>,
    id: &str,
    text: Option<String>,
) -> Result<Comment> {
    let user = authenticated(requester)?;
    let mut comment = get_accessible_comment(repo, requester, id)?;
    authorize_modification(user, &comment.user_id)?;
    if let Some(text) = text {
        comment.text = validate_text(&text)?;
    }
    if comment.is_owned_by(&user.id) && comment.moderation.reset_after_owner_edit() {
        log::info!("Comment {} needs to be reviewed again", comment.id);
    }
    comment.updated_at = Timestamp::now();
    repo.update_comment(&comment)?;
    Ok(comment)
}

pub fn delete_comment<R: CommentRepo>(repo: &R, requester: Option<&User>, id: &str) -> Result<()> {
    let user = authenticated(requester)?;
    let comment = get_accessible_comment(repo, requester, id)?;
    authorize_modification(user, &comment.user_id)?;
    Ok(repo.delete_comment(comment.id.as_str())?)
}

/// Oldest comments first unless requested otherwise.
pub fn query_comments<R>(
    repo: &R,
    requester: Option<&User>,
    filter: CommentFilter,
) -> Result<Vec<Authored<Comment>>>
where
    R: CommentRepo + UserRepo,
{
    authenticated(requester)?;
    let CommentFilter {
        place_id,
        user_id,
        text,
        search,
        status,
        order,
        pagination,
    } = filter;
    let permitted = visibility::listed_statuses(requester, user_id.as_ref());
    let query = CommentQuery {
        place_id,
        user_id,
        text: non_empty(text),
        search: non_empty(search),
        status: visibility::restrict_statuses(permitted, &status),
        order: order.unwrap_or_default(),
        pagination,
    };
    load_comments(repo, &query)
}

/// Pending comments, oldest first.
pub fn comment_moderation_queue<R>(
    repo: &R,
    requester: Option<&User>,
    pagination: Pagination,
) -> Result<Vec<Authored<Comment>>>
where
    R: CommentRepo + UserRepo,
{
    authorize_moderator(requester)?;
    let query = CommentQuery {
        status: visibility::queued_statuses().to_vec(),
        order: SortOrder::asc(CommentSortField::CreatedAt),
        pagination,
        ..Default::default()
    };
    load_comments(repo, &query)
}

fn load_comments<R>(repo: &R, query: &CommentQuery) -> Result<Vec<Authored<Comment>>>
where
    R: CommentRepo + UserRepo,
{
    if query.status.is_empty() {
        return Ok(vec![]);
    }
    let comments = repo.query_comments(query)?;
    with_authors(repo, comments, |c| &c.user_id)
}

use rocket::FromForm;

use super::*;

#[derive(Debug, Default, FromForm)]
pub struct CommentParams {
    place: Option<String>,
    user: Option<String>,
    text: Option<String>,
    moderation_status: Vec<String>,
    search: Option<String>,
    ordering: Option<String>,
    offset: Option<u64>,
    limit: Option<u64>,
}

fn written_comment_json<R: UserRepo>(
    db: &R,
    comment: Comment,
) -> result::Result<json::Comment, ApiError> {
    let author = db.get_user(comment.user_id.as_str())?;
    Ok(to_json::comment(usecases::Authored {
        item: comment,
        author,
    }))
}

#[get("/comments?<params..>")]
pub fn get_comments(
    db: sqlite::Connections,
    auth: Auth,
    params: CommentParams,
) -> Result<Vec<json::Comment>> {
    let CommentParams {
        place,
        user,
        text,
        moderation_status,
        search,
        ordering,
        offset,
        limit,
    } = params;
    let filter = usecases::CommentFilter {
        place_id: place.filter(|p| !p.trim().is_empty()).map(Id::from),
        user_id: user.filter(|u| !u.trim().is_empty()).map(Id::from),
        text,
        search,
        status: usecases::parse_statuses(&split_values(&moderation_status))?,
        order: parse_order(ordering.as_deref())?,
        pagination: Pagination { offset, limit },
    };
    let db = db.shared()?;
    let requester = auth.user(&db)?;
    let comments = usecases::query_comments(&db, requester.as_ref(), filter)?;
    Ok(Json(comments.into_iter().map(to_json::comment).collect()))
}

#[get("/comments/<id>")]
pub fn get_comment(db: sqlite::Connections, auth: Auth, id: &str) -> Result<json::Comment> {
    let db = db.shared()?;
    let requester = auth.user(&db)?;
    let comment = usecases::get_comment(&db, requester.as_ref(), id)?;
    Ok(Json(to_json::comment(comment)))
}

#[post("/comments", format = "application/json", data = "<comment>")]
pub fn post_comment(
    db: sqlite::Connections,
    auth: Auth,
    comment: JsonResult<json::NewComment>,
) -> CreatedResult<json::Comment> {
    let new_comment = from_json::new_comment(comment?.into_inner());
    let requester = auth.user(&db.shared()?)?;
    let comment = flows::create_comment(&db, requester.as_ref(), new_comment)?;
    let comment = written_comment_json(&db.shared()?, comment)?;
    Ok((Status::Created, Json(comment)))
}

#[patch("/comments/<id>", format = "application/json", data = "<patch>")]
pub fn patch_comment(
    db: sqlite::Connections,
    auth: Auth,
    id: &str,
    patch: JsonResult<json::CommentPatch>,
) -> Result<json::Comment> {
    let json::CommentPatch { text } = patch?.into_inner();
    let requester = auth.user(&db.shared()?)?;
    let comment = flows::update_comment(&db, requester.as_ref(), id, text)?;
    Ok(Json(written_comment_json(&db.shared()?, comment)?))
}

#[delete("/comments/<id>")]
pub fn delete_comment(db: sqlite::Connections, auth: Auth, id: &str) -> StatusResult {
    let requester = auth.user(&db.shared()?)?;
    flows::delete_comment(&db, requester.as_ref(), id)?;
    Ok(Status::NoContent)
}

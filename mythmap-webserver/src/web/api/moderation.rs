use super::*;

use usecases::ModerationAction;

type ModerateFn = fn(
    &mythmap_db_sqlite::Connections,
    Option<&User>,
    &str,
    ModerationAction,
) -> mythmap_application::Result<usecases::Moderated>;

fn moderate(
    db: &sqlite::Connections,
    auth: &Auth,
    id: &str,
    action: ModerationAction,
    flow: ModerateFn,
) -> Result<json::ModerationResult> {
    let requester = auth.user(&db.shared()?)?;
    let moderated = flow(db, requester.as_ref(), id, action)?;
    Ok(Json(to_json::moderated(moderated)))
}

fn rejection(rejection: Option<Json<json::Rejection>>) -> ModerationAction {
    from_json::moderation_action(rejection.map(Json::into_inner))
}

#[patch("/places/<id>/approve")]
pub fn approve_place(
    db: sqlite::Connections,
    auth: Auth,
    id: &str,
) -> Result<json::ModerationResult> {
    moderate(&db, &auth, id, ModerationAction::Approve, flows::moderate_place)
}

#[patch("/places/<id>/reject", data = "<reason>")]
pub fn reject_place(
    db: sqlite::Connections,
    auth: Auth,
    id: &str,
    reason: Option<Json<json::Rejection>>,
) -> Result<json::ModerationResult> {
    moderate(&db, &auth, id, rejection(reason), flows::moderate_place)
}

#[patch("/notes/<id>/approve")]
pub fn approve_note(
    db: sqlite::Connections,
    auth: Auth,
    id: &str,
) -> Result<json::ModerationResult> {
    moderate(&db, &auth, id, ModerationAction::Approve, flows::moderate_note)
}

#[patch("/notes/<id>/reject", data = "<reason>")]
pub fn reject_note(
    db: sqlite::Connections,
    auth: Auth,
    id: &str,
    reason: Option<Json<json::Rejection>>,
) -> Result<json::ModerationResult> {
    moderate(&db, &auth, id, rejection(reason), flows::moderate_note)
}

#[patch("/comments/<id>/approve")]
pub fn approve_comment(
    db: sqlite::Connections,
    auth: Auth,
    id: &str,
) -> Result<json::ModerationResult> {
    moderate(&db, &auth, id, ModerationAction::Approve, flows::moderate_comment)
}

#[patch("/comments/<id>/reject", data = "<reason>")]
pub fn reject_comment(
    db: sqlite::Connections,
    auth: Auth,
    id: &str,
    reason: Option<Json<json::Rejection>>,
) -> Result<json::ModerationResult> {
    moderate(&db, &auth, id, rejection(reason), flows::moderate_comment)
}

#[get("/moderation/places?<offset>&<limit>")]
pub fn get_pending_places(
    db: sqlite::Connections,
    media: &State<Media>,
    auth: Auth,
    offset: Option<u64>,
    limit: Option<u64>,
) -> Result<Vec<json::Place>> {
    let db = db.shared()?;
    let requester = auth.user(&db)?;
    let places =
        usecases::place_moderation_queue(&db, requester.as_ref(), Pagination { offset, limit })?;
    Ok(Json(super::places::places_json(&db, &*media.0, places)?))
}

#[get("/moderation/notes?<offset>&<limit>")]
pub fn get_pending_notes(
    db: sqlite::Connections,
    media: &State<Media>,
    auth: Auth,
    offset: Option<u64>,
    limit: Option<u64>,
) -> Result<Vec<json::Note>> {
    let db = db.shared()?;
    let requester = auth.user(&db)?;
    let notes =
        usecases::note_moderation_queue(&db, requester.as_ref(), Pagination { offset, limit })?;
    let notes = notes
        .into_iter()
        .map(|note| super::notes::note_json(&db, &*media.0, note))
        .collect::<result::Result<_, _>>()?;
    Ok(Json(notes))
}

#[get("/moderation/comments?<offset>&<limit>")]
pub fn get_pending_comments(
    db: sqlite::Connections,
    auth: Auth,
    offset: Option<u64>,
    limit: Option<u64>,
) -> Result<Vec<json::Comment>> {
    let db = db.shared()?;
    let requester = auth.user(&db)?;
    let comments =
        usecases::comment_moderation_queue(&db, requester.as_ref(), Pagination { offset, limit })?;
    Ok(Json(comments.into_iter().map(to_json::comment).collect()))
}

use rocket::FromForm;

use super::*;

#[derive(Debug, Default, FromForm)]
pub struct NoteParams {
    place: Option<String>,
    user: Option<String>,
    text: Option<String>,
    moderation_status: Vec<String>,
    rating_min: Option<i64>,
    rating_max: Option<i64>,
    search: Option<String>,
    ordering: Option<String>,
    offset: Option<u64>,
    limit: Option<u64>,
}

fn id_param(param: Option<String>) -> Option<Id> {
    param.filter(|p| !p.trim().is_empty()).map(Id::from)
}

pub(super) fn note_json<R: ImageRepo>(
    db: &R,
    media: &dyn MediaStore,
    note: usecases::Authored<Note>,
) -> result::Result<json::Note, ApiError> {
    let images = db.load_images(&ImageParent::Note(note.item.id.clone()))?;
    Ok(to_json::note(note, &images, media))
}

fn written_note_json<R: ImageRepo + UserRepo>(
    db: &R,
    media: &dyn MediaStore,
    note: Note,
) -> result::Result<json::Note, ApiError> {
    let author = db.get_user(note.user_id.as_str())?;
    note_json(db, media, usecases::Authored { item: note, author })
}

#[get("/notes?<params..>")]
pub fn get_notes(
    db: sqlite::Connections,
    media: &State<Media>,
    auth: Auth,
    params: NoteParams,
) -> Result<Vec<json::Note>> {
    let NoteParams {
        place,
        user,
        text,
        moderation_status,
        rating_min,
        rating_max,
        search,
        ordering,
        offset,
        limit,
    } = params;
    let filter = usecases::NoteFilter {
        place_id: id_param(place),
        user_id: id_param(user),
        text,
        search,
        status: usecases::parse_statuses(&split_values(&moderation_status))?,
        rating_min,
        rating_max,
        order: parse_order(ordering.as_deref())?,
        pagination: Pagination { offset, limit },
    };
    let db = db.shared()?;
    let requester = auth.user(&db)?;
    let notes = usecases::query_notes(&db, requester.as_ref(), filter)?;
    let notes = notes
        .into_iter()
        .map(|note| note_json(&db, &*media.0, note))
        .collect::<result::Result<_, _>>()?;
    Ok(Json(notes))
}

#[get("/notes/<id>")]
pub fn get_note(
    db: sqlite::Connections,
    media: &State<Media>,
    auth: Auth,
    id: &str,
) -> Result<json::Note> {
    let db = db.shared()?;
    let requester = auth.user(&db)?;
    let note = usecases::get_note(&db, requester.as_ref(), id)?;
    Ok(Json(note_json(&db, &*media.0, note)?))
}

#[post("/notes", format = "application/json", data = "<note>")]
pub fn post_note(
    db: sqlite::Connections,
    media: &State<Media>,
    auth: Auth,
    note: JsonResult<json::NewNote>,
) -> CreatedResult<json::Note> {
    let new_note = from_json::new_note(note?.into_inner());
    let requester = auth.user(&db.shared()?)?;
    let note = flows::create_note(&db, requester.as_ref(), new_note)?;
    let note = written_note_json(&db.shared()?, &*media.0, note)?;
    Ok((Status::Created, Json(note)))
}

#[patch("/notes/<id>", format = "application/json", data = "<patch>")]
pub fn patch_note(
    db: sqlite::Connections,
    media: &State<Media>,
    auth: Auth,
    id: &str,
    patch: JsonResult<json::NotePatch>,
) -> Result<json::Note> {
    let patch = from_json::note_patch(patch?.into_inner());
    let requester = auth.user(&db.shared()?)?;
    let note = flows::update_note(&db, requester.as_ref(), id, patch)?;
    Ok(Json(written_note_json(&db.shared()?, &*media.0, note)?))
}

#[delete("/notes/<id>")]
pub fn delete_note(
    db: sqlite::Connections,
    media: &State<Media>,
    auth: Auth,
    id: &str,
) -> StatusResult {
    let requester = auth.user(&db.shared()?)?;
    flows::delete_note(&db, &*media.0, requester.as_ref(), id)?;
    Ok(Status::NoContent)
}

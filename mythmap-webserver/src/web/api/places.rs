use rocket::FromForm;

use super::*;

#[derive(Debug, Default, FromForm)]
pub struct PlaceParams {
    name: Option<String>,
    categories: Option<String>,
    status: Vec<String>,
    owner: Option<String>,
    search: Option<String>,
    ordering: Option<String>,
    offset: Option<u64>,
    limit: Option<u64>,
}

/// The current user's note is projected together with its images.
pub(super) fn place_json<R: ImageRepo>(
    db: &R,
    media: &dyn MediaStore,
    details: usecases::PlaceDetails,
) -> result::Result<json::Place, ApiError> {
    let note_images = match &details.current_user_note {
        Some(note) => db.load_images(&ImageParent::Note(note.item.id.clone()))?,
        None => vec![],
    };
    Ok(to_json::place(details, &note_images, media))
}

pub(super) fn places_json<R: ImageRepo>(
    db: &R,
    media: &dyn MediaStore,
    places: Vec<usecases::PlaceDetails>,
) -> result::Result<Vec<json::Place>, ApiError> {
    places
        .into_iter()
        .map(|details| place_json(db, media, details))
        .collect()
}

#[get("/places?<params..>")]
pub fn get_places(
    db: sqlite::Connections,
    media: &State<Media>,
    auth: Auth,
    params: PlaceParams,
) -> Result<Vec<json::Place>> {
    let PlaceParams {
        name,
        categories,
        status,
        owner,
        search,
        ordering,
        offset,
        limit,
    } = params;
    let filter = usecases::PlaceFilter {
        name,
        categories,
        status: usecases::parse_statuses(&split_values(&status))?,
        owner: owner.filter(|o| !o.trim().is_empty()).map(Id::from),
        search,
        order: parse_order(ordering.as_deref())?,
        pagination: Pagination { offset, limit },
    };
    let db = db.shared()?;
    let requester = auth.user(&db)?;
    let places = usecases::query_places(&db, requester.as_ref(), filter)?;
    Ok(Json(places_json(&db, &*media.0, places)?))
}

#[allow(clippy::too_many_arguments)]
#[get("/places/nearest?<lat>&<lon>&<radius_km>&<offset>&<limit>")]
pub fn get_nearest_places(
    db: sqlite::Connections,
    media: &State<Media>,
    auth: Auth,
    lat: Option<&str>,
    lon: Option<&str>,
    radius_km: Option<&str>,
    offset: Option<u64>,
    limit: Option<u64>,
) -> Result<Vec<json::Place>> {
    let nearby = usecases::parse_nearby_query(lat, lon, radius_km)?;
    let db = db.shared()?;
    let requester = auth.user(&db)?;
    let places = usecases::nearest_places(
        &db,
        requester.as_ref(),
        nearby,
        Pagination { offset, limit },
    )?;
    Ok(Json(places_json(&db, &*media.0, places)?))
}

#[get("/places/favorites?<offset>&<limit>")]
pub fn get_favorite_places(
    db: sqlite::Connections,
    media: &State<Media>,
    auth: Auth,
    offset: Option<u64>,
    limit: Option<u64>,
) -> Result<Vec<json::Place>> {
    let db = db.shared()?;
    let requester = auth.user(&db)?;
    let places =
        usecases::favorite_places(&db, requester.as_ref(), Pagination { offset, limit })?;
    Ok(Json(places_json(&db, &*media.0, places)?))
}

#[get("/places/<id>")]
pub fn get_place(
    db: sqlite::Connections,
    media: &State<Media>,
    auth: Auth,
    id: &str,
) -> Result<json::Place> {
    let db = db.shared()?;
    let requester = auth.user(&db)?;
    let details = usecases::get_place(&db, requester.as_ref(), id)?;
    Ok(Json(place_json(&db, &*media.0, details)?))
}

#[post("/places", format = "application/json", data = "<place>")]
pub fn post_place(
    db: sqlite::Connections,
    media: &State<Media>,
    auth: Auth,
    place: JsonResult<json::NewPlace>,
) -> CreatedResult<json::Place> {
    let new_place = from_json::new_place(place?.into_inner());
    let requester = auth.user(&db.shared()?)?;
    let place = flows::create_place(&db, requester.as_ref(), new_place)?;
    let db = db.shared()?;
    let details = usecases::place_details(&db, requester.as_ref(), place)?;
    Ok((Status::Created, Json(place_json(&db, &*media.0, details)?)))
}

#[patch("/places/<id>", format = "application/json", data = "<patch>")]
pub fn patch_place(
    db: sqlite::Connections,
    media: &State<Media>,
    auth: Auth,
    id: &str,
    patch: JsonResult<json::PlacePatch>,
) -> Result<json::Place> {
    let patch = from_json::place_patch(patch?.into_inner());
    let requester = auth.user(&db.shared()?)?;
    let place = flows::update_place(&db, requester.as_ref(), id, patch)?;
    let db = db.shared()?;
    let details = usecases::place_details(&db, requester.as_ref(), place)?;
    Ok(Json(place_json(&db, &*media.0, details)?))
}

#[delete("/places/<id>")]
pub fn delete_place(
    db: sqlite::Connections,
    media: &State<Media>,
    auth: Auth,
    id: &str,
) -> StatusResult {
    let requester = auth.user(&db.shared()?)?;
    flows::delete_place(&db, &*media.0, requester.as_ref(), id)?;
    Ok(Status::NoContent)
}

#[post("/places/<id>/toggle_favorite")]
pub fn post_toggle_favorite(
    db: sqlite::Connections,
    auth: Auth,
    id: &str,
) -> CreatedResult<json::StatusMessage> {
    let requester = auth.user(&db.shared()?)?;
    let toggled = flows::toggle_favorite(&db, requester.as_ref(), id)?;
    let status = match toggled {
        usecases::FavoriteToggled::Added => Status::Created,
        usecases::FavoriteToggled::Removed => Status::Ok,
    };
    Ok((status, Json(to_json::favorite_toggled(toggled))))
}

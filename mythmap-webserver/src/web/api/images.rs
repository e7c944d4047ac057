use anyhow::anyhow;
use rocket::{
    data::{Data, ToByteUnit},
    http::ContentType,
};

use super::*;
use crate::web::Cfg;

async fn read_image(data: Data<'_>, cfg: &Cfg) -> result::Result<Vec<u8>, ApiError> {
    let capped = data.open(cfg.max_image_size.bytes()).into_bytes().await?;
    if !capped.is_complete() {
        return Err(ApiError::OtherWithStatus(
            anyhow!("The uploaded image exceeds the limit of {} bytes.", cfg.max_image_size),
            Status::PayloadTooLarge,
        ));
    }
    Ok(capped.into_inner())
}

fn add_image(
    db: &sqlite::Connections,
    media: &Media,
    auth: &Auth,
    parent: ImageParent,
    content_type: Option<&ContentType>,
    data: &[u8],
) -> CreatedResult<json::Image> {
    let content_type = content_type.map(ToString::to_string).unwrap_or_default();
    let requester = auth.user(&db.shared()?)?;
    let image = flows::add_image(db, &*media.0, requester.as_ref(), parent, &content_type, data)?;
    Ok((Status::Created, Json(to_json::image(&image, &*media.0))))
}

fn delete_image(
    db: &sqlite::Connections,
    media: &Media,
    auth: &Auth,
    parent: ImageParent,
    image_id: &str,
) -> StatusResult {
    let requester = auth.user(&db.shared()?)?;
    flows::delete_image(db, &*media.0, requester.as_ref(), &parent, image_id)?;
    Ok(Status::NoContent)
}

#[allow(clippy::too_many_arguments)]
#[post("/places/<id>/images", data = "<data>")]
pub async fn post_place_image(
    db: sqlite::Connections,
    media: &State<Media>,
    cfg: &State<Cfg>,
    auth: Auth,
    id: &str,
    content_type: Option<&ContentType>,
    data: Data<'_>,
) -> CreatedResult<json::Image> {
    let data = read_image(data, cfg).await?;
    add_image(&db, media, &auth, ImageParent::Place(id.into()), content_type, &data)
}

#[delete("/places/<id>/images/<image_id>")]
pub fn delete_place_image(
    db: sqlite::Connections,
    media: &State<Media>,
    auth: Auth,
    id: &str,
    image_id: &str,
) -> StatusResult {
    delete_image(&db, media, &auth, ImageParent::Place(id.into()), image_id)
}

#[allow(clippy::too_many_arguments)]
#[post("/notes/<id>/images", data = "<data>")]
pub async fn post_note_image(
    db: sqlite::Connections,
    media: &State<Media>,
    cfg: &State<Cfg>,
    auth: Auth,
    id: &str,
    content_type: Option<&ContentType>,
    data: Data<'_>,
) -> CreatedResult<json::Image> {
    let data = read_image(data, cfg).await?;
    add_image(&db, media, &auth, ImageParent::Note(id.into()), content_type, &data)
}

#[delete("/notes/<id>/images/<image_id>")]
pub fn delete_note_image(
    db: sqlite::Connections,
    media: &State<Media>,
    auth: Auth,
    id: &str,
    image_id: &str,
) -> StatusResult {
    delete_image(&db, media, &auth, ImageParent::Note(id.into()), image_id)
}

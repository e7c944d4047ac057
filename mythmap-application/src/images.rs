use super::*;

use mythmap_core::repositories::{Error as RepoError, NoteRepo};

/// The place whose rating depends on the parent of an image.
fn rated_place<R: NoteRepo>(
    repo: &R,
    parent: &ImageParent,
) -> std::result::Result<Option<Id>, RepoError> {
    match parent {
        ImageParent::Place(_) => Ok(None),
        ImageParent::Note(id) => Ok(Some(repo.get_note(id.as_str())?.place_id)),
    }
}

pub fn add_image(
    connections: &sqlite::Connections,
    media: &dyn MediaStore,
    requester: Option<&User>,
    parent: ImageParent,
    content_type: &str,
    data: &[u8],
) -> Result<Image> {
    let (image, place_id) = connections.exclusive()?.transaction(|conn| {
        let image = usecases::add_image(conn, media, requester, parent, content_type, data)
            .map_err(|err| {
                warn!("Failed to add image: {}", err);
                err
            })?;
        let place_id = rated_place(conn, &image.parent)?;
        Ok::<_, usecases::Error>((image, place_id))
    })?;
    if let Some(place_id) = place_id {
        hooks::recalculate_place_rating(connections, &place_id);
    }
    Ok(image)
}

pub fn delete_image(
    connections: &sqlite::Connections,
    media: &dyn MediaStore,
    requester: Option<&User>,
    parent: &ImageParent,
    image_id: &str,
) -> Result<()> {
    let (image, place_id) = connections.exclusive()?.transaction(|conn| {
        let image = usecases::delete_image(conn, requester, parent, image_id).map_err(|err| {
            warn!("Failed to delete image {}: {}", image_id, err);
            err
        })?;
        let place_id = rated_place(conn, parent)?;
        Ok::<_, usecases::Error>((image, place_id))
    })?;
    hooks::remove_image_files(media, &[image]);
    if let Some(place_id) = place_id {
        hooks::recalculate_place_rating(connections, &place_id);
    }
    Ok(())
}

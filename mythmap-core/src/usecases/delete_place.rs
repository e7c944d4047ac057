use super::{authenticated, authorize_modification, get_accessible_place, prelude::*};

/// Delete a place with all its notes, comments, images and favorites.
///
/// Returns the deleted images of both the place and its notes. Their
/// files need to be removed from the media store afterwards.
pub fn delete_place<R>(repo: &R, requester: Option<&User>, id: &str) -> Result<Vec<Image>>
where
    R: PlaceRepo + NoteRepo + ImageRepo,
{
    let user = authenticated(requester)?;
    let place = get_accessible_place(repo, requester, id)?;
    authorize_modification(user, &place.owner)?;
    let mut images = repo.load_images(&ImageParent::Place(place.id.clone()))?;
    for note in repo.load_notes_of_place(place.id.as_str())? {
        images.extend(repo.load_images(&ImageParent::Note(note.id))?);
    }
    repo.delete_place(place.id.as_str())?;
    log::info!(
        "Deleted place {} with {} image(s) by user {}",
        place.id,
        images.len(),
        user.id
    );
    Ok(images)
}

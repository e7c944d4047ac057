use super::{authenticated, authorize_modification, get_accessible_note, prelude::*};

/// Returns the deleted note and its images, whose files
/// need to be removed afterwards.
pub fn delete_note<R>(repo: &R, requester: Option<&User>, id: &str) -> Result<(Note, Vec<Image>)>
where
    R: NoteRepo + ImageRepo,
{
    let user = authenticated(requester)?;
    let note = get_accessible_note(repo, requester, id)?;
    authorize_modification(user, &note.user_id)?;
    let images = repo.load_images(&ImageParent::Note(note.id.clone()))?;
    repo.delete_note(note.id.as_str())?;
    log::debug!("Deleted note {} of place {}", note.id, note.place_id);
    Ok((note, images))
}

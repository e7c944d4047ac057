use super::{authenticated, get_visible_place, parse_rating, prelude::*, validate_text};

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub place_id : String,
    pub text     : String,
    pub rating   : Option<i64>,
}

/// Each user may write a single note per place.
pub fn create_note<R>(repo: &R, requester: Option<&User>, new_note: NewNote) -> Result<Note>
where
    R: PlaceRepo + NoteRepo,
{
    let user = authenticated(requester)?;
    let NewNote {
        place_id,
        text,
        rating,
    } = new_note;
    let place = match get_visible_place(repo, requester, &place_id) {
        Err(Error::Repo(RepoError::NotFound)) => return Err(Error::PlaceNotAvailable),
        res => res?,
    };
    let text = validate_text(&text)?;
    let rating = parse_rating(rating)?;
    if repo
        .try_get_note_of_user(place.id.as_str(), user.id.as_str())?
        .is_some()
    {
        return Err(Error::NoteExists);
    }
    let now = Timestamp::now();
    let note = Note {
        id: Id::new(),
        place_id: place.id,
        user_id: user.id.clone(),
        text,
        rating,
        moderation: Moderation::pending(),
        created_at: now,
        updated_at: now,
    };
    match repo.create_note(&note) {
        Err(RepoError::AlreadyExists) => return Err(Error::NoteExists),
        res => res?,
    }
    log::debug!("Created note {} for place {}", note.id, note.place_id);
    Ok(note)
}

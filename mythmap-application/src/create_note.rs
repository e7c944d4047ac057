use super::*;

pub fn create_note(
    connections: &sqlite::Connections,
    requester: Option<&User>,
    new_note: usecases::NewNote,
) -> Result<Note> {
    let note = connections.exclusive()?.transaction(|conn| {
        usecases::create_note(conn, requester, new_note).map_err(|err| {
            warn!("Failed to create note: {}", err);
            err
        })
    })?;
    hooks::recalculate_place_rating(connections, &note.place_id);
    Ok(note)
}

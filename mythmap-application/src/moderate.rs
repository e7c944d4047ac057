use super::*;

use usecases::{ModerationAction, Moderated};

pub fn moderate_place(
    connections: &sqlite::Connections,
    requester: Option<&User>,
    id: &str,
    action: ModerationAction,
) -> Result<Moderated> {
    Ok(connections.exclusive()?.transaction(|conn| {
        usecases::moderate_place(conn, requester, id, action).map_err(|err| {
            warn!("Failed to moderate place {}: {}", id, err);
            err
        })
    })?)
}

pub fn moderate_note(
    connections: &sqlite::Connections,
    requester: Option<&User>,
    id: &str,
    action: ModerationAction,
) -> Result<Moderated> {
    let note = connections.exclusive()?.transaction(|conn| {
        usecases::moderate_note(conn, requester, id, action).map_err(|err| {
            warn!("Failed to moderate note {}: {}", id, err);
            err
        })
    })?;
    hooks::recalculate_place_rating(connections, &note.place_id);
    Ok(Moderated::from(&note))
}

pub fn moderate_comment(
    connections: &sqlite::Connections,
    requester: Option<&User>,
    id: &str,
    action: ModerationAction,
) -> Result<Moderated> {
    Ok(connections.exclusive()?.transaction(|conn| {
        usecases::moderate_comment(conn, requester, id, action).map_err(|err| {
            warn!("Failed to moderate comment {}: {}", id, err);
            err
        })
    })?)
}

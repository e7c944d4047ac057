use super::*;

pub fn update_place(
    connections: &sqlite::Connections,
    requester: Option<&User>,
    id: &str,
    patch: usecases::PlacePatch,
) -> Result<Place> {
    Ok(connections.exclusive()?.transaction(|conn| {
        usecases::update_place(conn, requester, id, patch).map_err(|err| {
            warn!("Failed to update place {}: {}", id, err);
            err
        })
    })?)
}

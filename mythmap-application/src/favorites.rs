use super::*;

pub fn toggle_favorite(
    connections: &sqlite::Connections,
    requester: Option<&User>,
    place_id: &str,
) -> Result<usecases::FavoriteToggled> {
    Ok(connections
        .exclusive()?
        .transaction(|conn| usecases::toggle_favorite(conn, requester, place_id))?)
}

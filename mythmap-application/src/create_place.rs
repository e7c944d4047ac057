use super::*;

pub fn create_place(
    connections: &sqlite::Connections,
    requester: Option<&User>,
    new_place: usecases::NewPlace,
) -> Result<Place> {
    let place = connections.exclusive()?.transaction(|conn| {
        usecases::create_place(conn, requester, new_place).map_err(|err| {
            warn!("Failed to create place: {}", err);
            err
        })
    })?;
    info!("Created place {} ({})", place.id, place.name);
    Ok(place)
}

use super::{
    authenticated, get_visible_place, prelude::*, query_places::load_details, PlaceDetails,
};
use crate::visibility;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteToggled {
    Added,
    Removed,
}

pub fn toggle_favorite<R>(
    repo: &R,
    requester: Option<&User>,
    place_id: &str,
) -> Result<FavoriteToggled>
where
    R: PlaceRepo + FavoriteRepo,
{
    let user = authenticated(requester)?;
    let place = get_visible_place(repo, requester, place_id)?;
    if repo.remove_favorite(place.id.as_str(), user.id.as_str())? {
        log::debug!("Removed place {} from favorites of {}", place.id, user.id);
        return Ok(FavoriteToggled::Removed);
    }
    repo.add_favorite(place.id.as_str(), user.id.as_str())?;
    log::debug!("Added place {} to favorites of {}", place.id, user.id);
    Ok(FavoriteToggled::Added)
}

/// Favorite places of the requester that are still visible.
pub fn favorite_places<R>(
    repo: &R,
    requester: Option<&User>,
    pagination: Pagination,
) -> Result<Vec<PlaceDetails>>
where
    R: PlaceRepo + FavoriteRepo + NoteRepo + ImageRepo + UserRepo,
{
    let user = authenticated(requester)?;
    let query = PlaceQuery {
        favorite_of: Some(user.id.clone()),
        status: visibility::visible_statuses(requester).to_vec(),
        pagination,
        ..Default::default()
    };
    load_details(repo, requester, &query)
}

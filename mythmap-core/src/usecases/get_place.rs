use super::{get_visible_place, prelude::*};

/// A place together with everything a detail view needs.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceDetails {
    pub place: Place,
    pub owner: User,
    pub images: Vec<Image>,
    pub is_favorite: bool,
    /// The requester's own note for the place in any status
    pub current_user_note: Option<Authored<Note>>,
    /// Distance to the center of a nearby search
    pub distance: Option<Distance>,
}

pub fn get_place<R>(repo: &R, requester: Option<&User>, id: &str) -> Result<PlaceDetails>
where
    R: PlaceRepo + FavoriteRepo + NoteRepo + ImageRepo + UserRepo,
{
    let place = get_visible_place(repo, requester, id)?;
    place_details(repo, requester, place)
}

/// Enrich a place that has already been loaded.
pub fn place_details<R>(
    repo: &R,
    requester: Option<&User>,
    place: Place,
) -> Result<PlaceDetails>
where
    R: FavoriteRepo + NoteRepo + ImageRepo + UserRepo,
{
    let owner = repo.get_user(place.owner.as_str())?;
    let images = repo.load_images(&ImageParent::Place(place.id.clone()))?;
    let (is_favorite, current_user_note) = match requester {
        Some(user) => {
            let is_favorite = repo.is_favorite(place.id.as_str(), user.id.as_str())?;
            let note = repo
                .try_get_note_of_user(place.id.as_str(), user.id.as_str())?
                .map(|item| Authored {
                    item,
                    author: user.clone(),
                });
            (is_favorite, note)
        }
        None => (false, None),
    };
    Ok(PlaceDetails {
        place,
        owner,
        images,
        is_favorite,
        current_user_note,
        distance: None,
    })
}

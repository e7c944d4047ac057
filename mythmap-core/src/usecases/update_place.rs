use super::{
    authenticated, authorize_modification,
    create_place::{validate_categories, validate_description, validate_name, validate_position},
    get_accessible_place,
    prelude::*,
};

/// Changes of a place, `None` keeps the current value.
///
/// The moderation status can not be changed by an update.
#[rustfmt::skip]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlacePatch {
    pub name        : Option<String>,
    pub description : Option<String>,
    pub lat         : Option<f64>,
    pub lng         : Option<f64>,
    pub categories  : Option<Option<String>>,
}

pub fn update_place<R: PlaceRepo>(
    repo: &R,
    requester: Option<&User>,
    id: &str,
    patch: PlacePatch,
) -> Result<Place> {
    let user = authenticated(requester)?;
    let mut place = get_accessible_place(repo, requester, id)?;
    authorize_modification(user, &place.owner)?;
    let PlacePatch {
        name,
        description,
        lat,
        lng,
        categories,
    } = patch;
    if let Some(name) = name {
        place.name = validate_name(&name)?;
    }
    if let Some(description) = description {
        place.description = validate_description(&description)?;
    }
    if lat.is_some() || lng.is_some() {
        let (old_lat, old_lng) = place.pos.to_lat_lng_deg();
        place.pos = validate_position(lat.unwrap_or(old_lat), lng.unwrap_or(old_lng))?;
    }
    if let Some(categories) = categories {
        place.categories = validate_categories(categories)?;
    }
    if place.is_owned_by(&user.id) && place.moderation.reset_after_owner_edit() {
        log::info!("Place {} needs to be reviewed again", place.id);
    }
    place.updated_at = Timestamp::now();
    repo.update_place(&place)?;
    Ok(place)
}

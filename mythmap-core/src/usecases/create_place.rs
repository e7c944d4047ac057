use super::{authenticated, prelude::*};

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct NewPlace {
    pub name        : String,
    pub description : String,
    pub lat         : f64,
    pub lng         : f64,
    pub categories  : Option<String>,
}

pub(crate) fn validate_name(name: &str) -> Result<String> {
    let name = name.trim();
    let len = name.chars().count();
    if len == 0 || len > Place::max_name_len() {
        return Err(Error::Name);
    }
    Ok(name.to_owned())
}

pub(crate) fn validate_description(description: &str) -> Result<String> {
    let description = description.trim();
    if description.is_empty() {
        return Err(Error::Description);
    }
    Ok(description.to_owned())
}

pub(crate) fn validate_categories(categories: Option<String>) -> Result<Option<String>> {
    let categories = super::non_empty(categories);
    if let Some(c) = &categories {
        if c.chars().count() > Place::max_name_len() {
            return Err(Error::Categories);
        }
    }
    Ok(categories)
}

pub(crate) fn validate_position(lat: f64, lng: f64) -> Result<MapPoint> {
    MapPoint::try_from_lat_lng_deg(lat, lng).ok_or(Error::InvalidPosition)
}

/// New places are owned by the requester and wait for moderation.
pub fn create_place<R: PlaceRepo>(
    repo: &R,
    requester: Option<&User>,
    new_place: NewPlace,
) -> Result<Place> {
    let owner = authenticated(requester)?;
    let NewPlace {
        name,
        description,
        lat,
        lng,
        categories,
    } = new_place;
    let now = Timestamp::now();
    let place = Place {
        id: Id::new(),
        name: validate_name(&name)?,
        description: validate_description(&description)?,
        pos: validate_position(lat, lng)?,
        categories: validate_categories(categories)?,
        moderation: Moderation::pending(),
        owner: owner.id.clone(),
        created_at: now,
        updated_at: now,
        rating: Default::default(),
        notes_count: 0,
    };
    log::debug!("Creating place {} owned by {}", place.id, place.owner);
    repo.create_place(&place)?;
    Ok(place)
}

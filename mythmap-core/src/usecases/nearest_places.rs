use super::{get_place::place_details, prelude::*, PlaceDetails};
use crate::{bbox::bbox_around, visibility};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearbyQuery {
    pub center: MapPoint,
    pub radius: Option<Distance>,
}

fn non_blank(param: Option<&str>) -> Option<&str> {
    param.map(str::trim).filter(|s| !s.is_empty())
}

/// Parse the raw query parameters of a nearby search.
pub fn parse_nearby_query(
    lat: Option<&str>,
    lon: Option<&str>,
    radius_km: Option<&str>,
) -> Result<NearbyQuery> {
    let (Some(lat), Some(lon)) = (non_blank(lat), non_blank(lon)) else {
        return Err(Error::MissingCoordinates);
    };
    let lat = lat
        .parse::<f64>()
        .map_err(|_| Error::InvalidCoordinates)?;
    let lon = lon
        .parse::<f64>()
        .map_err(|_| Error::InvalidCoordinates)?;
    let center = MapPoint::try_from_lat_lng_deg(lat, lon).ok_or(Error::InvalidCoordinates)?;
    let radius = non_blank(radius_km)
        .map(|r| {
            let km = r.parse::<f64>().map_err(|_| Error::InvalidRadius)?;
            if !km.is_finite() || km < 0.0 {
                return Err(Error::InvalidRadius);
            }
            Ok(Distance::from_kilometers(km))
        })
        .transpose()?;
    Ok(NearbyQuery { center, radius })
}

/// Visible places ordered by their distance to the center.
///
/// With a radius only places within this great-circle distance
/// are returned. Places with equal distance are ordered by name.
pub fn nearest_places<R>(
    repo: &R,
    requester: Option<&User>,
    nearby: NearbyQuery,
    pagination: Pagination,
) -> Result<Vec<PlaceDetails>>
where
    R: PlaceRepo + FavoriteRepo + NoteRepo + ImageRepo + UserRepo,
{
    let NearbyQuery { center, radius } = nearby;
    let query = PlaceQuery {
        status: visibility::listed_statuses(requester, None).to_vec(),
        bbox: radius.map(|r| bbox_around(center, r)),
        ..Default::default()
    };
    let mut candidates: Vec<_> = repo
        .query_places(&query)?
        .into_iter()
        .filter_map(|place| {
            let distance = MapPoint::distance(center, place.pos)?;
            match radius {
                Some(r) if distance > r => None,
                _ => Some((place, distance)),
            }
        })
        .collect();
    log::debug!(
        "Found {} places near {} within {:?}",
        candidates.len(),
        center,
        radius
    );
    candidates.sort_by(|(p1, d1), (p2, d2)| {
        d1.to_meters()
            .total_cmp(&d2.to_meters())
            .then_with(|| p1.name.cmp(&p2.name))
    });
    let offset = pagination.offset.unwrap_or(0) as usize;
    let limit = pagination.limit.map(|l| l as usize).unwrap_or(usize::MAX);
    candidates
        .into_iter()
        .skip(offset)
        .take(limit)
        .map(|(place, distance)| {
            let mut details = place_details(repo, requester, place)?;
            details.distance = Some(distance);
            Ok(details)
        })
        .collect()
}

use mythmap_entities::{geo::*, place::*};

/// The smallest bounding box that covers all points within the
/// given great-circle distance around the center.
pub fn bbox_around(center: MapPoint, radius: Distance) -> MapBbox {
    debug_assert!(center.is_valid());
    debug_assert!(radius.is_valid());
    let (lat_rad, lng_rad) = center.to_lat_lng_rad();
    let angular_radius = radius.to_meters() / MEAN_EARTH_RADIUS.to_meters();

    let lat_min_rad = lat_rad - angular_radius;
    let lat_max_rad = lat_rad + angular_radius;
    let lat_bound_rad = LatCoord::max().to_rad();

    if lat_min_rad <= -lat_bound_rad || lat_max_rad >= lat_bound_rad {
        // A pole is covered
        return MapBbox::new(
            MapPoint::new(
                LatCoord::from_deg(lat_min_rad.to_degrees().max(LatCoord::min().to_deg())),
                LngCoord::min(),
            ),
            MapPoint::new(
                LatCoord::from_deg(lat_max_rad.to_degrees().min(LatCoord::max().to_deg())),
                LngCoord::max(),
            ),
        );
    }

    let sin_ratio = angular_radius.sin() / lat_rad.cos();
    if angular_radius >= std::f64::consts::PI || sin_ratio >= 1.0 {
        return MapBbox::new(
            MapPoint::new(LatCoord::from_deg(lat_min_rad.to_degrees()), LngCoord::min()),
            MapPoint::new(LatCoord::from_deg(lat_max_rad.to_degrees()), LngCoord::max()),
        );
    }
    let delta_lng_rad = sin_ratio.asin();

    let lng_range_deg = LngCoord::max().to_deg() - LngCoord::min().to_deg();
    let mut lng_min_deg = (lng_rad - delta_lng_rad).to_degrees();
    if lng_min_deg < LngCoord::min().to_deg() {
        // wrap around
        lng_min_deg += lng_range_deg;
    }
    let mut lng_max_deg = (lng_rad + delta_lng_rad).to_degrees();
    if lng_max_deg > LngCoord::max().to_deg() {
        // wrap around
        lng_max_deg -= lng_range_deg;
    }

    let bbox = MapBbox::new(
        MapPoint::from_lat_lng_deg(lat_min_rad.to_degrees(), lng_min_deg),
        MapPoint::from_lat_lng_deg(lat_max_rad.to_degrees(), lng_max_deg),
    );
    debug_assert!(bbox.is_valid());
    bbox
}

pub trait InBBox {
    fn in_bbox(&self, bbox: &MapBbox) -> bool;
}

impl InBBox for Place {
    fn in_bbox(&self, bbox: &MapBbox) -> bool {
        bbox.contains_point(self.pos)
    }
}

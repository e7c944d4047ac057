pub type RawCoord = i32;

// Assumption: 2-complement binary representation
const RAW_COORD_INVALID: RawCoord = RawCoord::MIN;
const RAW_COORD_MAX: RawCoord = RawCoord::MAX;
const RAW_COORD_MIN: RawCoord = -RAW_COORD_MAX;

/// Compact fixed-point integer representation of a geographical coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeoCoord(RawCoord);

impl GeoCoord {
    const INVALID: Self = Self(RAW_COORD_INVALID);

    pub const fn max() -> Self {
        Self(RAW_COORD_MAX)
    }

    pub const fn min() -> Self {
        Self(RAW_COORD_MIN)
    }

    pub const fn to_raw(self) -> RawCoord {
        self.0
    }

    pub const fn from_raw(raw: RawCoord) -> Self {
        Self(raw)
    }

    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

impl Default for GeoCoord {
    fn default() -> Self {
        Self::INVALID
    }
}

impl PartialOrd for GeoCoord {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        if self == other {
            Some(std::cmp::Ordering::Equal)
        } else if self.is_valid() && other.is_valid() {
            Some(self.to_raw().cmp(&other.to_raw()))
        } else {
            None
        }
    }
}

macro_rules! angular_coord {
    ($(#[$attr:meta])* $name:ident, $deg_max:expr) => {
        $(#[$attr])*
        #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, PartialOrd)]
        pub struct $name(GeoCoord);

        impl $name {
            const DEG_MAX: f64 = $deg_max;
            const DEG_MIN: f64 = -$deg_max;
            const RAD_MAX: f64 = Self::DEG_MAX.to_radians();
            const RAW_RANGE: f64 = RAW_COORD_MAX as f64 - RAW_COORD_MIN as f64;
            const TO_DEG: f64 = (Self::DEG_MAX - Self::DEG_MIN) / Self::RAW_RANGE;
            const FROM_DEG: f64 = Self::RAW_RANGE / (Self::DEG_MAX - Self::DEG_MIN);
            const TO_RAD: f64 = (2.0 * Self::RAD_MAX) / Self::RAW_RANGE;

            pub const fn max() -> Self {
                Self(GeoCoord::max())
            }

            pub const fn min() -> Self {
                Self(GeoCoord::min())
            }

            pub const fn to_raw(self) -> RawCoord {
                self.0.to_raw()
            }

            pub const fn from_raw(raw: RawCoord) -> Self {
                Self(GeoCoord::from_raw(raw))
            }

            pub fn is_valid(self) -> bool {
                self.0.is_valid()
            }

            pub fn to_rad(self) -> f64 {
                if self.is_valid() {
                    f64::from(self.to_raw()) * Self::TO_RAD
                } else {
                    f64::NAN
                }
            }

            pub fn to_deg(self) -> f64 {
                if self.is_valid() {
                    let deg = f64::from(self.to_raw()) * Self::TO_DEG;
                    debug_assert!(deg >= Self::DEG_MIN);
                    debug_assert!(deg <= Self::DEG_MAX);
                    deg
                } else {
                    f64::NAN
                }
            }

            pub fn from_deg<T: Into<f64>>(deg: T) -> Self {
                let deg = deg.into();
                debug_assert!(deg >= Self::DEG_MIN);
                debug_assert!(deg <= Self::DEG_MAX);
                let raw = f64::round(deg * Self::FROM_DEG) as RawCoord;
                let res = Self::from_raw(raw);
                debug_assert!(res.is_valid());
                res
            }

            /// Fails for values outside of the valid range, including NaN.
            pub fn try_from_deg<T: Into<f64>>(deg: T) -> Option<Self> {
                let deg = deg.into();
                if (Self::DEG_MIN..=Self::DEG_MAX).contains(&deg) {
                    Some(Self::from_deg(deg))
                } else {
                    None
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
                write!(f, "{}", self.to_deg())
            }
        }
    };
}

angular_coord!(
    /// Latitude in the range [-90°, 90°]
    LatCoord,
    90.0
);

angular_coord!(
    /// Longitude in the range [-180°, 180°]
    LngCoord,
    180.0
);

/// Compact internal representation of a geographical location on a (flat) map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MapPoint {
    lat: LatCoord,
    lng: LngCoord,
}

impl MapPoint {
    pub const fn new(lat: LatCoord, lng: LngCoord) -> Self {
        Self { lat, lng }
    }

    pub const fn lat(self) -> LatCoord {
        self.lat
    }

    pub const fn lng(self) -> LngCoord {
        self.lng
    }

    pub fn is_valid(self) -> bool {
        self.lat.is_valid() && self.lng.is_valid()
    }

    pub fn to_lat_lng_rad(self) -> (f64, f64) {
        (self.lat.to_rad(), self.lng.to_rad())
    }

    pub fn to_lat_lng_deg(self) -> (f64, f64) {
        (self.lat.to_deg(), self.lng.to_deg())
    }

    pub fn from_lat_lng_deg<LAT: Into<f64>, LNG: Into<f64>>(lat: LAT, lng: LNG) -> Self {
        Self::new(LatCoord::from_deg(lat), LngCoord::from_deg(lng))
    }

    pub fn try_from_lat_lng_deg<LAT: Into<f64>, LNG: Into<f64>>(
        lat: LAT,
        lng: LNG,
    ) -> Option<Self> {
        match (LatCoord::try_from_deg(lat), LngCoord::try_from_deg(lng)) {
            (Some(lat), Some(lng)) => Some(Self::new(lat, lng)),
            _ => None,
        }
    }
}

impl std::fmt::Display for MapPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Distance(pub f64);

impl Distance {
    pub const fn infinite() -> Self {
        Self(f64::INFINITY)
    }

    pub const fn from_meters(meters: f64) -> Self {
        Self(meters)
    }

    pub fn from_kilometers(kilometers: f64) -> Self {
        Self(kilometers * 1_000.0)
    }

    pub const fn to_meters(self) -> f64 {
        self.0
    }

    pub fn is_valid(self) -> bool {
        self.0 >= 0.0
    }
}

pub const MEAN_EARTH_RADIUS: Distance = Distance::from_meters(6_371_200.0);

impl MapPoint {
    /// Calculate the great-circle distance on the surface
    /// of the earth using a special case of the Vincenty
    /// formula for numerical accuracy.
    /// Reference: <https://en.wikipedia.org/wiki/Great-circle_distance>
    pub fn distance(p1: MapPoint, p2: MapPoint) -> Option<Distance> {
        if !p1.is_valid() || !p2.is_valid() {
            return None;
        }

        let (lat1_rad, lng1_rad) = p1.to_lat_lng_rad();
        let (lat2_rad, lng2_rad) = p2.to_lat_lng_rad();

        let (lat1_sin, lat1_cos) = (lat1_rad.sin(), lat1_rad.cos());
        let (lat2_sin, lat2_cos) = (lat2_rad.sin(), lat2_rad.cos());

        let dlng = (lng1_rad - lng2_rad).abs();
        let (dlng_sin, dlng_cos) = (dlng.sin(), dlng.cos());

        let nom1 = lat2_cos * dlng_sin;
        let nom2 = lat1_cos * lat2_sin - lat1_sin * lat2_cos * dlng_cos;

        let nom = (nom1 * nom1 + nom2 * nom2).sqrt();
        let denom = lat1_sin * lat2_sin + lat1_cos * lat2_cos * dlng_cos;

        Some(Distance::from_meters(
            MEAN_EARTH_RADIUS.to_meters() * nom.atan2(denom),
        ))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MapBbox {
    sw: MapPoint,
    ne: MapPoint,
}

impl MapBbox {
    pub const fn new(sw: MapPoint, ne: MapPoint) -> Self {
        Self { sw, ne }
    }

    pub fn whole_world() -> Self {
        Self::new(
            MapPoint::new(LatCoord::min(), LngCoord::min()),
            MapPoint::new(LatCoord::max(), LngCoord::max()),
        )
    }

    pub const fn southwest(&self) -> MapPoint {
        self.sw
    }

    pub const fn northeast(&self) -> MapPoint {
        self.ne
    }

    pub fn is_valid(&self) -> bool {
        self.sw.is_valid() && self.ne.is_valid() && self.sw.lat() <= self.ne.lat()
    }

    /// The bounding box crosses the antimeridian (180° longitude)
    pub fn is_inverse(&self) -> bool {
        self.sw.lng() > self.ne.lng()
    }

    pub fn contains_point(&self, pt: MapPoint) -> bool {
        debug_assert!(self.is_valid());
        debug_assert!(pt.is_valid());
        if pt.lat() < self.sw.lat() || pt.lat() > self.ne.lat() {
            return false;
        }
        if self.is_inverse() {
            // exclusive
            !(pt.lng() > self.ne.lng() && pt.lng() < self.sw.lng())
        } else {
            // inclusive
            pt.lng() >= self.sw.lng() && pt.lng() <= self.ne.lng()
        }
    }
}

impl std::fmt::Display for MapBbox {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        write!(f, "{},{}", self.sw, self.ne)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;

    #[test]
    fn latitude() {
        assert!(!LatCoord::default().is_valid());
        assert!(LatCoord::default().to_deg().is_nan());
        assert_eq!(0.0, LatCoord::from_raw(0).to_deg());
        assert_eq!(RAW_COORD_MIN, LatCoord::min().to_raw());
        assert_eq!(RAW_COORD_MAX, LatCoord::max().to_raw());
        assert_eq!(
            LatCoord::max(),
            LatCoord::from_deg(LatCoord::max().to_deg())
        );
        assert_eq!(LatCoord::min(), LatCoord::from_deg(-90));
        assert_eq!(LatCoord::max(), LatCoord::from_deg(90));
        assert_eq!(None, LatCoord::try_from_deg(-90.000001));
        assert_eq!(None, LatCoord::try_from_deg(90.000001));
        assert_eq!(None, LatCoord::try_from_deg(f64::NAN));
    }

    #[test]
    fn longitude() {
        assert!(!LngCoord::default().is_valid());
        assert_eq!(0.0, LngCoord::from_raw(0).to_deg());
        assert!(LngCoord::min().is_valid());
        assert!(LngCoord::max().is_valid());
        assert_eq!(
            LngCoord::min(),
            LngCoord::from_deg(LngCoord::min().to_deg())
        );
        assert_eq!(LngCoord::min(), LngCoord::from_deg(-180));
        assert_eq!(LngCoord::max(), LngCoord::from_deg(180));
        assert_eq!(None, LngCoord::try_from_deg(-180.000001));
        assert_eq!(None, LngCoord::try_from_deg(180.000001));
    }

    #[test]
    fn coordinates_keep_precision() {
        let p = MapPoint::from_lat_lng_deg(55.796127, 49.106414);
        let (lat, lng) = p.to_lat_lng_deg();
        assert!((lat - 55.796127).abs() < 0.000001);
        assert!((lng - 49.106414).abs() < 0.000001);
    }

    #[test]
    fn no_distance() {
        let p1 = MapPoint::from_lat_lng_deg(0.0, 0.0);
        assert_eq!(MapPoint::distance(p1, p1).unwrap().to_meters(), 0.0);

        let p2 = MapPoint::from_lat_lng_deg(-25.0, 55.0);
        assert_eq!(MapPoint::distance(p2, p2).unwrap().to_meters(), 0.0);

        let p1 = MapPoint::from_lat_lng_deg(-15.0, -180.0);
        let p2 = MapPoint::from_lat_lng_deg(-15.0, 180.0);
        assert!(MapPoint::distance(p1, p2).unwrap().to_meters() < 0.000001);
    }

    #[test]
    fn real_distance() {
        let kazan = MapPoint::from_lat_lng_deg(55.7887, 49.1221);
        let moscow = MapPoint::from_lat_lng_deg(55.7558, 37.6173);
        let d = MapPoint::distance(kazan, moscow).unwrap();
        assert!(d > Distance::from_kilometers(715.0));
        assert!(d < Distance::from_kilometers(725.0));

        let new_york = MapPoint::from_lat_lng_deg(40.714268, -74.005974);
        let sidney = MapPoint::from_lat_lng_deg(-33.867138, 151.207108);
        let d = MapPoint::distance(new_york, sidney).unwrap();
        assert!(d > Distance::from_meters(15_985_000.0));
        assert!(d < Distance::from_meters(15_995_000.0));
    }

    #[test]
    fn symmetric_distance() {
        let a = MapPoint::from_lat_lng_deg(80.0, 0.0);
        let b = MapPoint::from_lat_lng_deg(90.0, 20.0);
        assert_eq!(
            MapPoint::distance(a, b).unwrap(),
            MapPoint::distance(b, a).unwrap()
        );
    }

    #[test]
    fn distance_with_invalid_coordinates() {
        let a = MapPoint::new(LatCoord::from_deg(10.0), Default::default());
        let b = MapPoint::from_lat_lng_deg(20.0, 20.0);
        assert_eq!(None, MapPoint::distance(a, b));
    }

    #[test]
    fn random_distances_are_positive() {
        let mut rng = rand::thread_rng();
        for _ in 0..10_000 {
            let p1 = MapPoint::from_lat_lng_deg(
                rng.gen_range(-90.0..=90.0),
                rng.gen_range(-180.0..=180.0),
            );
            let p2 = MapPoint::from_lat_lng_deg(
                rng.gen_range(-90.0..=90.0),
                rng.gen_range(-180.0..=180.0),
            );
            assert!(MapPoint::distance(p1, p2).unwrap().is_valid());
        }
    }

    #[test]
    fn bbox_contains_point() {
        let sw = MapPoint::from_lat_lng_deg(-25.0, -20.0);
        let ne = MapPoint::from_lat_lng_deg(25.0, 30.0);
        let bbox = MapBbox::new(sw, ne);
        assert!(!bbox.is_inverse());
        assert!(bbox.contains_point(MapPoint::from_lat_lng_deg(-10.0, -15.0)));
        assert!(!bbox.contains_point(MapPoint::from_lat_lng_deg(-26.0, -15.0)));
        assert!(bbox.contains_point(MapPoint::from_lat_lng_deg(10.0, 20.0)));
        assert!(!bbox.contains_point(MapPoint::from_lat_lng_deg(26.0, 20.0)));
        assert!(!bbox.contains_point(MapPoint::from_lat_lng_deg(-10.0, -21.0)));
        assert!(!bbox.contains_point(MapPoint::from_lat_lng_deg(10.0, 31.0)));

        let sw = MapPoint::from_lat_lng_deg(-25.0, 175.0);
        let ne = MapPoint::from_lat_lng_deg(25.0, -175.0);
        let bbox = MapBbox::new(sw, ne);
        assert!(bbox.is_inverse());
        assert!(bbox.contains_point(MapPoint::from_lat_lng_deg(-10.0, 177.0)));
        assert!(!bbox.contains_point(MapPoint::from_lat_lng_deg(-26.0, 177.0)));
        assert!(bbox.contains_point(MapPoint::from_lat_lng_deg(10.0, -177.0)));
        assert!(!bbox.contains_point(MapPoint::from_lat_lng_deg(-10.0, 174.0)));
        assert!(!bbox.contains_point(MapPoint::from_lat_lng_deg(10.0, -174.0)));

        let world = MapBbox::whole_world();
        assert!(world.is_valid());
        assert!(world.contains_point(MapPoint::from_lat_lng_deg(89.9, -179.9)));
    }
}

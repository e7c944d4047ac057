/// A single rating from 1 (worst) to 5 (best).
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct RatingValue(u8);

impl RatingValue {
    pub const fn min() -> Self {
        Self(1)
    }

    pub const fn max() -> Self {
        Self(5)
    }

    pub fn is_valid(self) -> bool {
        self >= Self::min() && self <= Self::max()
    }
}

impl TryFrom<i64> for RatingValue {
    type Error = i64;
    fn try_from(from: i64) -> Result<Self, Self::Error> {
        u8::try_from(from)
            .ok()
            .map(Self)
            .filter(|v| v.is_valid())
            .ok_or(from)
    }
}

impl From<RatingValue> for u8 {
    fn from(from: RatingValue) -> Self {
        from.0
    }
}

impl From<RatingValue> for i64 {
    fn from(from: RatingValue) -> Self {
        i64::from(from.0)
    }
}

impl From<RatingValue> for f64 {
    fn from(from: RatingValue) -> Self {
        f64::from(from.0)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct AvgRatingValue(f64);

impl AvgRatingValue {
    /// Round to the given number of decimal places.
    pub fn round_to(self, decimals: i32) -> f64 {
        let factor = 10_f64.powi(decimals);
        (self.0 * factor).round() / factor
    }
}

impl From<f64> for AvgRatingValue {
    fn from(from: f64) -> Self {
        Self(from)
    }
}

impl From<AvgRatingValue> for f64 {
    fn from(from: AvgRatingValue) -> Self {
        from.0
    }
}

impl From<RatingValue> for AvgRatingValue {
    fn from(from: RatingValue) -> Self {
        f64::from(from).into()
    }
}

#[derive(Debug, Default, Clone)]
pub struct AvgRatingValueBuilder {
    acc: u64,
    cnt: u64,
}

impl AvgRatingValueBuilder {
    pub fn add(&mut self, val: RatingValue) {
        debug_assert!(val.is_valid());
        self.acc += u64::from(val.0);
        self.cnt += 1;
    }

    pub fn build(self) -> RatingSummary {
        if self.cnt > 0 {
            RatingSummary {
                average: AvgRatingValue::from(self.acc as f64 / self.cnt as f64),
                count: self.cnt,
            }
        } else {
            Default::default()
        }
    }
}

impl std::ops::AddAssign<RatingValue> for AvgRatingValueBuilder {
    fn add_assign(&mut self, rhs: RatingValue) {
        self.add(rhs);
    }
}

impl FromIterator<RatingValue> for RatingSummary {
    fn from_iter<I: IntoIterator<Item = RatingValue>>(iter: I) -> Self {
        let mut builder = AvgRatingValueBuilder::default();
        for value in iter {
            builder += value;
        }
        builder.build()
    }
}

/// Cached aggregate of all approved ratings of a place.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct RatingSummary {
    pub average: AvgRatingValue,
    pub count: u64,
}

impl RatingSummary {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(v: i64) -> RatingValue {
        RatingValue::try_from(v).unwrap()
    }

    #[test]
    fn valid_rating_values() {
        assert!(RatingValue::try_from(0).is_err());
        assert!(RatingValue::try_from(6).is_err());
        assert!(RatingValue::try_from(-1).is_err());
        assert!(RatingValue::try_from(256).is_err());
        for v in 1..=5 {
            assert_eq!(v, i64::from(value(v)));
        }
    }

    #[test]
    fn empty_summary() {
        let summary: RatingSummary = std::iter::empty().collect();
        assert!(summary.is_empty());
        assert_eq!(0.0, f64::from(summary.average));
    }

    #[test]
    fn average_of_values() {
        let summary: RatingSummary = vec![value(4), value(5)].into_iter().collect();
        assert_eq!(2, summary.count);
        assert_eq!(4.5, f64::from(summary.average));

        let summary: RatingSummary = vec![value(1), value(2), value(2)].into_iter().collect();
        assert_eq!(3, summary.count);
        assert_eq!(1.67, summary.average.round_to(2));
        assert_eq!(1.7, summary.average.round_to(1));
    }
}

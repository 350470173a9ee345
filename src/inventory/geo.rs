//! Great-circle distance and radius filtering.

use serde::{Deserialize, Serialize};

/// Mean Earth radius used for all distance calculations.
pub const EARTH_RADIUS_MILES: f64 = 3958.8;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// Haversine distance between two points, in miles.
pub fn haversine_miles(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    // Rounding can push h a hair past 1 for antipodal points
    2.0 * EARTH_RADIUS_MILES * h.sqrt().min(1.0).asin()
}

/// A center point plus an inclusive radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusFilter {
    pub center: GeoPoint,
    pub radius_miles: f64,
}

impl RadiusFilter {
    /// Returns `None` for an invalid center or a negative/non-finite radius.
    pub fn new(center: GeoPoint, radius_miles: f64) -> Option<Self> {
        if !center.is_valid() || !radius_miles.is_finite() || radius_miles < 0.0 {
            return None;
        }
        Some(Self {
            center,
            radius_miles,
        })
    }

    /// Distance to `point` if it lies within the radius. A missing point can
    /// never be shown to be inside, so it is rejected.
    pub fn distance_within(&self, point: Option<GeoPoint>) -> Option<f64> {
        let point = point?;
        let distance = haversine_miles(self.center, point);
        (distance <= self.radius_miles).then_some(distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAKEWOOD: GeoPoint = GeoPoint::new(47.0379, -122.9015);
    const SEATTLE: GeoPoint = GeoPoint::new(47.6101, -122.3344);

    #[test]
    fn identical_points_are_zero_miles_apart() {
        assert_eq!(haversine_miles(LAKEWOOD, LAKEWOOD), 0.0);
    }

    #[test]
    fn lakewood_to_seattle_is_about_48_miles() {
        let d = haversine_miles(LAKEWOOD, SEATTLE);
        assert!((d - 47.6).abs() < 0.5, "got {d}");
        assert!((d - haversine_miles(SEATTLE, LAKEWOOD)).abs() < 1e-9);
    }

    #[test]
    fn quarter_meridian_matches_earth_radius() {
        let d = haversine_miles(GeoPoint::new(0.0, 0.0), GeoPoint::new(90.0, 0.0));
        let expected = EARTH_RADIUS_MILES * std::f64::consts::FRAC_PI_2;
        assert!((d - expected).abs() < 1e-6);
    }

    #[test]
    fn boundary_is_inclusive() {
        let d = haversine_miles(LAKEWOOD, SEATTLE);
        let exact = RadiusFilter::new(LAKEWOOD, d).unwrap();
        assert_eq!(exact.distance_within(Some(SEATTLE)), Some(d));

        let just_short = RadiusFilter::new(LAKEWOOD, d - 1e-9).unwrap();
        assert_eq!(just_short.distance_within(Some(SEATTLE)), None);
    }

    #[test]
    fn zero_radius_still_admits_the_center() {
        let filter = RadiusFilter::new(LAKEWOOD, 0.0).unwrap();
        assert_eq!(filter.distance_within(Some(LAKEWOOD)), Some(0.0));
    }

    #[test]
    fn missing_coordinates_are_excluded() {
        let filter = RadiusFilter::new(LAKEWOOD, 10_000.0).unwrap();
        assert_eq!(filter.distance_within(None), None);
    }

    #[test]
    fn rejects_invalid_inputs() {
        assert!(RadiusFilter::new(LAKEWOOD, -1.0).is_none());
        assert!(RadiusFilter::new(LAKEWOOD, f64::NAN).is_none());
        assert!(RadiusFilter::new(GeoPoint::new(91.0, 0.0), 5.0).is_none());
        assert!(RadiusFilter::new(GeoPoint::new(0.0, -181.0), 5.0).is_none());
    }
}

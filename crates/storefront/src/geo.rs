//! Great-circle distance and store proximity helpers.

use crate::catalog::Store;

/// Mean Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

fn deg_to_rad(deg: f64) -> f64 {
    deg * (std::f64::consts::PI / 180.0)
}

/// Great-circle distance between two coordinates, in kilometers, via the
/// haversine formula.
#[must_use]
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = deg_to_rad(lat2 - lat1);
    let d_lon = deg_to_rad(lon2 - lon1);
    let a = (d_lat / 2.0).sin().powi(2)
        + deg_to_rad(lat1).cos() * deg_to_rad(lat2).cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Stores sorted ascending by distance from the user's position.
///
/// The sort is stable: stores at equal distance keep their catalog order.
#[must_use]
pub fn rank_by_distance(stores: &[Store], user_lat: f64, user_lon: f64) -> Vec<Store> {
    let mut keyed: Vec<(f64, &Store)> = stores
        .iter()
        .map(|s| (distance_km(user_lat, user_lon, s.latitude, s.longitude), s))
        .collect();
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
    keyed.into_iter().map(|(_, s)| s.clone()).collect()
}

/// Stores within `max_km` of the user's position, in catalog order.
#[must_use]
pub fn filter_within_radius(
    stores: &[Store],
    user_lat: f64,
    user_lon: f64,
    max_km: f64,
) -> Vec<Store> {
    stores
        .iter()
        .filter(|s| distance_km(user_lat, user_lon, s.latitude, s.longitude) <= max_km)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::store;

    const MUMBAI: (f64, f64) = (19.076, 72.8777);
    const DELHI: (f64, f64) = (28.6139, 77.209);

    #[test]
    fn test_identical_points_are_zero() {
        assert!(distance_km(MUMBAI.0, MUMBAI.1, MUMBAI.0, MUMBAI.1).abs() < 1e-9);
    }

    #[test]
    fn test_symmetry() {
        let there = distance_km(MUMBAI.0, MUMBAI.1, DELHI.0, DELHI.1);
        let back = distance_km(DELHI.0, DELHI.1, MUMBAI.0, MUMBAI.1);
        assert!((there - back).abs() < 1e-9);
    }

    #[test]
    fn test_known_distance() {
        // Mumbai to Delhi is roughly 1150 km great-circle.
        let d = distance_km(MUMBAI.0, MUMBAI.1, DELHI.0, DELHI.1);
        assert!((1100.0..1200.0).contains(&d), "got {d}");
    }

    #[test]
    fn test_antipodal_points_near_half_circumference() {
        let d = distance_km(0.0, 0.0, 0.0, 180.0);
        let half = std::f64::consts::PI * EARTH_RADIUS_KM;
        assert!((d - half).abs() < 1.0, "got {d}, expected {half}");
    }

    #[test]
    fn test_rank_is_sorted_non_decreasing() {
        let stores = vec![
            store("1", "Delhi Store", DELHI.0, DELHI.1),
            store("2", "Mumbai Store", MUMBAI.0, MUMBAI.1),
            store("3", "Pune Store", 18.5204, 73.8567),
        ];
        let ranked = rank_by_distance(&stores, MUMBAI.0, MUMBAI.1);
        let distances: Vec<f64> = ranked
            .iter()
            .map(|s| distance_km(MUMBAI.0, MUMBAI.1, s.latitude, s.longitude))
            .collect();
        assert!(distances.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(ranked.first().map(|s| s.id.as_str()), Some("2"));
    }

    #[test]
    fn test_rank_ties_keep_catalog_order() {
        let stores = vec![
            store("a", "First", MUMBAI.0, MUMBAI.1),
            store("b", "Second", MUMBAI.0, MUMBAI.1),
        ];
        let ranked = rank_by_distance(&stores, DELHI.0, DELHI.1);
        let ids: Vec<&str> = ranked.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_filter_within_radius() {
        let stores = vec![
            store("near", "Near", MUMBAI.0, MUMBAI.1),
            store("far", "Far", DELHI.0, DELHI.1),
        ];
        let nearby = filter_within_radius(&stores, MUMBAI.0, MUMBAI.1, 50.0);
        let ids: Vec<&str> = nearby.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["near"]);
    }
}

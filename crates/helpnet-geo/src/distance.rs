use helpnet_types::models::Coordinate;

/// IUGG mean Earth radius.
const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Great-circle distance between two points in kilometers, via the
/// haversine formula on a spherical Earth. Good to ~0.5% against the
/// ellipsoid, which is plenty for a kilometer-scale radius search.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let dlat = (b.latitude - a.latitude).to_radians();
    let dlon = (b.longitude - a.longitude).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected ~{expected} km, got {actual} km"
        );
    }

    #[test]
    fn same_point_is_zero() {
        let p = Coordinate::new(12.9716, 77.5946);
        assert_eq!(distance_km(p, p), 0.0);
    }

    #[test]
    fn one_degree_of_latitude() {
        // One degree of arc along a meridian is ~111.2 km.
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(1.0, 0.0);
        approx(distance_km(a, b), 111.195, 0.01);
    }

    #[test]
    fn one_degree_of_longitude_at_equator() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(0.0, 1.0);
        approx(distance_km(a, b), 111.195, 0.01);
    }

    #[test]
    fn bengaluru_to_mysuru() {
        let bengaluru = Coordinate::new(12.9716, 77.5946);
        let mysuru = Coordinate::new(12.2958, 76.6394);
        // Straight-line distance is roughly 127 km.
        approx(distance_km(bengaluru, mysuru), 127.0, 2.0);
    }

    #[test]
    fn symmetric() {
        let a = Coordinate::new(51.5007, -0.1246);
        let b = Coordinate::new(48.8584, 2.2945);
        assert_eq!(distance_km(a, b), distance_km(b, a));
    }
}

use serde::{Deserialize, Serialize};

const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Great-circle distance between two points in kilometres.
pub fn haversine_km(from: Coordinates, to: Coordinates) -> f64 {
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + from.latitude.to_radians().cos()
            * to.latitude.to_radians().cos()
            * (d_lon / 2.0).sin().powi(2);

    EARTH_RADIUS_KM * 2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_point_is_zero_km_away() {
        let point = Coordinates::new(12.9716, 77.5946);
        assert_eq!(haversine_km(point, point), 0.0);
    }

    #[test]
    fn matches_a_known_city_distance() {
        // Bengaluru to Mysuru is roughly 128 km as the crow flies.
        let bengaluru = Coordinates::new(12.9716, 77.5946);
        let mysuru = Coordinates::new(12.2958, 76.6394);
        let distance = haversine_km(bengaluru, mysuru);
        assert!((distance - 128.0).abs() < 2.0, "got {}", distance);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Coordinates::new(19.0760, 72.8777);
        let b = Coordinates::new(19.1197, 72.8464);
        assert!((haversine_km(a, b) - haversine_km(b, a)).abs() < 1e-9);
    }

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let a = Coordinates::new(0.0, 0.0);
        let b = Coordinates::new(1.0, 0.0);
        assert!((haversine_km(a, b) - 111.19).abs() < 0.1);
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        assert!(Coordinates::new(45.0, 90.0).is_valid());
        assert!(!Coordinates::new(91.0, 0.0).is_valid());
        assert!(!Coordinates::new(0.0, -181.0).is_valid());
        assert!(!Coordinates::new(f64::NAN, 0.0).is_valid());
    }
}

use geo::{algorithm::HaversineDistance, geometry::Coord, Point};

/// Returns the great-circle distance in meters between `a` and `b`.
///
/// Uses the haversine formula with the mean earth radius
/// ([`MEAN_EARTH_RADIUS`](crate::MEAN_EARTH_RADIUS)).
pub fn point_distance(a: Coord, b: Coord) -> f64 {
    Point::from(a).haversine_distance(&Point::from(b))
}

#[cfg(test)]
mod tests {
    use super::point_distance;
    use crate::constants::MEAN_EARTH_RADIUS;
    use approx::assert_relative_eq;
    use geo::coord;

    fn haversine(a: (f64, f64), b: (f64, f64)) -> f64 {
        let (lon1, lat1) = (a.0.to_radians(), a.1.to_radians());
        let (lon2, lat2) = (b.0.to_radians(), b.1.to_radians());
        let h = ((lat2 - lat1) / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * ((lon2 - lon1) / 2.0).sin().powi(2);
        2.0 * MEAN_EARTH_RADIUS * h.sqrt().asin()
    }

    #[test]
    fn test_point_distance() {
        let a = coord!(x: -71.30830716441369, y: 44.28309806603165);
        let b = coord!(x: -71.2972073283768, y: 44.25628098424278);
        assert_relative_eq!(
            point_distance(a, b),
            haversine((a.x, a.y), (b.x, b.y)),
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_one_degree_of_longitude_at_equator() {
        let d = point_distance(coord!(x: 0.0, y: 0.0), coord!(x: 1.0, y: 0.0));
        assert_relative_eq!(d, MEAN_EARTH_RADIUS.to_radians() * 1.0, max_relative = 1e-9);
    }

    #[test]
    fn test_zero_distance() {
        let a = coord!(x: 12.5, y: -33.0);
        assert_eq!(point_distance(a, a), 0.0);
    }
}

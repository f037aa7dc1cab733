//! Ramer-Douglas-Peucker polyline simplification.

use geo::geometry::{Coord, LineString};

/// Returns the subset of `points` that stays within `tolerance` of
/// the original line.
///
/// Deviation is measured as squared distance to the segment between
/// the current endpoints, against `tolerance²`. `None` uses a squared
/// tolerance of `1`. The first and last points are always kept, and
/// inputs of two points or fewer are returned as is.
pub fn simplify(points: &[Coord], tolerance: Option<f64>) -> Vec<Coord> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let sq_tolerance = tolerance.map_or(1.0, |t| t * t);
    let last = points.len() - 1;
    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[last] = true;
    simplify_dp_step(points, 0, last, sq_tolerance, &mut keep);

    points
        .iter()
        .zip(keep)
        .filter_map(|(point, keep)| keep.then_some(*point))
        .collect()
}

/// [`simplify`] for a [`LineString`].
pub fn simplify_line_string(line: &LineString, tolerance: Option<f64>) -> LineString {
    LineString::new(simplify(&line.0, tolerance))
}

fn simplify_dp_step(
    points: &[Coord],
    first: usize,
    last: usize,
    sq_tolerance: f64,
    keep: &mut [bool],
) {
    let mut max_sq_dist = sq_tolerance;
    let mut index = None;

    for (i, point) in points.iter().enumerate().take(last).skip(first + 1) {
        let sq_dist = sq_segment_distance(*point, points[first], points[last]);
        // Strict comparison keeps the first of equally distant points.
        if sq_dist > max_sq_dist {
            index = Some(i);
            max_sq_dist = sq_dist;
        }
    }

    if let Some(index) = index {
        keep[index] = true;
        if index - first > 1 {
            simplify_dp_step(points, first, index, sq_tolerance, keep);
        }
        if last - index > 1 {
            simplify_dp_step(points, index, last, sq_tolerance, keep);
        }
    }
}

/// Squared distance from `p` to the segment `a`-`b`.
fn sq_segment_distance(p: Coord, a: Coord, b: Coord) -> f64 {
    let mut x = a.x;
    let mut y = a.y;
    let mut dx = b.x - x;
    let mut dy = b.y - y;

    if dx != 0.0 || dy != 0.0 {
        let t = ((p.x - x) * dx + (p.y - y) * dy) / (dx * dx + dy * dy);
        if t > 1.0 {
            x = b.x;
            y = b.y;
        } else if t > 0.0 {
            x += dx * t;
            y += dy * t;
        }
    }

    dx = p.x - x;
    dy = p.y - y;
    dx * dx + dy * dy
}

#[cfg(test)]
mod tests {
    use super::{simplify, simplify_line_string, sq_segment_distance};
    use geo::{coord, line_string, Coord};

    fn is_subsequence(needle: &[Coord], haystack: &[Coord]) -> bool {
        let mut it = haystack.iter();
        needle.iter().all(|n| it.any(|h| h == n))
    }

    #[test]
    fn test_short_input_unchanged() {
        assert!(simplify(&[], Some(0.0)).is_empty());
        let one = [coord!(x: 1.0, y: 2.0)];
        assert_eq!(simplify(&one, None), one);
        let two = [coord!(x: 1.0, y: 2.0), coord!(x: 1.0, y: 2.0)];
        assert_eq!(simplify(&two, Some(100.0)), two);
    }

    #[test]
    fn test_collinear_zero_tolerance() {
        let points: Vec<Coord> = (0..=8)
            .map(|i| coord!(x: f64::from(i), y: 2.0 * f64::from(i)))
            .collect();
        assert_eq!(
            simplify(&points, Some(0.0)),
            vec![coord!(x: 0.0, y: 0.0), coord!(x: 8.0, y: 16.0)]
        );
    }

    #[test]
    fn test_small_deviation_dropped() {
        let points = [
            coord!(x: 0.0, y: 0.0),
            coord!(x: 1.0, y: 0.5),
            coord!(x: 2.0, y: 0.0),
        ];
        assert_eq!(
            simplify(&points, None),
            vec![coord!(x: 0.0, y: 0.0), coord!(x: 2.0, y: 0.0)]
        );
        assert_eq!(simplify(&points, Some(0.4)), points.to_vec());
    }

    #[test]
    fn test_zig_zag_kept() {
        let points = [
            coord!(x: 0.0, y: 0.0),
            coord!(x: 1.0, y: 5.0),
            coord!(x: 2.0, y: 0.0),
            coord!(x: 3.0, y: 5.0),
            coord!(x: 4.0, y: 0.0),
        ];
        assert_eq!(simplify(&points, Some(1.0)), points.to_vec());
    }

    #[test]
    fn test_output_is_subsequence_with_endpoints() {
        let points: Vec<Coord> = (0..200)
            .map(|i| {
                let x = f64::from(i) * 0.1;
                coord!(x: x, y: (x * 1.7).sin() * 3.0 + (x * 0.3).cos())
            })
            .collect();
        for tolerance in [0.0, 0.05, 0.5, 2.0, 50.0] {
            let simplified = simplify(&points, Some(tolerance));
            assert!(simplified.len() <= points.len());
            assert_eq!(simplified.first(), points.first());
            assert_eq!(simplified.last(), points.last());
            assert!(is_subsequence(&simplified, &points));
        }
        assert_eq!(simplify(&points, Some(50.0)).len(), 2);
    }

    #[test]
    fn test_line_string() {
        let line = line_string![
            (x: 0.0, y: 0.0),
            (x: 5.0, y: 0.1),
            (x: 10.0, y: 0.0),
        ];
        assert_eq!(
            simplify_line_string(&line, None),
            line_string![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0)]
        );
    }

    #[test]
    fn test_sq_segment_distance() {
        let a = coord!(x: 0.0, y: 0.0);
        let b = coord!(x: 4.0, y: 0.0);
        assert_eq!(sq_segment_distance(coord!(x: 2.0, y: 3.0), a, b), 9.0);
        // Beyond the segment end, distance is to the endpoint.
        assert_eq!(sq_segment_distance(coord!(x: 7.0, y: 4.0), a, b), 25.0);
        // Degenerate segment.
        assert_eq!(sq_segment_distance(coord!(x: 3.0, y: 4.0), a, a), 25.0);
    }
}

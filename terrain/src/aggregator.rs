//! Profile summary, smoothing, and unit conversion.

use crate::{math::m_to_ft, ElevationPoint, ElevationProfile, TerrainError};

/// Summarizes `points` into an [`ElevationProfile`].
pub fn build_output(points: Vec<ElevationPoint>) -> Result<ElevationProfile, TerrainError> {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return Err(TerrainError::EmptyProfile);
    };
    let (distance, start_elevation, end_elevation) =
        (last.distance, first.elevation, last.elevation);

    let (min_elevation, max_elevation, sum) = points.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY, 0.0),
        |(min, max, sum), point| {
            (
                min.min(point.elevation),
                max.max(point.elevation),
                sum + point.elevation,
            )
        },
    );
    #[allow(clippy::cast_precision_loss)]
    let avg_elevation = sum / points.len() as f64;

    Ok(ElevationProfile {
        distance,
        min_elevation,
        max_elevation,
        avg_elevation,
        start_elevation,
        end_elevation,
        points,
    })
}

/// Applies a single pass 3-tap moving average to elevations.
///
/// Every value is computed from the unsmoothed input. The first point
/// is left as is and the last point stands in for its own successor.
pub fn smooth_elevation(points: &mut [ElevationPoint]) {
    let original: Vec<f64> = points.iter().map(|p| p.elevation).collect();
    for (i, point) in points.iter_mut().enumerate().skip(1) {
        let next = original.get(i + 1).copied().unwrap_or(original[i]);
        point.elevation = (original[i - 1] + original[i] + next) / 3.0;
    }
}

/// Converts every distance and elevation in `profile` from meters
/// to feet.
pub fn to_feet(profile: ElevationProfile) -> ElevationProfile {
    let ElevationProfile {
        distance,
        min_elevation,
        max_elevation,
        avg_elevation,
        start_elevation,
        end_elevation,
        mut points,
    } = profile;

    for point in &mut points {
        point.distance = m_to_ft(point.distance);
        point.elevation = m_to_ft(point.elevation);
    }

    ElevationProfile {
        distance: m_to_ft(distance),
        min_elevation: m_to_ft(min_elevation),
        max_elevation: m_to_ft(max_elevation),
        avg_elevation: m_to_ft(avg_elevation),
        start_elevation: m_to_ft(start_elevation),
        end_elevation: m_to_ft(end_elevation),
        points,
    }
}

//! Rejection sampling of points inside a region.

use geo::Point;
use rand::Rng;

use crate::region::Region;

/// Sample up to `target` points uniformly inside the region.
///
/// Points are drawn uniformly from the bounding box and kept only when
/// they fall inside the polygon. Sampling stops after `max_attempts`
/// draws even if fewer than `target` points were accepted, so the call
/// always terminates; fewer samples degrade elevation-statistics
/// precision but never fail outright.
///
/// The caller supplies the random source, so a seeded
/// [`rand::rngs::StdRng`] reproduces exact sample sets.
pub fn sample_interior<R: Rng + ?Sized>(
    region: &Region,
    target: usize,
    max_attempts: usize,
    rng: &mut R,
) -> Vec<Point<f64>> {
    let Some(rect) = region.bounding_rect() else {
        return Vec::new();
    };
    let (min, max) = (rect.min(), rect.max());

    let mut points = Vec::with_capacity(target);
    let mut attempts = 0;
    while points.len() < target && attempts < max_attempts {
        let candidate = Point::new(
            sample_coord(rng, min.x, max.x),
            sample_coord(rng, min.y, max.y),
        );
        if region.contains(&candidate) {
            points.push(candidate);
        }
        attempts += 1;
    }
    points
}

/// Draw one coordinate in `[low, high]`, tolerating zero-width ranges.
fn sample_coord<R: Rng + ?Sized>(rng: &mut R, low: f64, high: f64) -> f64 {
    if high > low {
        rng.random_range(low..high)
    } else {
        low
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn square() -> Region {
        Region::from_bounds(13.1, 13.0, 80.3, 80.2).unwrap()
    }

    #[test]
    fn samples_stay_inside_the_polygon() {
        let region = square();
        let mut rng = StdRng::seed_from_u64(7);
        let points = sample_interior(&region, 15, 100, &mut rng);
        assert!(!points.is_empty());
        assert!(points.len() <= 15);
        for p in &points {
            assert!(region.contains(p), "{p:?} escaped the region");
        }
    }

    #[test]
    fn seeded_sampling_is_reproducible() {
        let region = square();
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        assert_eq!(
            sample_interior(&region, 10, 100, &mut a),
            sample_interior(&region, 10, 100, &mut b)
        );
    }

    #[test]
    fn attempt_cap_bounds_the_result() {
        let region = square();
        let mut rng = StdRng::seed_from_u64(1);
        // Only 3 attempts: at most 3 points, and the call still returns.
        let points = sample_interior(&region, 15, 3, &mut rng);
        assert!(points.len() <= 3);
    }
}

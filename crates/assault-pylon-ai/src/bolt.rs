//! Jagged strike path. Purely visual.

use glam::DVec3;
use rand::Rng;

/// Split `start..end` into `segments` straight pieces and nudge every
/// interior point by uniform noise in `[-variance/2, variance/2)` per axis.
/// The end points are exact. Returns `segments + 1` points.
pub fn jagged_path<R: Rng + ?Sized>(
    start: DVec3,
    end: DVec3,
    segments: usize,
    variance: f64,
    rng: &mut R,
) -> Vec<DVec3> {
    let segments = segments.max(1);
    let mut points = Vec::with_capacity(segments + 1);
    points.push(start);
    for i in 1..segments {
        let t = i as f64 / segments as f64;
        let jitter = DVec3::new(
            (rng.gen::<f64>() - 0.5) * variance,
            (rng.gen::<f64>() - 0.5) * variance,
            (rng.gen::<f64>() - 0.5) * variance,
        );
        points.push(start.lerp(end, t) + jitter);
    }
    points.push(end);
    points
}

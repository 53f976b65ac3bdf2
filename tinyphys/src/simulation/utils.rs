//! Small numeric helpers and the chunk partition used by threaded updates

use std::f64::consts::PI;
use std::ops::Range;

use crate::error::PhysicsError;

/// Partition `0..len` into contiguous ranges for `chunks` workers
///
/// - `chunks == 0` is an error
/// - `chunks >= len` gives one range per item
/// - otherwise exactly `chunks` ranges, boundaries at round(i * len / chunks)
pub fn split_ranges(len: usize, chunks: usize) -> Result<Vec<Range<usize>>, PhysicsError> {
    if chunks == 0 {
        return Err(PhysicsError::NoChunks);
    }
    if chunks >= len {
        return Ok((0..len).map(|i| i..i + 1).collect());
    }

    let size = len as f64 / chunks as f64;
    let bound = |i: usize| ((i as f64 * size).round() as usize).min(len);
    Ok((0..chunks).map(|i| bound(i)..bound(i + 1)).collect())
}

pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees.to_radians()
}

pub fn rad_to_deg(radians: f64) -> f64 {
    radians.to_degrees()
}

/// Wrap an angle into [-pi, pi]
pub fn normalize_angle(mut angle: f64) -> f64 {
    while angle > PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_covers_everything_once() {
        let ranges = split_ranges(10, 3).unwrap();
        assert_eq!(ranges.len(), 3);
        assert_eq!(ranges.first().unwrap().start, 0);
        assert_eq!(ranges.last().unwrap().end, 10);
        for w in ranges.windows(2) {
            assert_eq!(w[0].end, w[1].start);
        }
    }

    #[test]
    fn split_more_chunks_than_items() {
        assert_eq!(split_ranges(2, 5).unwrap(), vec![0..1, 1..2]);
        assert!(split_ranges(0, 1).unwrap().is_empty());
    }

    #[test]
    fn split_zero_chunks_fails() {
        assert_eq!(split_ranges(4, 0), Err(PhysicsError::NoChunks));
    }

    #[test]
    fn angle_helpers() {
        assert!((normalize_angle(3.0 * PI) - PI).abs() < 1e-12);
        assert!((deg_to_rad(180.0) - PI).abs() < 1e-12);
        assert!((rad_to_deg(PI / 2.0) - 90.0).abs() < 1e-12);
        assert_eq!(clamp(5.0, 0.0, 1.0), 1.0);
        assert_eq!(lerp(2.0, 4.0, 0.5), 3.0);
    }
}

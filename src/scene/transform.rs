//! Time-driven spin transform

use glam::Mat4;
use std::time::Duration;

/// Rotation speed of the triangle, in degrees of rotation per elapsed second.
pub const SPIN_DEGREES_PER_SECOND: f32 = 65.0;

/// Rotation angle in degrees after `elapsed` wall-clock time at `rate`
/// degrees per second. Deterministic in `elapsed`; no hidden clock reads.
pub fn spin_angle_degrees(elapsed: Duration, rate: f32) -> f32 {
    (elapsed.as_secs_f64() * rate as f64) as f32
}

/// Z-axis rotation matrix after `elapsed` wall-clock time.
pub fn spin_matrix(elapsed: Duration, rate: f32) -> Mat4 {
    Mat4::from_rotation_z(spin_angle_degrees(elapsed, rate).to_radians())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_is_65_degrees_per_second() {
        let rate = SPIN_DEGREES_PER_SECOND;
        assert_eq!(spin_angle_degrees(Duration::from_secs(1), rate), 65.0);
        assert_eq!(spin_angle_degrees(Duration::from_secs(2), rate), 130.0);
        assert_eq!(spin_angle_degrees(Duration::from_millis(500), rate), 32.5);
    }

    #[test]
    fn test_angle_idempotent_without_time_advance() {
        let elapsed = Duration::from_millis(1234);
        let rate = SPIN_DEGREES_PER_SECOND;
        assert_eq!(
            spin_angle_degrees(elapsed, rate),
            spin_angle_degrees(elapsed, rate)
        );
        assert_eq!(spin_matrix(elapsed, rate), spin_matrix(elapsed, rate));
    }

    #[test]
    fn test_zero_elapsed_is_identity() {
        let rate = SPIN_DEGREES_PER_SECOND;
        assert_eq!(spin_angle_degrees(Duration::ZERO, rate), 0.0);
        assert!(spin_matrix(Duration::ZERO, rate).abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn test_full_turn() {
        // 360 / 65 seconds is one full revolution.
        let elapsed = Duration::from_secs_f64(360.0 / 65.0);
        let matrix = spin_matrix(elapsed, SPIN_DEGREES_PER_SECOND);
        assert!(matrix.abs_diff_eq(Mat4::IDENTITY, 1e-4));
    }
}

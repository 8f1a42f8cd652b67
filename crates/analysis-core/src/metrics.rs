//! Biomechanical metric computation.
//!
//! Pure, deterministic functions from a skeleton to a metric set. Defensive
//! throughout: truncated skeletons, degenerate geometry, and floating-point
//! domain errors all produce well-defined values instead of failures.

use poselens_pose_model::{Landmark, LandmarkIndex, MetricSet, PoseSkeleton};

/// Angle at vertex `b` formed by the rays toward `a` and `c`, in degrees.
///
/// Computed in the 2D image plane (z is ignored), rounded to 1 decimal,
/// always in `[0, 180]`. Degenerate inputs where either ray has zero length
/// yield `0.0`, as does an acos argument pushed outside `[-1, 1]` by
/// rounding. Symmetric in `a` and `c`.
pub fn angle_at_vertex(a: Landmark, b: Landmark, c: Landmark) -> f64 {
    let ba = (a.x - b.x, a.y - b.y);
    let bc = (c.x - b.x, c.y - b.y);

    let norm_ba = (ba.0 * ba.0 + ba.1 * ba.1).sqrt();
    let norm_bc = (bc.0 * bc.0 + bc.1 * bc.1).sqrt();

    if norm_ba == 0.0 || norm_bc == 0.0 {
        return 0.0;
    }

    let cos = (ba.0 * bc.0 + ba.1 * bc.1) / (norm_ba * norm_bc);
    if !(-1.0..=1.0).contains(&cos) {
        return 0.0;
    }

    round_to(cos.acos().to_degrees(), 1)
}

/// Compute the metric set for one skeleton.
///
/// Never fails: missing landmarks resolve to the zero sentinel, and every
/// individual metric degrades to a defined value on degenerate input.
pub fn compute_metrics(skeleton: &PoseSkeleton) -> MetricSet {
    let l_hip = skeleton.landmark(LandmarkIndex::LeftHip);
    let l_knee = skeleton.landmark(LandmarkIndex::LeftKnee);
    let l_ankle = skeleton.landmark(LandmarkIndex::LeftAnkle);

    let r_hip = skeleton.landmark(LandmarkIndex::RightHip);
    let r_knee = skeleton.landmark(LandmarkIndex::RightKnee);
    let r_ankle = skeleton.landmark(LandmarkIndex::RightAnkle);

    MetricSet {
        knee_angle_left: angle_at_vertex(l_hip, l_knee, l_ankle),
        knee_angle_right: angle_at_vertex(r_hip, r_knee, r_ankle),
        // Image y grows downward: larger mean hip y = hips lower on screen.
        hip_height: round_to((l_hip.y + r_hip.y) / 2.0, 3),
    }
}

/// Round to `decimals` decimal places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn lm(x: f64, y: f64) -> Landmark {
        Landmark::new(x, y, 0.0)
    }

    #[test]
    fn test_right_angle() {
        let angle = angle_at_vertex(lm(0.0, 1.0), lm(0.0, 0.0), lm(1.0, 0.0));
        assert_eq!(angle, 90.0);
    }

    #[test]
    fn test_straight_leg_is_180() {
        let angle = angle_at_vertex(lm(0.5, 0.2), lm(0.5, 0.5), lm(0.5, 0.8));
        assert_eq!(angle, 180.0);
    }

    #[test]
    fn test_folded_points_are_zero_degrees() {
        // A and C on the same ray from B.
        let angle = angle_at_vertex(lm(0.6, 0.5), lm(0.5, 0.5), lm(0.7, 0.5));
        assert_eq!(angle, 0.0);
    }

    #[test]
    fn test_degenerate_vertex_returns_zero() {
        let b = lm(0.5, 0.5);
        assert_eq!(angle_at_vertex(b, b, lm(0.9, 0.9)), 0.0);
        assert_eq!(angle_at_vertex(lm(0.1, 0.1), b, b), 0.0);
        assert_eq!(angle_at_vertex(b, b, b), 0.0);
    }

    #[test]
    fn test_z_is_ignored() {
        let a = Landmark::new(0.0, 1.0, 5.0);
        let b = Landmark::new(0.0, 0.0, -3.0);
        let c = Landmark::new(1.0, 0.0, 0.7);
        assert_eq!(angle_at_vertex(a, b, c), 90.0);
    }

    #[test]
    fn test_metrics_on_empty_skeleton() {
        let metrics = compute_metrics(&PoseSkeleton::default());
        assert_eq!(metrics.knee_angle_left, 0.0);
        assert_eq!(metrics.knee_angle_right, 0.0);
        assert_eq!(metrics.hip_height, 0.0);
    }

    #[test]
    fn test_hip_height_is_mean_of_hip_y() {
        let mut landmarks = vec![Landmark::SENTINEL; 33];
        landmarks[LandmarkIndex::LeftHip as usize] = lm(0.4, 0.6124);
        landmarks[LandmarkIndex::RightHip as usize] = lm(0.6, 0.5876);
        let metrics = compute_metrics(&PoseSkeleton::new(landmarks));
        assert_eq!(metrics.hip_height, 0.6);
    }

    #[test]
    fn test_rounding() {
        assert_eq!(round_to(123.4567, 1), 123.5);
        assert_eq!(round_to(0.61449, 3), 0.614);
        assert_eq!(round_to(0.6145, 3), 0.615);
    }

    proptest! {
        #[test]
        fn prop_angle_in_valid_range(
            ax in -1.0f64..1.0, ay in -1.0f64..1.0,
            bx in -1.0f64..1.0, by in -1.0f64..1.0,
            cx in -1.0f64..1.0, cy in -1.0f64..1.0,
        ) {
            let angle = angle_at_vertex(lm(ax, ay), lm(bx, by), lm(cx, cy));
            prop_assert!((0.0..=180.0).contains(&angle));
        }

        #[test]
        fn prop_angle_is_symmetric(
            ax in -1.0f64..1.0, ay in -1.0f64..1.0,
            bx in -1.0f64..1.0, by in -1.0f64..1.0,
            cx in -1.0f64..1.0, cy in -1.0f64..1.0,
        ) {
            let a = lm(ax, ay);
            let b = lm(bx, by);
            let c = lm(cx, cy);
            prop_assert_eq!(angle_at_vertex(a, b, c), angle_at_vertex(c, b, a));
        }
    }
}

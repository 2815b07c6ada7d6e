//! Posture analysis over pose landmarks
//!
//! Heuristics over the torso and arm keypoints: crossed arms, lean
//! direction, raised arms, and a coarse engagement contribution. All
//! thresholds are in normalized/depth units.

use aura_core::NormalizedLandmark;

const NOSE: usize = 0;
const LEFT_SHOULDER: usize = 11;
const RIGHT_SHOULDER: usize = 12;
const LEFT_WRIST: usize = 15;
const RIGHT_WRIST: usize = 16;

/// Depth delta beyond which a lean is called.
const LEAN_DEPTH_THRESHOLD: f32 = 0.1;
/// How far above the shoulder a wrist must sit to count as raised.
const RAISE_MARGIN: f32 = 0.02;
/// Keypoints below this visibility don't participate.
const VISIBILITY_THRESHOLD: f32 = 0.5;

/// Lean direction relative to the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lean {
    Forward,
    #[default]
    Neutral,
    Backward,
}

/// Posture read of a single pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PostureAnalysis {
    /// Wrists crossed over the body midline (closed/defensive)
    pub arms_crossed: bool,
    pub lean: Lean,
    /// At least one wrist above its shoulder (active participation)
    pub arms_raised: bool,
    /// Coarse engagement contribution in [0,1]
    pub engagement: f32,
}

fn visible(landmarks: &[NormalizedLandmark], index: usize) -> Option<&NormalizedLandmark> {
    let lm = landmarks.get(index)?;
    if !lm.is_finite() || lm.visibility_or_full() <= VISIBILITY_THRESHOLD {
        return None;
    }
    Some(lm)
}

/// Analyze posture from a 33-landmark pose.
///
/// Returns `None` when the nose or either shoulder is missing; wrist-based
/// signals degrade to `false` when the wrists are not visible.
pub fn analyze_posture(landmarks: &[NormalizedLandmark]) -> Option<PostureAnalysis> {
    let nose = visible(landmarks, NOSE)?;
    let left_shoulder = visible(landmarks, LEFT_SHOULDER)?;
    let right_shoulder = visible(landmarks, RIGHT_SHOULDER)?;
    let left_wrist = visible(landmarks, LEFT_WRIST);
    let right_wrist = visible(landmarks, RIGHT_WRIST);

    let midline = (left_shoulder.x + right_shoulder.x) / 2.0;

    // both wrists across the midline reads as crossed arms
    let arms_crossed = match (left_wrist, right_wrist) {
        (Some(lw), Some(rw)) => lw.x > midline && rw.x < midline,
        _ => false,
    };

    // depth of the nose against the shoulder plane tells the lean
    let shoulder_z = (left_shoulder.z.unwrap_or(0.0) + right_shoulder.z.unwrap_or(0.0)) / 2.0;
    let depth_diff = nose.z.unwrap_or(0.0) - shoulder_z;
    let lean = if depth_diff < -LEAN_DEPTH_THRESHOLD {
        Lean::Forward
    } else if depth_diff > LEAN_DEPTH_THRESHOLD {
        Lean::Backward
    } else {
        Lean::Neutral
    };

    let raised = |wrist: Option<&NormalizedLandmark>, shoulder: &NormalizedLandmark| {
        wrist.is_some_and(|w| w.y < shoulder.y - RAISE_MARGIN)
    };
    let arms_raised = raised(left_wrist, left_shoulder) || raised(right_wrist, right_shoulder);

    Some(PostureAnalysis {
        arms_crossed,
        lean,
        arms_raised,
        engagement: posture_engagement(arms_crossed, lean, arms_raised),
    })
}

/// Engagement contribution from posture features, starting neutral.
fn posture_engagement(arms_crossed: bool, lean: Lean, arms_raised: bool) -> f32 {
    let mut score: f32 = 0.5;

    if arms_crossed {
        score -= 0.2;
    }
    match lean {
        Lean::Forward => score += 0.3,
        Lean::Backward => score -= 0.1,
        Lean::Neutral => {}
    }
    if arms_raised {
        score += 0.2;
    }

    score.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_pose() -> Vec<NormalizedLandmark> {
        let mut pose = vec![NormalizedLandmark::new(0.0, 0.0).with_visibility(0.0); 33];
        pose[NOSE] = NormalizedLandmark::new(0.5, 0.2).with_visibility(0.9).with_z(0.0);
        pose[LEFT_SHOULDER] = NormalizedLandmark::new(0.4, 0.4)
            .with_visibility(0.9)
            .with_z(0.0);
        pose[RIGHT_SHOULDER] = NormalizedLandmark::new(0.6, 0.4)
            .with_visibility(0.9)
            .with_z(0.0);
        pose[LEFT_WRIST] = NormalizedLandmark::new(0.35, 0.6).with_visibility(0.9);
        pose[RIGHT_WRIST] = NormalizedLandmark::new(0.65, 0.6).with_visibility(0.9);
        pose
    }

    #[test]
    fn test_neutral_pose() {
        let analysis = analyze_posture(&base_pose()).unwrap();

        assert!(!analysis.arms_crossed);
        assert_eq!(analysis.lean, Lean::Neutral);
        assert!(!analysis.arms_raised);
        assert!((analysis.engagement - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_arms_crossed() {
        let mut pose = base_pose();
        // wrists cross the midline at x = 0.5
        pose[LEFT_WRIST] = NormalizedLandmark::new(0.58, 0.5).with_visibility(0.9);
        pose[RIGHT_WRIST] = NormalizedLandmark::new(0.42, 0.5).with_visibility(0.9);

        let analysis = analyze_posture(&pose).unwrap();
        assert!(analysis.arms_crossed);
        assert!((analysis.engagement - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_forward_lean_raises_engagement() {
        let mut pose = base_pose();
        pose[NOSE] = NormalizedLandmark::new(0.5, 0.2)
            .with_visibility(0.9)
            .with_z(-0.2);

        let analysis = analyze_posture(&pose).unwrap();
        assert_eq!(analysis.lean, Lean::Forward);
        assert!((analysis.engagement - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_raised_arm() {
        let mut pose = base_pose();
        pose[RIGHT_WRIST] = NormalizedLandmark::new(0.65, 0.3).with_visibility(0.9);

        let analysis = analyze_posture(&pose).unwrap();
        assert!(analysis.arms_raised);
        assert!((analysis.engagement - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_missing_shoulders_yields_none() {
        let mut pose = base_pose();
        pose[LEFT_SHOULDER] = pose[LEFT_SHOULDER].with_visibility(0.1);

        assert!(analyze_posture(&pose).is_none());
    }

    #[test]
    fn test_hidden_wrists_degrade_gracefully() {
        let mut pose = base_pose();
        pose[LEFT_WRIST] = pose[LEFT_WRIST].with_visibility(0.2);
        pose[RIGHT_WRIST] = pose[RIGHT_WRIST].with_visibility(0.2);

        let analysis = analyze_posture(&pose).unwrap();
        assert!(!analysis.arms_crossed);
        assert!(!analysis.arms_raised);
    }
}

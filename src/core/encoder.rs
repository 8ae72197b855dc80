// Feature encoding - converts a pose (or its absence) into a window slot

use crate::models::pose::{Pose, LANDMARK_COUNT};

/// Values per landmark block: x, y, confidence
pub const FEATURE_BLOCK: usize = 3;

/// Fixed per-frame feature width; constant for the process lifetime
pub const FEATURE_WIDTH: usize = LANDMARK_COUNT * FEATURE_BLOCK;

/// Fixed-width numeric encoding of one pose
pub type FeatureVector = Vec<f32>;

/// Per-frame encoding result: a feature vector, or a marker that no pose
/// was detected in the frame
///
/// Modeled as a two-variant sum type rather than a nullable vector so that
/// coverage counting and placeholder substitution stay unambiguous.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowSlot {
    Present(FeatureVector),
    Missing,
}

impl WindowSlot {
    pub fn is_present(&self) -> bool {
        matches!(self, WindowSlot::Present(_))
    }
}

/// Encode the selected pose for one frame
///
/// Deterministic and stateless: landmark blocks are laid out in
/// `BodyLandmark` declaration order, missing keypoints encode as zeros.
pub fn encode(pose: Option<&Pose>) -> WindowSlot {
    let pose = match pose {
        Some(pose) => pose,
        None => return WindowSlot::Missing,
    };

    let mut vector = Vec::with_capacity(FEATURE_WIDTH);
    for index in 0..LANDMARK_COUNT {
        match pose.keypoints.get(index) {
            Some(keypoint) => {
                vector.push(keypoint.x);
                vector.push(keypoint.y);
                vector.push(keypoint.confidence);
            }
            None => vector.extend_from_slice(&[0.0; FEATURE_BLOCK]),
        }
    }

    WindowSlot::Present(vector)
}

/// The neutral placeholder substituted for `Missing` slots when a window
/// is completed for classification
pub fn empty_pose_vector() -> FeatureVector {
    vec![0.0; FEATURE_WIDTH]
}

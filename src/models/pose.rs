// Data models for body pose detection results

use serde::{Deserialize, Serialize};

/// Number of body landmarks per detected pose
pub const LANDMARK_COUNT: usize = 33;

/// MediaPipe Pose landmark indices (33 total)
///
/// The declaration order is the canonical encoding order for feature vectors
/// and must stay constant for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum BodyLandmark {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

/// A 2D keypoint with detection confidence
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Keypoint {
    pub x: f32, // Normalized [0, 1] image coordinates
    pub y: f32, // Normalized [0, 1] image coordinates
    pub confidence: f32, // Detection confidence [0, 1]
}

impl Keypoint {
    pub fn new(x: f32, y: f32, confidence: f32) -> Self {
        Self { x, y, confidence }
    }

    pub fn is_visible(&self, threshold: f32) -> bool {
        self.confidence >= threshold
    }
}

/// A detected body pose: one keypoint per landmark, in `BodyLandmark` order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pose {
    pub keypoints: Vec<Keypoint>,
}

impl Pose {
    pub fn new(keypoints: Vec<Keypoint>) -> Self {
        Self { keypoints }
    }

    /// Bounding-box area over all keypoints, used only to rank candidate
    /// poses within a frame
    pub fn area(&self) -> f32 {
        let mut min_x = f32::INFINITY;
        let mut min_y = f32::INFINITY;
        let mut max_x = f32::NEG_INFINITY;
        let mut max_y = f32::NEG_INFINITY;

        for keypoint in &self.keypoints {
            min_x = min_x.min(keypoint.x);
            min_y = min_y.min(keypoint.y);
            max_x = max_x.max(keypoint.x);
            max_y = max_y.max(keypoint.y);
        }

        if self.keypoints.is_empty() {
            return 0.0;
        }

        (max_x - min_x) * (max_y - min_y)
    }
}

/// Error types for pose detection
///
/// Detection failures are recovered locally: the pipeline logs them and
/// treats the frame as containing zero poses.
#[derive(Debug, thiserror::Error)]
pub enum DetectionError {
    #[error("Detector failure: {0}")]
    DetectorFailure(String),

    #[error("Unsupported frame format: {0}")]
    UnsupportedFrame(String),
}

pub type DetectionResult<T> = Result<T, DetectionError>;

// External seam for the pose-detection model

use crate::models::frame::VideoFrame;
use crate::models::pose::{DetectionResult, Pose};

/// Black-box pose detection over a single frame
///
/// Implementations wrap whatever model runtime performs the detection. The
/// pipeline never inspects how poses are found; it only consumes the result.
/// An `Err` from `detect` is treated identically to an empty pose list:
/// logged and recovered, never propagated.
pub trait PoseDetector: Send {
    /// Detect zero or more candidate poses in one frame
    fn detect(&mut self, frame: &VideoFrame) -> DetectionResult<Vec<Pose>>;
}

// Dominant-pose selection - picks the single most relevant pose per frame

use crate::models::pose::Pose;

/// Select the pose with the largest bounding-box area
///
/// Ties break toward the earliest pose in detection order: a candidate only
/// replaces the current best when its area is strictly greater. Pure
/// function of its input; identical input ordering gives identical output.
pub fn dominant_pose(poses: &[Pose]) -> Option<&Pose> {
    let mut best: Option<(&Pose, f32)> = None;

    for pose in poses {
        let area = pose.area();
        match best {
            Some((_, best_area)) if area <= best_area => {}
            _ => best = Some((pose, area)),
        }
    }

    best.map(|(pose, _)| pose)
}

use serde::{Deserialize, Serialize};

use crate::models::prediction::{PipelineError, PipelineResult};

/// Minimum fraction of window slots that must hold a real pose before the
/// classifier is invoked. Fixed domain constant; exactly 60% passes.
pub const COVERAGE_THRESHOLD: f32 = 0.60;

/// Minimum classifier confidence for a prediction to survive the confidence
/// filter. Fixed domain constant; exactly 0.60 passes.
pub const CONFIDENCE_THRESHOLD: f32 = 0.60;

/// Pipeline configuration
///
/// Window capacity is not configured here: it is read once from the
/// classifier model's metadata at startup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PipelineConfig {
    /// Number of oldest slots evicted once the window is full; also the
    /// frame span each completed prediction covers
    pub window_stride: usize,
    /// Frame rate the model was trained at, used to convert frame counts
    /// to elapsed seconds
    pub model_frame_rate: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            window_stride: 10,
            model_frame_rate: 120.0,
        }
    }
}

impl PipelineConfig {
    /// Validate configuration values
    ///
    /// The stride-versus-capacity relation is checked later, once the model
    /// metadata supplies the window capacity.
    pub fn validate(&self) -> PipelineResult<()> {
        if self.window_stride == 0 {
            return Err(PipelineError::InvalidConfig(
                "window stride must be at least 1".to_string(),
            ));
        }

        if self.model_frame_rate <= 0.0 {
            return Err(PipelineError::InvalidConfig(format!(
                "model frame rate must be positive, got {}",
                self.model_frame_rate
            )));
        }

        Ok(())
    }
}

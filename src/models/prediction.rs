// Data models for action predictions and pipeline errors

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==============================================================================
// Sentinel Labels
// ==============================================================================

/// Shown before the first window completes and after a source swap
pub const STARTING_LABEL: &str = "Starting";
/// Emitted when a completed window has too few frames with a detected pose
pub const NO_PERSON_LABEL: &str = "No Person";
/// Emitted when the classifier's top probability falls below the threshold
pub const LOW_CONFIDENCE_LABEL: &str = "Low Confidence";
/// Emitted when the classifier call itself fails for one window
pub const INFERENCE_ERROR_LABEL: &str = "Inference Error";

/// Labels the pipeline produces itself; a model's label set may not
/// contain any of these
pub const SENTINEL_LABELS: [&str; 4] = [
    STARTING_LABEL,
    NO_PERSON_LABEL,
    LOW_CONFIDENCE_LABEL,
    INFERENCE_ERROR_LABEL,
];

// ==============================================================================
// Action Prediction
// ==============================================================================

/// The outcome for one completed prediction window
///
/// Either a real model label with its confidence, or a sentinel describing a
/// pipeline-level state. Sentinels carry no confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionPrediction {
    pub label: String,
    pub confidence: Option<f32>,
}

impl ActionPrediction {
    pub fn new(label: impl Into<String>, confidence: f32) -> Self {
        Self {
            label: label.into(),
            confidence: Some(confidence),
        }
    }

    pub fn starting() -> Self {
        Self::sentinel(STARTING_LABEL)
    }

    pub fn no_person() -> Self {
        Self::sentinel(NO_PERSON_LABEL)
    }

    pub fn low_confidence() -> Self {
        Self::sentinel(LOW_CONFIDENCE_LABEL)
    }

    pub fn inference_error() -> Self {
        Self::sentinel(INFERENCE_ERROR_LABEL)
    }

    fn sentinel(label: &str) -> Self {
        Self {
            label: label.to_string(),
            confidence: None,
        }
    }

    /// True when the label came from the classifier, not the pipeline
    pub fn is_model_label(&self) -> bool {
        !SENTINEL_LABELS.contains(&self.label.as_str())
    }

    /// Display text for the confidence, e.g. "87%"; `None` for sentinels
    pub fn confidence_text(&self) -> Option<String> {
        self.confidence.map(|c| format!("{:.0}%", c * 100.0))
    }
}

// ==============================================================================
// Classifier Output
// ==============================================================================

/// Raw classifier output: the top label plus the full distribution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    pub label: String,
    pub probabilities: HashMap<String, f32>,
}

impl Classification {
    /// Probability the classifier assigned to its own top label
    pub fn confidence(&self) -> f32 {
        self.probabilities.get(&self.label).copied().unwrap_or(0.0)
    }
}

// ==============================================================================
// Error Types
// ==============================================================================

/// Startup configuration errors; these halt pipeline construction before
/// any frame is processed
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid model metadata: {0}")]
    InvalidMetadata(String),

    #[error("Model has an empty label set")]
    EmptyLabelSet,

    #[error("Model label `{0}` collides with a pipeline sentinel label")]
    SentinelCollision(String),
}

pub type PipelineResult<T> = Result<T, PipelineError>;

/// Steady-state classifier failure for a single window
///
/// Recoverable: the pipeline emits an `Inference Error` sentinel for the
/// affected window and keeps processing.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("Inference failed: {0}")]
    InferenceFailed(String),

    #[error("Input width mismatch: expected {expected}, got {actual}")]
    InputWidthMismatch { expected: usize, actual: usize },
}

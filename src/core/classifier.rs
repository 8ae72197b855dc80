// External seam for the pretrained action-classification model

use tracing::info;

use crate::core::encoder::FEATURE_WIDTH;
use crate::models::prediction::{
    Classification, ClassifierError, PipelineError, PipelineResult, SENTINEL_LABELS,
};

/// Black-box window classifier
///
/// The pipeline reads the model's metadata (label set, window length,
/// feature width) once at startup and treats `classify` as a stateless
/// call thereafter. Instances are safe for sequential reuse across windows.
pub trait ActionClassifier: Send {
    /// The model's fixed class labels
    fn labels(&self) -> &[String];

    /// Window capacity in frames, from the model's input description
    fn window_length(&self) -> usize;

    /// Per-frame feature width the model expects
    fn feature_width(&self) -> usize;

    /// Classify one completed window of `window_length * feature_width`
    /// values in temporal order
    fn classify(&self, input: &[f32]) -> Result<Classification, ClassifierError>;
}

/// Startup validation of classifier metadata against pipeline expectations
///
/// Fails fast before any frame is processed. Steady-state classification
/// failures are handled separately and never reach this path.
pub fn validate_model(
    classifier: &dyn ActionClassifier,
    window_stride: usize,
) -> PipelineResult<()> {
    let labels = classifier.labels();
    if labels.is_empty() {
        return Err(PipelineError::EmptyLabelSet);
    }

    for label in labels {
        if SENTINEL_LABELS.contains(&label.as_str()) {
            return Err(PipelineError::SentinelCollision(label.clone()));
        }
    }

    let window_length = classifier.window_length();
    if window_length == 0 {
        return Err(PipelineError::InvalidMetadata(
            "model window length is zero".to_string(),
        ));
    }
    if window_stride >= window_length {
        return Err(PipelineError::InvalidConfig(format!(
            "window stride {} must be smaller than the model window length {}",
            window_stride, window_length
        )));
    }

    if classifier.feature_width() != FEATURE_WIDTH {
        return Err(PipelineError::InvalidMetadata(format!(
            "model expects feature width {}, encoder produces {}",
            classifier.feature_width(),
            FEATURE_WIDTH
        )));
    }

    info!(
        window_length,
        window_stride,
        labels = labels.len(),
        "classifier model validated"
    );
    Ok(())
}

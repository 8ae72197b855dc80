//! Recognizes a human exercise in near-real time from a live video stream.
//!
//! Frames flow through a synchronous per-frame pipeline: pose detection
//! (external seam), dominant-pose selection, feature encoding, sliding-window
//! aggregation, coverage gating, classification (external seam), confidence
//! filtering, and per-label duration aggregation. Presentation layers consume
//! results through an asynchronous event channel.

pub mod core;
pub mod models;

pub use crate::core::aggregator::{ActionFrameCounts, RecognitionSession};
pub use crate::core::classifier::ActionClassifier;
pub use crate::core::config::PipelineConfig;
pub use crate::core::detector::PoseDetector;
pub use crate::core::pipeline::{ActionPipeline, PipelineEvent};
pub use crate::models::frame::VideoFrame;
pub use crate::models::pose::Pose;
pub use crate::models::prediction::{ActionPrediction, Classification};

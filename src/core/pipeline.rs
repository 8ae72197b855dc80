// Orchestrates the per-frame processing chain from pose detection to
// duration aggregation

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::core::aggregator::RecognitionSession;
use crate::core::classifier::{validate_model, ActionClassifier};
use crate::core::config::{PipelineConfig, CONFIDENCE_THRESHOLD};
use crate::core::detector::PoseDetector;
use crate::core::encoder::encode;
use crate::core::selector::dominant_pose;
use crate::core::window::PredictionWindow;
use crate::models::frame::VideoFrame;
use crate::models::pose::Pose;
use crate::models::prediction::{ActionPrediction, PipelineResult};

/// Events delivered asynchronously to a presentation layer
///
/// Delivery happens strictly after the pipeline has produced its result;
/// a slow subscriber loses events rather than stalling frame processing.
#[derive(Debug, Clone)]
pub enum PipelineEvent {
    /// Per-frame: all detected poses plus the source frame, for overlay
    /// rendering
    PosesDetected {
        poses: Vec<Pose>,
        frame: Arc<VideoFrame>,
    },
    /// Per completed window: the prediction and the frame span it covers
    /// (the window stride)
    ActionPredicted {
        prediction: ActionPrediction,
        frame_span: usize,
    },
}

/// Lightweight per-pipeline counters
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineStats {
    pub frames_seen: u64,
    pub predictions_emitted: u64,
    pub windows_below_coverage: u64,
}

/// The streaming window-classification pipeline
///
/// A single logical thread of execution owns this state machine: each frame
/// runs to completion through selection, encoding, window aggregation,
/// gating, coverage checking, classification, confidence filtering, and
/// aggregation before the next frame is admitted, so window mutation needs
/// no locking. The upstream source is responsible for dropping frames it
/// cannot deliver in time; the pipeline never queues unprocessed frames.
pub struct ActionPipeline<D, C> {
    detector: D,
    classifier: C,
    config: PipelineConfig,
    window: PredictionWindow,
    session: RecognitionSession,
    events: Option<mpsc::Sender<PipelineEvent>>,
    stats: PipelineStats,
}

impl<D: PoseDetector, C: ActionClassifier> ActionPipeline<D, C> {
    /// Build a pipeline around injected detector and classifier handles
    ///
    /// Validates configuration and classifier metadata up front; any error
    /// here is unrecoverable and no frame is processed.
    pub fn new(detector: D, classifier: C, config: PipelineConfig) -> PipelineResult<Self> {
        config.validate()?;
        validate_model(&classifier, config.window_stride)?;

        let window = PredictionWindow::new(classifier.window_length(), config.window_stride);
        info!(
            capacity = window.capacity(),
            stride = window.stride(),
            "action pipeline ready"
        );

        Ok(Self {
            detector,
            classifier,
            config,
            window,
            session: RecognitionSession::new(),
            events: None,
            stats: PipelineStats::default(),
        })
    }

    /// Open the asynchronous presentation boundary
    ///
    /// Returns the receiving half of a bounded channel; a `Starting`
    /// prediction is announced immediately so the subscriber has an initial
    /// state to display.
    pub fn subscribe(&mut self, buffer: usize) -> mpsc::Receiver<PipelineEvent> {
        let (tx, rx) = mpsc::channel(buffer);
        self.events = Some(tx);
        self.announce_starting();
        rx
    }

    /// Process one frame through every stage, in arrival order
    ///
    /// Returns the window's prediction when this frame completed a window,
    /// `None` otherwise. The same prediction is also published on the event
    /// channel together with the frame span it covers.
    pub fn process_frame(&mut self, frame: VideoFrame) -> Option<ActionPrediction> {
        self.stats.frames_seen += 1;
        let frame = Arc::new(frame);

        let poses = match self.detector.detect(&frame) {
            Ok(poses) => poses,
            Err(error) => {
                warn!(%error, "pose detection failed, treating frame as empty");
                Vec::new()
            }
        };

        self.emit(PipelineEvent::PosesDetected {
            poses: poses.clone(),
            frame: Arc::clone(&frame),
        });

        let slot = encode(dominant_pose(&poses));
        self.window.push(slot);

        if !self.window.is_full() {
            return None;
        }

        let prediction = self.evaluate_window();
        self.session
            .record(&prediction, self.config.window_stride as u64);
        self.stats.predictions_emitted += 1;
        self.emit(PipelineEvent::ActionPredicted {
            prediction: prediction.clone(),
            frame_span: self.config.window_stride,
        });

        Some(prediction)
    }

    /// Classify a full window, or short-circuit to a sentinel
    fn evaluate_window(&mut self) -> ActionPrediction {
        if !self.window.has_coverage() {
            // Under-populated window: the classifier is not invoked
            self.stats.windows_below_coverage += 1;
            return ActionPrediction::no_person();
        }

        let input = self.window.completed_input();
        match self.classifier.classify(&input) {
            Ok(classification) => {
                let confidence = classification.confidence();
                if confidence < CONFIDENCE_THRESHOLD {
                    ActionPrediction::low_confidence()
                } else {
                    ActionPrediction::new(classification.label, confidence)
                }
            }
            Err(error) => {
                warn!(%error, "classification failed for one window, continuing");
                ActionPrediction::inference_error()
            }
        }
    }

    /// React to an upstream source swap (camera change, orientation change)
    ///
    /// Atomically discards the window so no slots carry over between
    /// sources. Session frame counts persist.
    pub fn reconfigure(&mut self) {
        self.window.reset();
        info!("frame source reconfigured, prediction window reset");
        self.announce_starting();
    }

    fn announce_starting(&self) {
        self.emit(PipelineEvent::ActionPredicted {
            prediction: ActionPrediction::starting(),
            frame_span: 0,
        });
    }

    fn emit(&self, event: PipelineEvent) {
        if let Some(tx) = &self.events {
            if tx.try_send(event).is_err() {
                debug!("subscriber not keeping up, dropping pipeline event");
            }
        }
    }

    pub fn session(&self) -> &RecognitionSession {
        &self.session
    }

    pub fn stats(&self) -> &PipelineStats {
        &self.stats
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Current window fill level, mainly for diagnostics
    pub fn window_len(&self) -> usize {
        self.window.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, VecDeque};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use crate::core::encoder::FEATURE_WIDTH;
    use crate::models::frame::PixelFormat;
    use crate::models::pose::{DetectionError, DetectionResult, Keypoint};
    use crate::models::prediction::{Classification, ClassifierError};

    fn frame() -> VideoFrame {
        VideoFrame {
            timestamp: 0,
            width: 640,
            height: 480,
            data: Vec::new(),
            format: PixelFormat::BGRA8,
        }
    }

    fn person() -> Pose {
        Pose::new(vec![
            Keypoint::new(0.2, 0.2, 1.0),
            Keypoint::new(0.8, 0.8, 1.0),
        ])
    }

    /// Replays a scripted detection result per frame; empty after the
    /// script runs out
    struct ScriptedDetector {
        script: VecDeque<DetectionResult<Vec<Pose>>>,
    }

    impl ScriptedDetector {
        fn new(script: Vec<DetectionResult<Vec<Pose>>>) -> Self {
            Self {
                script: script.into(),
            }
        }

        fn person_frames(count: usize) -> Self {
            Self::new((0..count).map(|_| Ok(vec![person()])).collect())
        }
    }

    impl PoseDetector for ScriptedDetector {
        fn detect(&mut self, _frame: &VideoFrame) -> DetectionResult<Vec<Pose>> {
            self.script.pop_front().unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    /// Pops scripted classifications, falling back to a confident "SG";
    /// counts every invocation
    struct ScriptedClassifier {
        labels: Vec<String>,
        window_length: usize,
        responses: Mutex<VecDeque<Result<Classification, ClassifierError>>>,
        calls: Arc<AtomicUsize>,
    }

    impl ScriptedClassifier {
        fn new(window_length: usize) -> Self {
            Self {
                labels: vec!["ID".to_string(), "Rest".to_string(), "SG".to_string()],
                window_length,
                responses: Mutex::new(VecDeque::new()),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn with_responses(
            window_length: usize,
            responses: Vec<Result<Classification, ClassifierError>>,
        ) -> Self {
            let classifier = Self::new(window_length);
            *classifier.responses.lock().unwrap() = responses.into();
            classifier
        }

        fn call_counter(&self) -> Arc<AtomicUsize> {
            Arc::clone(&self.calls)
        }
    }

    fn classification(label: &str, confidence: f32) -> Classification {
        let mut probabilities = HashMap::new();
        probabilities.insert(label.to_string(), confidence);
        Classification {
            label: label.to_string(),
            probabilities,
        }
    }

    impl ActionClassifier for ScriptedClassifier {
        fn labels(&self) -> &[String] {
            &self.labels
        }

        fn window_length(&self) -> usize {
            self.window_length
        }

        fn feature_width(&self) -> usize {
            FEATURE_WIDTH
        }

        fn classify(&self, input: &[f32]) -> Result<Classification, ClassifierError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(input.len(), self.window_length * FEATURE_WIDTH);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(classification("SG", 0.9)))
        }
    }

    fn pipeline_with(
        detector: ScriptedDetector,
        classifier: ScriptedClassifier,
        stride: usize,
    ) -> ActionPipeline<ScriptedDetector, ScriptedClassifier> {
        let config = PipelineConfig {
            window_stride: stride,
            model_frame_rate: 120.0,
        };
        ActionPipeline::new(detector, classifier, config).unwrap()
    }

    #[test]
    fn test_end_to_end_gate_periodicity() {
        // Capacity 5, stride 2: predictions at frames 5, 7, 9, ...
        let mut pipeline = pipeline_with(
            ScriptedDetector::person_frames(9),
            ScriptedClassifier::new(5),
            2,
        );

        let mut predicted_at = Vec::new();
        for frame_index in 1..=9 {
            if pipeline.process_frame(frame()).is_some() {
                predicted_at.push(frame_index);
            }
        }

        assert_eq!(predicted_at, vec![5, 7, 9]);
    }

    #[test]
    fn test_insufficient_coverage_skips_classifier() {
        // 2 person frames then 3 empty: 2 present out of 5 misses the
        // 3-slot minimum
        let detector = ScriptedDetector::new(vec![
            Ok(vec![person()]),
            Ok(vec![person()]),
            Ok(Vec::new()),
            Ok(Vec::new()),
            Ok(Vec::new()),
        ]);
        let classifier = ScriptedClassifier::new(5);
        let calls = classifier.call_counter();
        let mut pipeline = pipeline_with(detector, classifier, 2);

        let mut prediction = None;
        for _ in 0..5 {
            prediction = pipeline.process_frame(frame());
        }

        assert_eq!(prediction, Some(ActionPrediction::no_person()));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(pipeline.stats().windows_below_coverage, 1);
    }

    #[test]
    fn test_exact_coverage_boundary_invokes_classifier() {
        // 3 person frames then 2 empty: exactly 60%, classifier runs
        let detector = ScriptedDetector::new(vec![
            Ok(vec![person()]),
            Ok(vec![person()]),
            Ok(vec![person()]),
            Ok(Vec::new()),
            Ok(Vec::new()),
        ]);
        let classifier = ScriptedClassifier::new(5);
        let calls = classifier.call_counter();
        let mut pipeline = pipeline_with(detector, classifier, 2);

        let mut prediction = None;
        for _ in 0..5 {
            prediction = pipeline.process_frame(frame());
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(prediction.unwrap().label, "SG");
    }

    #[test]
    fn test_confidence_boundary() {
        let classifier = ScriptedClassifier::with_responses(
            5,
            vec![
                Ok(classification("SG", 0.60)),
                Ok(classification("SG", 0.59)),
            ],
        );
        let mut pipeline =
            pipeline_with(ScriptedDetector::person_frames(7), classifier, 2);

        let mut predictions = Vec::new();
        for _ in 0..7 {
            if let Some(prediction) = pipeline.process_frame(frame()) {
                predictions.push(prediction);
            }
        }

        // Exactly 0.60 passes through unchanged
        assert_eq!(predictions[0].label, "SG");
        assert_eq!(predictions[0].confidence, Some(0.60));
        // 0.59 is downgraded
        assert_eq!(predictions[1], ActionPrediction::low_confidence());
    }

    #[test]
    fn test_classification_failure_is_recoverable() {
        let classifier = ScriptedClassifier::with_responses(
            5,
            vec![Err(ClassifierError::InferenceFailed(
                "backend unavailable".to_string(),
            ))],
        );
        let mut pipeline =
            pipeline_with(ScriptedDetector::person_frames(7), classifier, 2);

        let mut predictions = Vec::new();
        for _ in 0..7 {
            if let Some(prediction) = pipeline.process_frame(frame()) {
                predictions.push(prediction);
            }
        }

        // One bad inference degrades to a sentinel; the next window is fine
        assert_eq!(predictions[0], ActionPrediction::inference_error());
        assert_eq!(predictions[1].label, "SG");
    }

    #[test]
    fn test_detection_error_counts_as_missing() {
        let detector = ScriptedDetector::new(vec![
            Ok(vec![person()]),
            Ok(vec![person()]),
            Err(DetectionError::DetectorFailure("timeout".to_string())),
            Err(DetectionError::DetectorFailure("timeout".to_string())),
            Err(DetectionError::DetectorFailure("timeout".to_string())),
        ]);
        let classifier = ScriptedClassifier::new(5);
        let calls = classifier.call_counter();
        let mut pipeline = pipeline_with(detector, classifier, 2);

        let mut prediction = None;
        for _ in 0..5 {
            prediction = pipeline.process_frame(frame());
        }

        // Errors behave exactly like empty frames: 2 present out of 5
        assert_eq!(prediction, Some(ActionPrediction::no_person()));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_aggregation_credits_stride_per_window() {
        let mut pipeline = pipeline_with(
            ScriptedDetector::person_frames(35),
            ScriptedClassifier::new(15),
            10,
        );
        for _ in 0..35 {
            pipeline.process_frame(frame());
        }

        // Windows complete at frames 15, 25, and 35: three "SG" predictions
        // at stride 10 each
        assert_eq!(pipeline.session().counts().get("SG"), Some(&30));
    }

    #[test]
    fn test_invalid_stride_rejected_at_construction() {
        let config = PipelineConfig {
            window_stride: 10,
            model_frame_rate: 120.0,
        };
        let result = ActionPipeline::new(
            ScriptedDetector::person_frames(0),
            ScriptedClassifier::new(5),
            config,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_reconfigure_resets_window_but_keeps_counts() {
        let mut pipeline = pipeline_with(
            ScriptedDetector::person_frames(20),
            ScriptedClassifier::new(5),
            2,
        );

        for _ in 0..5 {
            pipeline.process_frame(frame());
        }
        let counts_before = pipeline.session().counts().clone();
        assert_eq!(counts_before.get("SG"), Some(&2));

        pipeline.reconfigure();
        assert_eq!(pipeline.window_len(), 0);
        assert_eq!(pipeline.session().counts(), &counts_before);

        // After the reset the gate reopens only once 5 fresh frames arrive
        let mut predicted_after = Vec::new();
        for frame_index in 1..=5 {
            if pipeline.process_frame(frame()).is_some() {
                predicted_after.push(frame_index);
            }
        }
        assert_eq!(predicted_after, vec![5]);
    }

    #[tokio::test]
    async fn test_event_channel_delivery() {
        let mut pipeline = pipeline_with(
            ScriptedDetector::person_frames(5),
            ScriptedClassifier::new(5),
            2,
        );
        let mut rx = pipeline.subscribe(32);

        // Subscribing announces the starting state
        match rx.recv().await.unwrap() {
            PipelineEvent::ActionPredicted { prediction, .. } => {
                assert_eq!(prediction, ActionPrediction::starting());
            }
            other => panic!("expected starting prediction, got {:?}", other),
        }

        for _ in 0..5 {
            pipeline.process_frame(frame());
        }

        let mut overlay_events = 0;
        let mut prediction_events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            match event {
                PipelineEvent::PosesDetected { poses, .. } => {
                    assert_eq!(poses.len(), 1);
                    overlay_events += 1;
                }
                PipelineEvent::ActionPredicted {
                    prediction,
                    frame_span,
                } => {
                    prediction_events.push((prediction, frame_span));
                }
            }
        }

        assert_eq!(overlay_events, 5);
        assert_eq!(prediction_events.len(), 1);
        assert_eq!(prediction_events[0].0.label, "SG");
        assert_eq!(prediction_events[0].1, 2);
    }
}

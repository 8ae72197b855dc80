// Session-level aggregation of recognized action durations

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::prediction::ActionPrediction;

/// Accumulated frame count per real model label
///
/// Sentinel labels never appear as keys; values are monotonically
/// non-decreasing for the life of a session.
pub type ActionFrameCounts = HashMap<String, u64>;

/// One user session of action recognition
///
/// Owns the running per-label frame totals. The session persists across
/// pipeline reconfiguration (camera swaps reset the window, not the counts)
/// and is read, not mutated, by the presentation layer.
#[derive(Debug)]
pub struct RecognitionSession {
    id: Uuid,
    started_at: DateTime<Utc>,
    counts: ActionFrameCounts,
}

impl RecognitionSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            counts: ActionFrameCounts::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Credit one completed window's frame span to its label
    ///
    /// Sentinel predictions never update the totals; the decision is made
    /// purely by label identity.
    pub fn record(&mut self, prediction: &ActionPrediction, frame_span: u64) {
        if prediction.is_model_label() {
            *self.counts.entry(prediction.label.clone()).or_insert(0) += frame_span;
        }
    }

    /// Read-only snapshot of the per-label totals
    pub fn counts(&self) -> &ActionFrameCounts {
        &self.counts
    }
}

impl Default for RecognitionSession {
    fn default() -> Self {
        Self::new()
    }
}

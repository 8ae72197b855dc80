// Presentation-side summary of accumulated action durations

use serde::{Deserialize, Serialize};

use crate::core::aggregator::ActionFrameCounts;

/// One row of the session summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionSummaryEntry {
    pub label: String,
    pub frames: u64,
    pub seconds: f64,
}

/// Convert the frame-count snapshot into display rows, longest first
///
/// Elapsed time is `frames / model_frame_rate`; the conversion lives here,
/// on the presentation side, not in the pipeline. Equal counts sort by
/// label so the ordering is stable.
pub fn summarize(counts: &ActionFrameCounts, model_frame_rate: f64) -> Vec<ActionSummaryEntry> {
    let mut entries: Vec<ActionSummaryEntry> = counts
        .iter()
        .map(|(label, frames)| ActionSummaryEntry {
            label: label.clone(),
            frames: *frames,
            seconds: *frames as f64 / model_frame_rate,
        })
        .collect();

    entries.sort_by(|a, b| b.frames.cmp(&a.frames).then_with(|| a.label.cmp(&b.label)));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_sorted_by_descending_frames() {
        let mut counts = ActionFrameCounts::new();
        counts.insert("Rest".to_string(), 120);
        counts.insert("SG".to_string(), 360);
        counts.insert("ID".to_string(), 240);

        let entries = summarize(&counts, 120.0);

        let labels: Vec<&str> = entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["SG", "ID", "Rest"]);
    }

    #[test]
    fn test_duration_conversion_uses_model_frame_rate() {
        let mut counts = ActionFrameCounts::new();
        counts.insert("SG".to_string(), 360);

        let entries = summarize(&counts, 120.0);
        assert!((entries[0].seconds - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_counts_give_empty_summary() {
        let counts = ActionFrameCounts::new();
        assert!(summarize(&counts, 120.0).is_empty());
    }
}

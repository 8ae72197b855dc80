// Sliding prediction window with stride-based eviction

use crate::core::encoder::{empty_pose_vector, WindowSlot, FEATURE_WIDTH};

/// Fixed-capacity ordered buffer of per-frame window slots
///
/// Capacity comes from the classifier model's metadata; stride is the
/// number of oldest slots evicted once the window is full. With capacity C
/// and stride S (0 < S < C), the window is exactly full after C pushes and
/// again every S pushes thereafter, and only at those moments. Each
/// completed window covers the most recent C frames, overlapping the
/// previous one by C - S frames.
#[derive(Debug)]
pub struct PredictionWindow {
    slots: Vec<WindowSlot>,
    capacity: usize,
    stride: usize,
}

impl PredictionWindow {
    /// Create an empty window; the stride/capacity relation is validated at
    /// pipeline construction
    pub fn new(capacity: usize, stride: usize) -> Self {
        debug_assert!(stride > 0 && stride < capacity);
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
            stride,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Append one slot, evicting the oldest `stride` slots first when the
    /// window is at capacity
    pub fn push(&mut self, slot: WindowSlot) {
        if self.slots.len() == self.capacity {
            self.slots.drain(..self.stride);
        }
        self.slots.push(slot);
    }

    /// Admission gate: a window is evaluated only when exactly at capacity
    pub fn is_full(&self) -> bool {
        self.slots.len() == self.capacity
    }

    /// Number of slots holding a real feature vector
    pub fn present_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_present()).count()
    }

    /// Minimum present slots required to attempt classification: 60% of
    /// capacity, integer floor, compared inclusively
    pub fn min_required(&self) -> usize {
        self.capacity * 60 / 100
    }

    /// True when the window holds enough real data to be worth classifying
    pub fn has_coverage(&self) -> bool {
        self.present_count() >= self.min_required()
    }

    /// Build the classifier input for a full window: every slot's vector in
    /// temporal order, with missing slots replaced by the neutral
    /// placeholder. Output width is `capacity * FEATURE_WIDTH`.
    pub fn completed_input(&self) -> Vec<f32> {
        debug_assert!(self.is_full());

        let mut input = Vec::with_capacity(self.capacity * FEATURE_WIDTH);
        for slot in &self.slots {
            match slot {
                WindowSlot::Present(vector) => input.extend_from_slice(vector),
                WindowSlot::Missing => input.extend_from_slice(&empty_pose_vector()),
            }
        }
        input
    }

    /// Discard all slots, e.g. when the upstream frame source is swapped
    pub fn reset(&mut self) {
        self.slots.clear();
    }
}

//! Fixed-capacity sliding window for staleness tracking
//!
//! ## Overview
//!
//! Staleness asks whether the current reading equals the previous
//! `threshold - 1` readings of the same sensor. Re-scanning the column for
//! every row would be O(rows × threshold) with random access; instead each
//! sensor carries a small window of its most recent readings, updated once per
//! row in row order. The pass can then run as a stream.
//!
//! ### Why `heapless::Deque`?
//!
//! The window never grows past the configured depth and the depth is bounded
//! by [`STALE_WINDOW_CAPACITY`], so a fixed-capacity ring gives O(1) push and
//! pop with no per-sensor heap allocation.
//!
//! ```text
//! threshold = 3, depth = 2
//!
//! row:      0    1    2    3    4    5
//! value:  100  100  100  100  100  105
//! window: [ ] [100] [100,100] [100,100] [100,100] [100,100]
//! stale:   -    -    yes  yes  yes   -
//! ```
//!
//! ## Usage Example
//!
//! ```rust
//! use quartergrid_core::window::RunWindow;
//!
//! let mut window = RunWindow::new(2);
//! assert!(!window.observe(Some(100.0)));
//! assert!(!window.observe(Some(100.0)));
//! assert!(window.observe(Some(100.0)));
//! assert!(!window.observe(Some(105.0)));
//! ```

use heapless::Deque;

use crate::constants::quality::STALE_WINDOW_CAPACITY;

/// Most recent readings of one sensor, oldest first
///
/// A `None` slot is a missing or non-numeric reading and never equals anything.
#[derive(Debug, Clone)]
pub struct RunWindow {
    /// Previous readings, at most `depth` of them
    slots: Deque<Option<f64>, STALE_WINDOW_CAPACITY>,

    /// Number of previous readings compared against the current one
    depth: usize,
}

impl RunWindow {
    /// Window comparing each reading with the `depth` before it
    ///
    /// `depth` is clamped to `1..=STALE_WINDOW_CAPACITY`; configuration
    /// validation rejects thresholds outside that range before a window is
    /// ever built.
    pub fn new(depth: usize) -> Self {
        Self {
            slots: Deque::new(),
            depth: depth.clamp(1, STALE_WINDOW_CAPACITY),
        }
    }

    /// Window for a staleness threshold (consecutive readings incl. current)
    pub fn for_threshold(threshold: usize) -> Self {
        Self::new(threshold.saturating_sub(1))
    }

    /// Previous readings compared against each new one
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of readings currently held
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if no readings are held
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Check if `value` would extend a run covering the whole window
    pub fn repeats(&self, value: f64) -> bool {
        self.slots.len() == self.depth && self.slots.iter().all(|slot| *slot == Some(value))
    }

    /// Record the next reading, returning whether it is stale
    ///
    /// Stale means non-zero and equal to every reading in a full window.
    pub fn observe(&mut self, value: Option<f64>) -> bool {
        let stale = matches!(value, Some(v) if v != 0.0 && self.repeats(v));

        if self.slots.len() == self.depth {
            self.slots.pop_front();
        }
        // Cannot fail: a slot was freed above whenever the window was full
        let _ = self.slots.push_back(value);

        stale
    }

    /// Forget all readings
    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

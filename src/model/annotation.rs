// Markers and arrows drawn on top of the waveforms

use crate::model::signal::SignalId;
use serde::{Deserialize, Serialize};

/// Vertical marker at one sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    pub id: u32,
    pub sample: usize,
}

/// Arrow between two (signal, sample) points
///
/// Endpoints are stored by signal identity; use
/// [`WaveDocument::arrow_placements`](crate::document::WaveDocument::arrow_placements)
/// to get their current row positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arrow {
    pub id: u32,
    pub start_signal: SignalId,
    pub start_sample: usize,
    pub end_signal: SignalId,
    pub end_sample: usize,
}

impl Arrow {
    pub fn references(&self, signal: SignalId) -> bool {
        self.start_signal == signal || self.end_signal == signal
    }
}

/// An arrow resolved against the current signal order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrowPlacement {
    pub id: u32,
    pub start_signal: usize,
    pub start_sample: usize,
    pub end_signal: usize,
    pub end_sample: usize,
}

/// Per-kind id counter with max+1 compaction
///
/// After any removal the next id is recomputed from the live ids, so the
/// highest id is reused as soon as it is freed but never collides with a
/// live one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Id the next allocation will return
    pub fn peek(&self) -> u32 {
        self.next
    }

    pub fn allocate(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }

    pub fn recompute<I: IntoIterator<Item = u32>>(&mut self, live: I) {
        self.next = live.into_iter().max().map_or(1, |max| max + 1);
    }

    pub fn reset(&mut self) {
        self.next = 1;
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocator_counts_from_one() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.allocate(), 1);
        assert_eq!(ids.allocate(), 2);
        assert_eq!(ids.peek(), 3);
    }

    #[test]
    fn test_recompute_uses_live_max() {
        let mut ids = IdAllocator::new();
        ids.recompute([4, 2, 7]);
        assert_eq!(ids.peek(), 8);
        ids.recompute(std::iter::empty());
        assert_eq!(ids.peek(), 1);
    }

    #[test]
    fn test_arrow_references() {
        let a = SignalId::new();
        let b = SignalId::new();
        let arrow = Arrow {
            id: 1,
            start_signal: a,
            start_sample: 0,
            end_signal: a,
            end_sample: 3,
        };
        assert!(arrow.references(a));
        assert!(!arrow.references(b));
    }
}

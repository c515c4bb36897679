// DocumentSnapshot - Immutable copy of everything undo/redo restores

use crate::model::{Arrow, IdAllocator, Marker, Signal};

/// Full deep copy of the document's undoable state
///
/// Clipboards are not part of a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSnapshot {
    pub sample_count: usize,
    pub signals: Vec<Signal>,
    pub vcd_signals: Vec<Signal>,
    pub markers: Vec<Marker>,
    pub marker_ids: IdAllocator,
    pub arrows: Vec<Arrow>,
    pub arrow_ids: IdAllocator,
}

impl DocumentSnapshot {
    /// Id the next marker will receive
    pub fn next_marker_id(&self) -> u32 {
        self.marker_ids.peek()
    }

    /// Id the next arrow will receive
    pub fn next_arrow_id(&self) -> u32 {
        self.arrow_ids.peek()
    }
}

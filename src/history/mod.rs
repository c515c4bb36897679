// Snapshot-based undo/redo
//
// Every undoable edit records a full copy of the document state taken right
// before the edit. Undo swaps the live state with the top of the undo stack,
// redo does the mirror operation.

pub mod manager;
pub mod snapshot;

pub use manager::{DEFAULT_MAX_HISTORY, HistoryError, HistoryManager, HistoryResult};
pub use snapshot::DocumentSnapshot;

// Waveform data model
//
// Plain value types owned by the document: signals, markers, arrows and the
// block clipboard. None of them know about undo or change notification.

pub mod annotation;
pub mod block;
pub mod signal;

pub use annotation::{Arrow, ArrowPlacement, IdAllocator, Marker};
pub use block::BlockClipboard;
pub use signal::{Color, Signal, SignalId, SignalKind, UNDEFINED_VALUE};

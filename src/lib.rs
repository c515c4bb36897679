// WavePaint - Library exports for the editor front-end, tools and tests

pub mod config;
pub mod document;
pub mod history;
pub mod model;
pub mod project;
pub mod vcd;

// Re-export commonly used types for convenience
pub use config::{ConfigError, DocumentConfig, VcdOptions};
pub use document::{DocumentContents, DocumentEvent, ListenerId, WaveDocument};
pub use history::{DocumentSnapshot, HistoryError, HistoryManager};
pub use model::{
    Arrow, ArrowPlacement, BlockClipboard, Color, Marker, Signal, SignalId, SignalKind,
    UNDEFINED_VALUE,
};
pub use project::{FileError, FileFormat, JsonError, open_path, save_path};
pub use vcd::{ScopeNode, VcdError, VcdImporter, VcdLibrary};

// Document persistence for WavePaint
// Implements the JSON file format and extension-based file dispatch

pub mod manager;
pub mod serialization;
pub mod types;

pub use manager::{
    FileError, FileFormat, FileResult, WAVEPAINT_EXTENSION, open_path, save_path,
    with_wavepaint_extension,
};
pub use serialization::{JsonError, JsonResult, load_from_str, save_to_string};
pub use types::{MarkerRecord, SignalRecord, WaveFile};

// File dispatch by extension
//
// .vcd               -> VCD importer (load only)
// .wp, .json, none   -> JSON codec
// .fst, .ghw         -> recognised but not implemented
// anything else      -> tried as JSON

use crate::document::WaveDocument;
use crate::project::serialization::JsonError;
use crate::vcd::VcdError;
use std::path::{Path, PathBuf};

/// Extension given to saved documents
pub const WAVEPAINT_EXTENSION: &str = "wp";

/// File error types
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("{extension} files are not supported yet")]
    NotImplemented { extension: String },

    #[error("Cannot save in VCD format")]
    ReadOnlyFormat,

    #[error(transparent)]
    Vcd(#[from] VcdError),

    #[error(transparent)]
    Json(#[from] JsonError),
}

pub type FileResult<T> = Result<T, FileError>;

/// Formats recognised from a file extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileFormat {
    WavePaint,
    Vcd,
    Fst,
    Ghw,
    /// Unknown extension, handled as JSON
    Other(String),
}

impl FileFormat {
    /// Detect the format from the extension (case-insensitive)
    pub fn from_path(path: &Path) -> Self {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return FileFormat::WavePaint;
        };

        match ext.to_ascii_lowercase().as_str() {
            "wp" | "json" => FileFormat::WavePaint,
            "vcd" => FileFormat::Vcd,
            "fst" => FileFormat::Fst,
            "ghw" => FileFormat::Ghw,
            other => FileFormat::Other(other.to_string()),
        }
    }
}

/// Append `.wp` unless the path already ends in `.wp` or `.json`
pub fn with_wavepaint_extension(path: &Path) -> PathBuf {
    match FileFormat::from_path(path) {
        FileFormat::WavePaint if path.extension().is_some() => path.to_path_buf(),
        _ => {
            let mut name = path.as_os_str().to_os_string();
            name.push(".");
            name.push(WAVEPAINT_EXTENSION);
            PathBuf::from(name)
        }
    }
}

/// Load any supported file into the document
///
/// Returns the detected format. On error the document is unchanged.
pub fn open_path<P: AsRef<Path>>(doc: &mut WaveDocument, path: P) -> FileResult<FileFormat> {
    let path = path.as_ref();
    let format = FileFormat::from_path(path);

    match &format {
        FileFormat::Vcd => doc.load_vcd(path)?,
        FileFormat::Fst => {
            return Err(FileError::NotImplemented {
                extension: "fst".to_string(),
            });
        }
        FileFormat::Ghw => {
            return Err(FileError::NotImplemented {
                extension: "ghw".to_string(),
            });
        }
        FileFormat::WavePaint | FileFormat::Other(_) => doc.load_json(path)?,
    }

    Ok(format)
}

/// Save the document as JSON at exactly `path`
///
/// VCD and the unimplemented waveform formats cannot be written.
pub fn save_path<P: AsRef<Path>>(doc: &WaveDocument, path: P) -> FileResult<()> {
    let path = path.as_ref();
    match FileFormat::from_path(path) {
        FileFormat::Vcd => Err(FileError::ReadOnlyFormat),
        FileFormat::Fst => Err(FileError::NotImplemented {
            extension: "fst".to_string(),
        }),
        FileFormat::Ghw => Err(FileError::NotImplemented {
            extension: "ghw".to_string(),
        }),
        FileFormat::WavePaint | FileFormat::Other(_) => Ok(doc.save_json(path)?),
    }
}

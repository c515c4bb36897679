// JSON codec for WavePaint documents
//
// Saving writes visible signals and markers only. Arrows, the clipboards,
// the VCD library and the undo history are not persisted.

use crate::document::{DocumentContents, WaveDocument};
use crate::model::Marker;
use crate::project::types::{MarkerRecord, SignalRecord, WaveFile};
use log::{info, warn};
use std::fs;
use std::path::Path;

/// JSON codec error types
#[derive(Debug, thiserror::Error)]
pub enum JsonError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid sample count: {0}")]
    InvalidSampleCount(i64),
}

pub type JsonResult<T> = Result<T, JsonError>;

/// Build the file representation of a document
pub fn to_wave_file(doc: &WaveDocument) -> WaveFile {
    WaveFile {
        sample_count: doc.sample_count() as i64,
        signals: doc
            .signal_list()
            .iter()
            .map(SignalRecord::from_signal)
            .collect(),
        markers: doc
            .marker_list()
            .iter()
            .map(|m| MarkerRecord {
                id: i64::from(m.id),
                sample: m.sample as i64,
            })
            .collect(),
    }
}

/// Validate a parsed file and turn it into document contents
///
/// Signals keep their order; arrays are truncated or padded to the sample
/// count. Markers with a non-positive id, an out-of-range sample, or an id or
/// sample already taken are skipped. A sample count that is not positive
/// or exceeds `max_sample_count` is rejected before anything is allocated.
pub fn from_wave_file(file: &WaveFile, max_sample_count: usize) -> JsonResult<DocumentContents> {
    let sample_count = usize::try_from(file.sample_count)
        .ok()
        .filter(|n| (1..=max_sample_count).contains(n))
        .ok_or(JsonError::InvalidSampleCount(file.sample_count))?;

    let signals = file
        .signals
        .iter()
        .map(|record| record.to_signal(sample_count))
        .collect();

    let mut markers: Vec<Marker> = Vec::with_capacity(file.markers.len());
    for record in &file.markers {
        let id = u32::try_from(record.id).ok().filter(|id| *id > 0);
        let sample = usize::try_from(record.sample)
            .ok()
            .filter(|s| *s < sample_count);

        match (id, sample) {
            (Some(id), Some(sample))
                if !markers.iter().any(|m| m.id == id || m.sample == sample) =>
            {
                markers.push(Marker { id, sample });
            }
            _ => warn!(
                "skipping marker id={} sample={}",
                record.id, record.sample
            ),
        }
    }
    markers.sort_by_key(|m| m.sample);

    Ok(DocumentContents {
        sample_count,
        signals,
        vcd_signals: Vec::new(),
        markers,
    })
}

/// Serialize a document to pretty-printed JSON
pub fn save_to_string(doc: &WaveDocument) -> JsonResult<String> {
    Ok(serde_json::to_string_pretty(&to_wave_file(doc))?)
}

/// Parse JSON text into document contents without touching any document
pub fn load_from_str(text: &str, max_sample_count: usize) -> JsonResult<DocumentContents> {
    let file: WaveFile = serde_json::from_str(text)?;
    from_wave_file(&file, max_sample_count)
}

impl WaveDocument {
    /// Write the document as JSON
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> JsonResult<()> {
        let path = path.as_ref();
        fs::write(path, save_to_string(self)?)?;
        info!("saved {} signals to {}", self.signal_list().len(), path.display());
        Ok(())
    }

    /// Replace the document with the contents of a JSON file
    ///
    /// The file is fully parsed and validated first; on error the document
    /// is left untouched. On success the VCD library and arrows are cleared.
    /// No undo step is recorded.
    pub fn load_json<P: AsRef<Path>>(&mut self, path: P) -> JsonResult<()> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        self.load_json_str(&text)?;
        info!(
            "loaded {} signals from {}",
            self.signal_list().len(),
            path.display()
        );
        Ok(())
    }

    /// Same as [`load_json`](Self::load_json) for in-memory text
    pub fn load_json_str(&mut self, text: &str) -> JsonResult<()> {
        let contents = load_from_str(text, self.config().max_sample_count)?;
        self.replace_contents(contents);
        Ok(())
    }

    pub fn to_json_string(&self) -> JsonResult<String> {
        save_to_string(self)
    }
}

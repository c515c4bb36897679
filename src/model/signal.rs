// Signal types shared by the document, the clipboards and the codecs

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Sample value meaning "no known value at this sample"
pub const UNDEFINED_VALUE: i64 = -1;

/// Stable identity of a signal
///
/// Assigned once when a signal is created and kept across moves, renames and
/// undo/redo. Arrows refer to signals through this id rather than through
/// their position in the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignalId(Uuid);

impl SignalId {
    /// Generate a fresh, unique id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SignalId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SignalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Waveform kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalKind {
    /// Single bit: undefined, 0 or 1
    Bit,
    /// Multi-bit bus: undefined or any integer, with an optional label per sample
    Vector,
}

impl SignalKind {
    /// Name used by the JSON file format
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalKind::Bit => "bit",
            SignalKind::Vector => "vector",
        }
    }

    /// Drawing color a new signal of this kind starts with
    pub fn default_color(&self) -> Color {
        match self {
            SignalKind::Bit => Color::rgb(0, 150, 0),
            SignalKind::Vector => Color::rgb(0, 0, 180),
        }
    }
}

/// RGBA drawing color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Format as `#AARRGGBB`
    pub fn to_hex_argb(&self) -> String {
        format!(
            "#{:02x}{:02x}{:02x}{:02x}",
            self.a, self.r, self.g, self.b
        )
    }

    /// Parse `#RRGGBB` or `#AARRGGBB` (the leading `#` is optional)
    pub fn from_hex(text: &str) -> Option<Self> {
        let hex = text.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

        match hex.len() {
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::rgba(byte(2)?, byte(4)?, byte(6)?, byte(0)?)),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex_argb())
    }
}

/// One named waveform
///
/// `values` and `labels` are parallel per-sample arrays. Labels only carry
/// meaning for vector signals.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    pub id: SignalId,
    pub name: String,
    pub kind: SignalKind,
    pub values: Vec<i64>,
    pub labels: Vec<String>,
    pub color: Color,
}

impl Signal {
    /// Create a signal of `samples` undefined samples with the kind's default color
    pub fn new(name: impl Into<String>, kind: SignalKind, samples: usize) -> Self {
        Self {
            id: SignalId::new(),
            name: name.into(),
            kind,
            values: vec![UNDEFINED_VALUE; samples],
            labels: vec![String::new(); samples],
            color: kind.default_color(),
        }
    }

    pub fn is_bit(&self) -> bool {
        self.kind == SignalKind::Bit
    }

    pub fn is_vector(&self) -> bool {
        self.kind == SignalKind::Vector
    }

    /// Number of samples currently stored
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at `sample`, undefined when out of range
    pub fn value_at(&self, sample: usize) -> i64 {
        self.values.get(sample).copied().unwrap_or(UNDEFINED_VALUE)
    }

    /// Label at `sample`, empty when out of range
    pub fn label_at(&self, sample: usize) -> &str {
        self.labels.get(sample).map(String::as_str).unwrap_or("")
    }

    /// Resize both arrays to `samples`, padding with undefined/empty and
    /// truncating when shrinking
    pub fn resize(&mut self, samples: usize) {
        self.values.resize(samples, UNDEFINED_VALUE);
        self.labels.resize(samples, String::new());
    }

    /// Grow the arrays to at least `samples` without truncating
    pub fn ensure_len(&mut self, samples: usize) {
        if self.values.len() < samples {
            self.values.resize(samples, UNDEFINED_VALUE);
        }
        if self.labels.len() < samples {
            self.labels.resize(samples, String::new());
        }
    }

    /// Reset one sample to undefined with an empty label
    pub fn clear_at(&mut self, sample: usize) {
        if let Some(v) = self.values.get_mut(sample) {
            *v = UNDEFINED_VALUE;
        }
        if let Some(l) = self.labels.get_mut(sample) {
            l.clear();
        }
    }
}

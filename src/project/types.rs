// Types for the WavePaint JSON file format
//
// {
//   "sampleCount": 20,
//   "signals": [{ "name", "type": "bit"|"vector", "color": "#AARRGGBB",
//                 "values": [int...], "labels": [string...] }],
//   "markers": [{ "id", "sample" }]
// }
//
// Reading is lenient: per-sample entries of the wrong JSON type load as
// undefined / empty rather than rejecting the whole file.

use crate::model::{Color, Signal, SignalKind, UNDEFINED_VALUE};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Color used when a signal record has none or an unparsable one
pub const FALLBACK_COLOR: Color = Color::rgb(0, 150, 0);

/// Top-level JSON document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaveFile {
    /// Number of samples; must be positive to load
    #[serde(default)]
    pub sample_count: i64,
    #[serde(default)]
    pub signals: Vec<SignalRecord>,
    #[serde(default)]
    pub markers: Vec<MarkerRecord>,
}

/// One persisted signal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalRecord {
    #[serde(default)]
    pub name: String,
    /// "bit" or "vector"; anything else loads as bit
    #[serde(rename = "type", default)]
    pub kind: String,
    /// `#AARRGGBB`
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub values: Vec<Value>,
    #[serde(default)]
    pub labels: Vec<Value>,
}

/// One persisted marker
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MarkerRecord {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub sample: i64,
}

impl SignalRecord {
    pub fn from_signal(signal: &Signal) -> Self {
        Self {
            name: signal.name.clone(),
            kind: signal.kind.as_str().to_string(),
            color: signal.color.to_hex_argb(),
            values: signal.values.iter().map(|v| Value::from(*v)).collect(),
            labels: signal
                .labels
                .iter()
                .map(|l| Value::from(l.as_str()))
                .collect(),
        }
    }

    /// Rebuild a signal sized to `samples`, padding short arrays
    pub fn to_signal(&self, samples: usize) -> Signal {
        let kind = if self.kind == "vector" {
            SignalKind::Vector
        } else {
            SignalKind::Bit
        };

        let mut signal = Signal::new(self.name.clone(), kind, samples);
        signal.color = Color::from_hex(&self.color).unwrap_or(FALLBACK_COLOR);

        for (slot, v) in signal.values.iter_mut().zip(&self.values) {
            *slot = v.as_i64().unwrap_or(UNDEFINED_VALUE);
        }
        for (slot, l) in signal.labels.iter_mut().zip(&self.labels) {
            if let Some(text) = l.as_str() {
                slot.push_str(text);
            }
        }

        signal
    }
}

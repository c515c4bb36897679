// Value Change Dump reader
//
// Single forward pass over the text. Only the header directives needed to
// name signals ($scope, $upscope, $var, $enddefinitions) and the body lines
// carrying values (#time, scalar and binary vector changes) are interpreted.
// Every other directive is skipped.
//
// Timestamps are not preserved: each `#` line advances a compressed sample
// index by one.

use crate::config::VcdOptions;
use crate::model::{Signal, SignalKind, UNDEFINED_VALUE};
use log::{info, warn};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Widest bus decoded to an integer; wider ones get a `[N bits]` label
pub const MAX_DECODED_WIDTH: usize = 32;

/// VCD import error types
#[derive(Debug, thiserror::Error)]
pub enum VcdError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No samples found in VCD data")]
    NoSamples,
}

/// Signals parsed from one dump, all `sample_count` samples long
#[derive(Debug, Clone, PartialEq)]
pub struct VcdLibrary {
    pub sample_count: usize,
    pub signals: Vec<Signal>,
}

/// One `$var` while parsing; `changes[i]` is `None` until a value is recorded
struct PendingVar {
    name: String,
    width: usize,
    changes: Vec<Option<(i64, String)>>,
}

impl PendingVar {
    fn record(&mut self, sample: usize, value: i64, label: String) {
        if sample >= self.changes.len() {
            self.changes.resize(sample + 1, None);
        }
        self.changes[sample] = Some((value, label));
    }

    /// Expand to `samples` samples, holding the last known value across gaps
    ///
    /// An `x`/`z` change counts as a gap too; only samples before the first
    /// known value stay undefined.
    fn into_signal(self, samples: usize) -> Signal {
        let kind = if self.width == 1 {
            SignalKind::Bit
        } else {
            SignalKind::Vector
        };
        let mut signal = Signal::new(self.name, kind, samples);

        let mut last: Option<(i64, String)> = None;
        let mut changes = self.changes.into_iter();
        for i in 0..samples {
            if let Some(Some(change)) = changes.next()
                && change.0 != UNDEFINED_VALUE
            {
                last = Some(change);
            }
            if let Some((value, label)) = &last {
                signal.values[i] = *value;
                signal.labels[i].clone_from(label);
            }
        }
        signal
    }
}

/// Reads VCD text into a [`VcdLibrary`]
#[derive(Debug, Clone, Default)]
pub struct VcdImporter {
    options: VcdOptions,
}

impl VcdImporter {
    pub fn new(options: VcdOptions) -> Self {
        Self { options }
    }

    /// Parse a file from disk
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<VcdLibrary, VcdError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let library = self.parse(BufReader::new(file))?;
        info!(
            "loaded {} signals x {} samples from {}",
            library.signals.len(),
            library.sample_count,
            path.display()
        );
        Ok(library)
    }

    pub fn parse_str(&self, text: &str) -> Result<VcdLibrary, VcdError> {
        self.parse(text.as_bytes())
    }

    /// Parse VCD text
    ///
    /// # Errors
    /// Fails on a read error, or when no sample was ever observed.
    pub fn parse<R: BufRead>(&self, reader: R) -> Result<VcdLibrary, VcdError> {
        let mut vars: Vec<PendingVar> = Vec::new();
        let mut by_id: HashMap<String, Vec<usize>> = HashMap::new();
        let mut scopes: Vec<String> = Vec::new();

        let mut in_header = true;
        let mut current: Option<usize> = None;

        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if in_header {
                let mut parts = line.split_whitespace();
                match parts.next() {
                    Some("$scope") => {
                        if let Some(name) = parts.nth(1).filter(|n| *n != "$end") {
                            scopes.push(name.to_string());
                        }
                    }
                    Some("$upscope") => {
                        scopes.pop();
                    }
                    Some("$var") => {
                        if let Some((id, var)) = parse_var(line, &scopes) {
                            vars.push(var);
                            by_id.entry(id).or_default().push(vars.len() - 1);
                        }
                    }
                    Some("$enddefinitions") => in_header = false,
                    _ => {}
                }
                continue;
            }

            if line.starts_with('#') {
                let next = current.map_or(0, |s| s + 1);
                if next >= self.options.max_samples {
                    warn!(
                        "VCD truncated at {} samples",
                        self.options.max_samples
                    );
                    break;
                }
                current = Some(next);
                continue;
            }

            if line.starts_with('$') {
                continue;
            }

            // Changes before the first timestamp belong to sample 0
            let sample = *current.get_or_insert(0);

            let Some((id, value)) = parse_change(line) else {
                continue;
            };
            let Some(indices) = by_id.get(id) else {
                warn!("value change for unknown identifier {:?}", id);
                continue;
            };

            for &index in indices {
                let var = &mut vars[index];
                let (v, label) = match &value {
                    Change::Scalar(v) => (*v, String::new()),
                    Change::Vector(bits) => decode_bits(bits, var.width),
                };
                var.record(sample, v, label);
            }
        }

        let sample_count = current.ok_or(VcdError::NoSamples)? + 1;
        let signals = vars
            .into_iter()
            .map(|var| var.into_signal(sample_count))
            .collect();

        Ok(VcdLibrary {
            sample_count,
            signals,
        })
    }
}

/// `$var <type> <width> <id> <name...> $end`
fn parse_var(line: &str, scopes: &[String]) -> Option<(String, PendingVar)> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 5 {
        return None;
    }

    let width = parts[2].parse::<usize>().ok().filter(|w| *w > 0).unwrap_or(1);
    let id = parts[3].to_string();

    let name = parts[4..]
        .iter()
        .take_while(|p| **p != "$end")
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    let name = if name.is_empty() { id.clone() } else { name };

    let full_name = if scopes.is_empty() {
        name
    } else {
        format!("{}.{}", scopes.join("."), name)
    };

    Some((
        id,
        PendingVar {
            name: full_name,
            width,
            changes: Vec::new(),
        },
    ))
}

enum Change<'a> {
    Scalar(i64),
    Vector(&'a str),
}

/// Split a body line into (identifier, change)
fn parse_change(line: &str) -> Option<(&str, Change<'_>)> {
    let mut chars = line.chars();
    match chars.next()? {
        'b' | 'B' => {
            let mut parts = line[1..].split_whitespace();
            let bits = parts.next()?;
            let id = parts.next()?;
            Some((id, Change::Vector(bits)))
        }
        c @ ('0' | '1' | 'x' | 'X' | 'z' | 'Z') => {
            let id = chars.as_str().trim();
            if id.is_empty() {
                return None;
            }
            let value = match c {
                '0' => 0,
                '1' => 1,
                _ => UNDEFINED_VALUE,
            };
            Some((id, Change::Scalar(value)))
        }
        _ => None,
    }
}

/// Binary literal to (value, label)
fn decode_bits(bits: &str, width: usize) -> (i64, String) {
    if bits.chars().any(|c| matches!(c, 'x' | 'X' | 'z' | 'Z')) {
        return (UNDEFINED_VALUE, String::new());
    }
    if width > MAX_DECODED_WIDTH || bits.len() > MAX_DECODED_WIDTH {
        return (0, format!("[{} bits]", width));
    }
    match i64::from_str_radix(bits, 2) {
        Ok(v) => (v, String::new()),
        Err(_) => (UNDEFINED_VALUE, String::new()),
    }
}

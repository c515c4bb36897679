// Rectangular (signal x sample) clipboard

use crate::model::signal::{Color, Signal, SignalKind, UNDEFINED_VALUE};
use std::ops::RangeInclusive;

/// Snapshot of a rectangular block of cells
///
/// Row `r` holds the cells of the `r`-th copied signal, column `c` the
/// `c`-th copied sample. Kinds and colors are kept so a view can preview the
/// block, but pasting only ever writes values and labels.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockClipboard {
    values: Vec<Vec<i64>>,
    labels: Vec<Vec<String>>,
    kinds: Vec<SignalKind>,
    colors: Vec<Color>,
}

impl BlockClipboard {
    /// Capture `rows` x `samples` from `signals`
    ///
    /// Both ranges must already be normalized and in bounds for `signals`.
    pub fn capture(
        signals: &[Signal],
        rows: RangeInclusive<usize>,
        samples: RangeInclusive<usize>,
    ) -> Self {
        let mut block = Self::default();

        for signal in &signals[rows] {
            block.kinds.push(signal.kind);
            block.colors.push(signal.color);
            block.values.push(
                samples
                    .clone()
                    .map(|i| signal.values.get(i).copied().unwrap_or(UNDEFINED_VALUE))
                    .collect(),
            );
            block.labels.push(
                samples
                    .clone()
                    .map(|i| signal.labels.get(i).cloned().unwrap_or_default())
                    .collect(),
            );
        }

        block
    }

    /// Write the block into `signals` with its top-left cell at
    /// (`top`, `start`), dropping whatever falls outside `sample_count` or
    /// the signal list. Returns the number of cells written.
    pub fn apply(
        &self,
        signals: &mut [Signal],
        top: usize,
        start: usize,
        sample_count: usize,
    ) -> usize {
        let rows = self.signal_count().min(signals.len().saturating_sub(top));
        let cols = self.sample_count().min(sample_count.saturating_sub(start));
        if rows == 0 || cols == 0 {
            return 0;
        }

        for (r, signal) in signals[top..top + rows].iter_mut().enumerate() {
            signal.ensure_len(sample_count);
            for c in 0..cols {
                signal.values[start + c] = self.values[r][c];
                signal.labels[start + c] = self.labels[r][c].clone();
            }
        }

        rows * cols
    }

    /// Number of copied signals (rows)
    pub fn signal_count(&self) -> usize {
        self.values.len()
    }

    /// Number of copied samples (columns)
    pub fn sample_count(&self) -> usize {
        self.values.first().map_or(0, Vec::len)
    }

    pub fn values(&self) -> &[Vec<i64>] {
        &self.values
    }

    pub fn labels(&self) -> &[Vec<String>] {
        &self.labels
    }

    pub fn kinds(&self) -> &[SignalKind] {
        &self.kinds
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(name: &str, base: i64, samples: usize) -> Signal {
        let mut s = Signal::new(name, SignalKind::Vector, samples);
        for (i, v) in s.values.iter_mut().enumerate() {
            *v = base + i as i64;
        }
        s
    }

    #[test]
    fn test_capture_dimensions() {
        let signals = vec![numbered("a", 0, 6), numbered("b", 10, 6)];
        let block = BlockClipboard::capture(&signals, 0..=1, 2..=4);
        assert_eq!(block.signal_count(), 2);
        assert_eq!(block.sample_count(), 3);
        assert_eq!(block.values()[1], vec![12, 13, 14]);
        assert_eq!(block.kinds(), &[SignalKind::Vector, SignalKind::Vector]);
    }

    #[test]
    fn test_apply_clamps_to_bounds() {
        let source = vec![numbered("a", 0, 4), numbered("b", 10, 4)];
        let block = BlockClipboard::capture(&source, 0..=1, 0..=3);

        let mut dest = vec![Signal::new("x", SignalKind::Bit, 4)];
        let written = block.apply(&mut dest, 0, 2, 4);

        assert_eq!(written, 2);
        assert_eq!(dest[0].values, vec![-1, -1, 0, 1]);
        // destination identity is untouched
        assert_eq!(dest[0].kind, SignalKind::Bit);
        assert_eq!(dest[0].name, "x");
    }

    #[test]
    fn test_apply_out_of_range_top_writes_nothing() {
        let source = vec![numbered("a", 0, 2)];
        let block = BlockClipboard::capture(&source, 0..=0, 0..=1);
        let mut dest = vec![Signal::new("x", SignalKind::Vector, 2)];
        assert_eq!(block.apply(&mut dest, 1, 0, 2), 0);
    }
}

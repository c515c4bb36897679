// Signal-level edits: creation, painting, reordering and the signal clipboard

use super::WaveDocument;
use crate::model::{Color, Signal, SignalId, SignalKind};
use log::debug;

impl WaveDocument {
    fn signal_in_range(&self, signal: usize) -> bool {
        signal < self.signals.len()
    }

    fn sample_in_range(&self, sample: usize) -> bool {
        sample < self.sample_count
    }

    /// Resize every visible signal without touching history
    ///
    /// Markers and arrows past the new end are dropped and the id counters
    /// recomputed.
    fn resize_signals(&mut self, samples: usize) {
        self.sample_count = samples;
        for signal in &mut self.signals {
            signal.resize(samples);
        }
        self.trim_annotations();
    }

    fn trim_annotations(&mut self) {
        let count = self.sample_count;
        let before = (self.markers.len(), self.arrows.len());

        self.markers.retain(|m| m.sample < count);
        self.arrows
            .retain(|a| a.start_sample < count && a.end_sample < count);

        if before.0 != self.markers.len() {
            self.marker_ids.recompute(self.markers.iter().map(|m| m.id));
        }
        if before.1 != self.arrows.len() {
            self.arrow_ids.recompute(self.arrows.iter().map(|a| a.id));
        }
    }

    /// Change the number of samples shared by all signals
    ///
    /// New trailing samples are undefined; shrinking truncates. Markers and
    /// arrows past the new end are dropped.
    pub fn set_sample_count(&mut self, count: usize) {
        if count == 0 || count == self.sample_count {
            return;
        }

        self.checkpoint();
        self.resize_signals(count);

        debug!("sample count set to {}", count);
        self.notify_changed();
    }

    fn push_signal(&mut self, signal: Signal) -> usize {
        self.signals.push(signal);
        self.notify_changed();
        self.signals.len() - 1
    }

    /// Append a bit signal, all samples 0. Returns its index.
    pub fn add_bit_signal(&mut self, name: impl Into<String>) -> usize {
        self.checkpoint();
        let mut signal = Signal::new(name, SignalKind::Bit, self.sample_count);
        signal.values.fill(0);
        self.push_signal(signal)
    }

    /// Append a vector signal, all samples undefined. Returns its index.
    pub fn add_vector_signal(&mut self, name: impl Into<String>) -> usize {
        self.checkpoint();
        let signal = Signal::new(name, SignalKind::Vector, self.sample_count);
        self.push_signal(signal)
    }

    /// Append a clock: `pulses` periods of `low_samples` zeros followed by
    /// `high_samples` ones, starting at sample 0
    ///
    /// Grows the document if the clock does not fit; samples after the last
    /// pulse are undefined. Returns `None` for a non-positive pulse count or
    /// an empty period.
    pub fn add_clock_signal(
        &mut self,
        name: impl Into<String>,
        pulses: usize,
        high_samples: usize,
        low_samples: usize,
    ) -> Option<usize> {
        let period = high_samples + low_samples;
        if pulses == 0 || period == 0 {
            return None;
        }
        let needed = pulses.checked_mul(period)?;

        self.checkpoint();
        if needed > self.sample_count {
            self.resize_signals(needed);
        }

        let mut signal = Signal::new(name, SignalKind::Bit, self.sample_count);
        for pulse in 0..pulses {
            let base = pulse * period;
            signal.values[base..base + low_samples].fill(0);
            signal.values[base + low_samples..base + period].fill(1);
        }

        Some(self.push_signal(signal))
    }

    /// Set a bit sample to 0 or 1 (any non-zero value counts as 1)
    ///
    /// Writing the value already stored is a no-op and records no undo step.
    pub fn set_bit_value(&mut self, signal: usize, sample: usize, value: i64) {
        if !self.signal_in_range(signal) || !self.sample_in_range(sample) {
            return;
        }
        if !self.signals[signal].is_bit() {
            return;
        }

        let value = if value != 0 { 1 } else { 0 };
        if self.signals[signal].value_at(sample) == value {
            return;
        }

        self.checkpoint();
        let s = &mut self.signals[signal];
        s.ensure_len(self.sample_count);
        s.values[sample] = value;
        s.labels[sample].clear();
        self.notify_changed();
    }

    /// Flip a bit sample; undefined becomes 1
    pub fn toggle_bit_value(&mut self, signal: usize, sample: usize) {
        if !self.signal_in_range(signal) || !self.sample_in_range(sample) {
            return;
        }
        if !self.signals[signal].is_bit() {
            return;
        }

        self.checkpoint();
        let s = &mut self.signals[signal];
        s.ensure_len(self.sample_count);
        s.values[sample] = if s.values[sample] == 1 { 0 } else { 1 };
        s.labels[sample].clear();
        self.notify_changed();
    }

    /// Write `value` and `label` to every sample of `start..=end` (either
    /// order), clamped to the document
    pub fn set_vector_range(
        &mut self,
        signal: usize,
        start: usize,
        end: usize,
        value: i64,
        label: &str,
    ) {
        if !self.signal_in_range(signal) || self.sample_count == 0 {
            return;
        }
        if !self.signals[signal].is_vector() {
            return;
        }

        let first = start.min(end);
        let last = start.max(end).min(self.sample_count - 1);
        if first > last {
            return;
        }

        self.checkpoint();
        let s = &mut self.signals[signal];
        s.ensure_len(self.sample_count);
        s.values[first..=last].fill(value);
        for l in &mut s.labels[first..=last] {
            l.clear();
            l.push_str(label);
        }
        self.notify_changed();
    }

    /// Reset one sample to undefined, for either kind
    pub fn clear_sample(&mut self, signal: usize, sample: usize) {
        if !self.signal_in_range(signal) || !self.sample_in_range(sample) {
            return;
        }

        self.checkpoint();
        let s = &mut self.signals[signal];
        s.ensure_len(self.sample_count);
        s.clear_at(sample);
        self.notify_changed();
    }

    pub fn rename_signal(&mut self, signal: usize, name: impl Into<String>) {
        if !self.signal_in_range(signal) {
            return;
        }
        self.checkpoint();
        self.signals[signal].name = name.into();
        self.notify_changed();
    }

    pub fn set_signal_color(&mut self, signal: usize, color: Color) {
        if !self.signal_in_range(signal) {
            return;
        }
        self.checkpoint();
        self.signals[signal].color = color;
        self.notify_changed();
    }

    /// Delete a signal together with every arrow attached to it
    pub fn remove_signal(&mut self, signal: usize) {
        if !self.signal_in_range(signal) {
            return;
        }

        self.checkpoint();
        let removed = self.signals.remove(signal);
        let before = self.arrows.len();
        self.arrows.retain(|a| !a.references(removed.id));
        if self.arrows.len() != before {
            self.arrow_ids.recompute(self.arrows.iter().map(|a| a.id));
        }

        debug!(
            "removed signal {:?} ({} arrows dropped)",
            removed.name,
            before - self.arrows.len()
        );
        self.notify_changed();
    }

    /// Move a signal to a new row, shifting the rows in between
    pub fn move_signal(&mut self, from: usize, to: usize) {
        if !self.signal_in_range(from) || !self.signal_in_range(to) || from == to {
            return;
        }

        self.checkpoint();
        let signal = self.signals.remove(from);
        self.signals.insert(to, signal);
        self.notify_changed();
    }

    /// Copy a signal into the single-signal clipboard
    pub fn copy_signal(&mut self, signal: usize) {
        if let Some(s) = self.signals.get(signal) {
            self.clipboard_signal = Some(s.clone());
        }
    }

    /// Insert the clipboard signal at `dest` (appended when past the end)
    ///
    /// The pasted signal gets a fresh identity and, on a name clash, a
    /// `_copyN` suffix. Returns the index it landed at.
    pub fn paste_signal(&mut self, dest: usize) -> Option<usize> {
        let mut signal = self.clipboard_signal.clone()?;

        signal.id = SignalId::new();
        signal.name = self.unique_name(&signal.name);
        signal.resize(self.sample_count);

        let dest = dest.min(self.signals.len());
        self.checkpoint();
        self.signals.insert(dest, signal);
        self.notify_changed();
        Some(dest)
    }

    fn unique_name(&self, base: &str) -> String {
        let taken = |name: &str| self.signals.iter().any(|s| s.name == name);

        let mut name = base.to_string();
        let mut n = 1;
        while taken(&name) {
            name = format!("{}_copy{}", base, n);
            n += 1;
        }
        name
    }

    /// Show a signal from the VCD library by its full dotted name
    ///
    /// The document is resized to the library signal's length first if they
    /// differ. Returns the new row, or `None` if the name is unknown.
    pub fn add_signal_from_vcd(&mut self, full_name: &str) -> Option<usize> {
        let mut signal = self
            .vcd_signals
            .iter()
            .find(|s| s.name == full_name)?
            .clone();
        signal.id = SignalId::new();

        self.checkpoint();
        if signal.len() != self.sample_count {
            self.resize_signals(signal.len());
        }
        Some(self.push_signal(signal))
    }
}

#[cfg(test)]
mod tests {
    use crate::document::WaveDocument;
    use crate::model::{Color, Signal, SignalKind, UNDEFINED_VALUE};

    const U: i64 = UNDEFINED_VALUE;

    #[test]
    fn test_add_signals_default_fill() {
        let mut doc = WaveDocument::new();
        assert_eq!(doc.add_bit_signal("clk"), 0);
        assert_eq!(doc.add_vector_signal("bus"), 1);

        let signals = doc.signal_list();
        assert_eq!(signals[0].values, vec![0; 20]);
        assert_eq!(signals[1].values, vec![U; 20]);
        assert_eq!(signals[1].labels.len(), 20);
    }

    #[test]
    fn test_set_sample_count_resizes_all_signals() {
        let mut doc = WaveDocument::new();
        doc.add_bit_signal("a");
        doc.set_sample_count(25);

        let values = &doc.signal_list()[0].values;
        assert_eq!(values.len(), 25);
        assert_eq!(values[19], 0);
        assert_eq!(values[20], U);

        doc.set_sample_count(5);
        assert_eq!(doc.signal_list()[0].labels.len(), 5);
    }

    #[test]
    fn test_set_sample_count_rejects_zero_and_same() {
        let mut doc = WaveDocument::new();
        doc.set_sample_count(0);
        doc.set_sample_count(20);
        assert_eq!(doc.sample_count(), 20);
        assert!(!doc.can_undo());
    }

    #[test]
    fn test_set_sample_count_is_undoable() {
        let mut doc = WaveDocument::new();
        doc.set_sample_count(8);
        doc.undo();
        assert_eq!(doc.sample_count(), 20);
    }

    #[test]
    fn test_clock_pattern() {
        let mut doc = WaveDocument::new();
        let idx = doc.add_clock_signal("clk", 3, 2, 2).unwrap();

        assert_eq!(doc.sample_count(), 20);
        let mut expected = vec![0, 0, 1, 1, 0, 0, 1, 1, 0, 0, 1, 1];
        expected.resize(20, U);
        assert_eq!(doc.signal_list()[idx].values, expected);
    }

    #[test]
    fn test_clock_grows_document() {
        let mut doc = WaveDocument::new();
        doc.add_vector_signal("bus");
        doc.add_clock_signal("clk", 4, 3, 3).unwrap();

        assert_eq!(doc.sample_count(), 24);
        assert_eq!(doc.signal_list()[0].values.len(), 24);
        assert_eq!(&doc.signal_list()[1].values[18..24], &[0, 0, 0, 1, 1, 1]);
    }

    #[test]
    fn test_clock_rejects_invalid_arguments() {
        let mut doc = WaveDocument::new();
        assert_eq!(doc.add_clock_signal("clk", 0, 1, 1), None);
        assert_eq!(doc.add_clock_signal("clk", 3, 0, 0), None);
        assert!(doc.signal_list().is_empty());
        assert!(!doc.can_undo());
    }

    #[test]
    fn test_set_bit_value_clamps_and_skips_redundant_writes() {
        let mut doc = WaveDocument::new();
        doc.add_bit_signal("a");
        let base = doc.undo_count();

        doc.set_bit_value(0, 3, 7);
        doc.set_bit_value(0, 3, 1);

        assert_eq!(doc.signal_list()[0].values[3], 1);
        assert_eq!(doc.undo_count(), base + 1);
    }

    #[test]
    fn test_set_bit_value_ignores_vectors_and_bad_indices() {
        let mut doc = WaveDocument::new();
        doc.add_vector_signal("bus");
        let base = doc.undo_count();

        doc.set_bit_value(0, 0, 1);
        doc.set_bit_value(5, 0, 1);
        doc.set_bit_value(0, 99, 1);

        assert_eq!(doc.signal_list()[0].values[0], U);
        assert_eq!(doc.undo_count(), base);
    }

    #[test]
    fn test_toggle_bit_value() {
        let mut doc = WaveDocument::new();
        doc.add_bit_signal("a");
        doc.toggle_bit_value(0, 2);
        assert_eq!(doc.signal_list()[0].values[2], 1);
        doc.toggle_bit_value(0, 2);
        assert_eq!(doc.signal_list()[0].values[2], 0);
    }

    #[test]
    fn test_set_vector_range_normalizes_and_clamps() {
        let mut doc = WaveDocument::new();
        doc.add_vector_signal("bus");
        doc.set_vector_range(0, 25, 17, 0xA, "IDLE");

        let s = &doc.signal_list()[0];
        assert_eq!(s.values[16], U);
        assert_eq!(&s.values[17..20], &[0xA, 0xA, 0xA]);
        assert_eq!(s.labels[19], "IDLE");
    }

    #[test]
    fn test_set_vector_range_ignores_bits_and_out_of_range() {
        let mut doc = WaveDocument::new();
        doc.add_bit_signal("a");
        doc.add_vector_signal("bus");
        let base = doc.undo_count();

        doc.set_vector_range(0, 0, 3, 5, "");
        doc.set_vector_range(1, 30, 40, 5, "");

        assert_eq!(doc.signal_list()[0].values[0], 0);
        assert_eq!(doc.undo_count(), base);
    }

    #[test]
    fn test_clear_sample_works_for_both_kinds() {
        let mut doc = WaveDocument::new();
        doc.add_bit_signal("a");
        doc.add_vector_signal("bus");
        doc.set_vector_range(1, 0, 0, 3, "three");

        doc.clear_sample(0, 0);
        doc.clear_sample(1, 0);

        assert_eq!(doc.signal_list()[0].values[0], U);
        assert_eq!(doc.signal_list()[1].values[0], U);
        assert_eq!(doc.signal_list()[1].labels[0], "");
    }

    #[test]
    fn test_rename_and_color() {
        let mut doc = WaveDocument::new();
        doc.add_bit_signal("a");
        doc.rename_signal(0, "reset_n");
        doc.set_signal_color(0, Color::rgb(200, 0, 0));

        assert_eq!(doc.signal_list()[0].name, "reset_n");
        assert_eq!(doc.signal_list()[0].color, Color::rgb(200, 0, 0));
        doc.undo();
        assert_eq!(
            doc.signal_list()[0].color,
            SignalKind::Bit.default_color()
        );
    }

    #[test]
    fn test_remove_signal_drops_attached_arrows() {
        let mut doc = WaveDocument::new();
        for name in ["a", "b", "c"] {
            doc.add_bit_signal(name);
        }
        doc.add_arrow(0, 1, 1, 2);
        doc.add_arrow(0, 3, 2, 4);
        doc.add_arrow(2, 5, 2, 6);

        doc.remove_signal(1);

        let placements = doc.arrow_placements();
        assert_eq!(doc.arrow_list().len(), 2);
        assert_eq!(placements[0].start_signal, 0);
        assert_eq!(placements[0].end_signal, 1);
        assert_eq!(placements[1].start_signal, 1);
        assert_eq!(doc.next_arrow_id(), 4);
    }

    #[test]
    fn test_remove_signal_is_undoable() {
        let mut doc = WaveDocument::new();
        doc.add_bit_signal("a");
        doc.add_arrow(0, 0, 0, 1);
        doc.remove_signal(0);
        doc.undo();
        assert_eq!(doc.signal_list().len(), 1);
        assert_eq!(doc.arrow_placements().len(), 1);
    }

    #[test]
    fn test_move_signal_is_an_array_move() {
        let mut doc = WaveDocument::new();
        for name in ["a", "b", "c", "d"] {
            doc.add_bit_signal(name);
        }
        doc.move_signal(0, 2);
        let names: Vec<_> = doc.signal_list().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["b", "c", "a", "d"]);

        doc.move_signal(3, 0);
        let names: Vec<_> = doc.signal_list().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["d", "b", "c", "a"]);
    }

    #[test]
    fn test_move_signal_invalid_is_noop() {
        let mut doc = WaveDocument::new();
        doc.add_bit_signal("a");
        let base = doc.undo_count();
        doc.move_signal(0, 0);
        doc.move_signal(0, 4);
        assert_eq!(doc.undo_count(), base);
    }

    #[test]
    fn test_paste_signal_renames_on_collision() {
        let mut doc = WaveDocument::new();
        doc.add_bit_signal("data");
        doc.copy_signal(0);

        assert_eq!(doc.paste_signal(1), Some(1));
        assert_eq!(doc.paste_signal(100), Some(2));

        let names: Vec<_> = doc.signal_list().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["data", "data_copy1", "data_copy2"]);
        assert_ne!(doc.signal_list()[0].id, doc.signal_list()[1].id);
    }

    #[test]
    fn test_paste_without_clipboard() {
        let mut doc = WaveDocument::new();
        assert!(!doc.has_clipboard_signal());
        assert_eq!(doc.paste_signal(0), None);
        assert!(!doc.can_undo());
    }

    #[test]
    fn test_add_signal_from_vcd_library() {
        let mut doc = WaveDocument::new();
        let mut lib = Signal::new("top.clk", SignalKind::Bit, 4);
        lib.values = vec![0, 1, 0, 1];
        doc.replace_contents(crate::document::DocumentContents {
            sample_count: 4,
            signals: Vec::new(),
            vcd_signals: vec![lib],
            markers: Vec::new(),
        });

        assert_eq!(doc.add_signal_from_vcd("top.clk"), Some(0));
        assert_eq!(doc.add_signal_from_vcd("top.missing"), None);
        assert_eq!(doc.signal_list()[0].values, vec![0, 1, 0, 1]);
        assert_ne!(doc.signal_list()[0].id, doc.vcd_signal_list()[0].id);
    }

    #[test]
    fn test_add_signal_from_vcd_drops_annotations_past_new_end() {
        let mut doc = WaveDocument::new();
        doc.replace_contents(crate::document::DocumentContents {
            sample_count: 3,
            signals: Vec::new(),
            vcd_signals: vec![Signal::new("a", SignalKind::Bit, 3)],
            markers: Vec::new(),
        });
        doc.set_sample_count(10);
        doc.add_bit_signal("drawn");
        doc.add_marker(1);
        doc.add_marker(8);
        doc.add_arrow(0, 0, 0, 2);
        doc.add_arrow(0, 1, 0, 9);

        doc.add_signal_from_vcd("a").unwrap();

        assert_eq!(doc.sample_count(), 3);
        let samples: Vec<usize> = doc.marker_list().iter().map(|m| m.sample).collect();
        assert_eq!(samples, vec![1]);
        assert_eq!(doc.next_marker_id(), 2);
        assert_eq!(doc.arrow_list().len(), 1);
        assert_eq!(doc.next_arrow_id(), 2);

        doc.undo();
        assert_eq!(doc.sample_count(), 10);
        assert_eq!(doc.marker_list().len(), 2);
        assert_eq!(doc.arrow_list().len(), 2);
    }
}

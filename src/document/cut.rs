// Crop the document to a sample window

use super::WaveDocument;
use log::debug;

impl WaveDocument {
    /// Keep only samples `start..=end` (either order, clamped) and re-index
    /// them from 0
    ///
    /// Signals, markers and arrows are sliced together: markers outside the
    /// window are dropped, arrows are dropped if either end falls outside,
    /// and survivors are shifted left by the window start. Id counters are
    /// recomputed from the survivors. A window covering the whole document
    /// is a no-op.
    pub fn cut_range(&mut self, start: usize, end: usize) {
        if self.sample_count == 0 {
            return;
        }

        let last_sample = self.sample_count - 1;
        let first = start.min(end).min(last_sample);
        let last = start.max(end).min(last_sample);
        let window = last - first + 1;
        if window == self.sample_count {
            return;
        }

        self.checkpoint();

        let sample_count = self.sample_count;
        for signal in &mut self.signals {
            signal.ensure_len(sample_count);
            signal.values.truncate(last + 1);
            signal.values.drain(..first);
            signal.labels.truncate(last + 1);
            signal.labels.drain(..first);
        }

        let inside = |sample: usize| (first..=last).contains(&sample);

        self.markers.retain(|m| inside(m.sample));
        for marker in &mut self.markers {
            marker.sample -= first;
        }
        self.marker_ids.recompute(self.markers.iter().map(|m| m.id));

        self.arrows
            .retain(|a| inside(a.start_sample) && inside(a.end_sample));
        for arrow in &mut self.arrows {
            arrow.start_sample -= first;
            arrow.end_sample -= first;
        }
        self.arrow_ids.recompute(self.arrows.iter().map(|a| a.id));

        self.sample_count = window;

        debug!("cut to samples {}..={} ({} remain)", first, last, window);
        self.notify_changed();
    }
}

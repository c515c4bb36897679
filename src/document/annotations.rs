// Markers and inter-signal arrows

use super::WaveDocument;
use crate::model::{Arrow, Marker};
use log::debug;

impl WaveDocument {
    /// Place a marker at `sample`
    ///
    /// If a marker already sits on that sample its id is returned and
    /// nothing changes. Returns `None` when `sample` is out of range.
    pub fn add_marker(&mut self, sample: usize) -> Option<u32> {
        if sample >= self.sample_count {
            return None;
        }
        if let Some(existing) = self.markers.iter().find(|m| m.sample == sample) {
            return Some(existing.id);
        }

        self.checkpoint();
        let id = self.marker_ids.allocate();
        self.markers.push(Marker { id, sample });
        self.markers.sort_by_key(|m| m.sample);

        debug!("marker {} added at sample {}", id, sample);
        self.notify_changed();
        Some(id)
    }

    /// Delete the marker with `id`; unknown ids are ignored
    pub fn remove_marker(&mut self, id: u32) {
        let Some(pos) = self.markers.iter().position(|m| m.id == id) else {
            return;
        };

        self.checkpoint();
        self.markers.remove(pos);
        self.marker_ids.recompute(self.markers.iter().map(|m| m.id));
        self.notify_changed();
    }

    /// Draw an arrow between two (signal row, sample) points
    ///
    /// Returns the new arrow id, or `None` if any index is out of range.
    pub fn add_arrow(
        &mut self,
        start_signal: usize,
        start_sample: usize,
        end_signal: usize,
        end_sample: usize,
    ) -> Option<u32> {
        if start_sample >= self.sample_count || end_sample >= self.sample_count {
            return None;
        }
        let start = self.signals.get(start_signal)?.id;
        let end = self.signals.get(end_signal)?.id;

        self.checkpoint();
        let id = self.arrow_ids.allocate();
        self.arrows.push(Arrow {
            id,
            start_signal: start,
            start_sample,
            end_signal: end,
            end_sample,
        });

        debug!(
            "arrow {} added ({}:{} -> {}:{})",
            id, start_signal, start_sample, end_signal, end_sample
        );
        self.notify_changed();
        Some(id)
    }

    /// Delete the arrow with `id`; unknown ids are ignored
    pub fn remove_arrow(&mut self, id: u32) {
        let Some(pos) = self.arrows.iter().position(|a| a.id == id) else {
            return;
        };

        self.checkpoint();
        self.arrows.remove(pos);
        self.arrow_ids.recompute(self.arrows.iter().map(|a| a.id));
        self.notify_changed();
    }
}

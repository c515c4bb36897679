// Block copy / cut / paste / clear over a (signal x sample) rectangle

use super::WaveDocument;
use crate::model::BlockClipboard;
use log::debug;
use std::ops::RangeInclusive;

impl WaveDocument {
    /// Normalize a rectangle; `None` if any corner is out of range
    fn block_bounds(
        &self,
        top: usize,
        bottom: usize,
        start: usize,
        end: usize,
    ) -> Option<(RangeInclusive<usize>, RangeInclusive<usize>)> {
        let signal_count = self.signals.len();
        if signal_count == 0 || self.sample_count == 0 {
            return None;
        }
        if top >= signal_count || bottom >= signal_count {
            return None;
        }
        if start >= self.sample_count || end >= self.sample_count {
            return None;
        }

        Some((
            top.min(bottom)..=top.max(bottom),
            start.min(end)..=start.max(end),
        ))
    }

    /// Copy a rectangle into the block clipboard
    ///
    /// Read-only for the document: no undo step, no notification.
    pub fn copy_block(&mut self, top: usize, bottom: usize, start: usize, end: usize) {
        let Some((rows, samples)) = self.block_bounds(top, bottom, start, end) else {
            return;
        };

        let block = BlockClipboard::capture(&self.signals, rows, samples);
        debug!(
            "copied block of {} x {}",
            block.signal_count(),
            block.sample_count()
        );
        self.block_clipboard = Some(block);
    }

    /// Paste the block clipboard with its top-left cell at
    /// (`dest_top`, `dest_start`)
    ///
    /// Cells that would land outside the document are silently dropped.
    /// Only values and labels are written; destination kinds and colors
    /// stay as they are.
    pub fn paste_block(&mut self, dest_top: usize, dest_start: usize) {
        if self.block_clipboard.is_none() {
            return;
        }
        if dest_top >= self.signals.len() || dest_start >= self.sample_count {
            return;
        }

        self.checkpoint();
        if let Some(block) = &self.block_clipboard {
            let written = block.apply(&mut self.signals, dest_top, dest_start, self.sample_count);
            debug!("pasted {} cells at {}:{}", written, dest_top, dest_start);
        }
        self.notify_changed();
    }

    /// Reset every cell of a rectangle to undefined
    pub fn clear_block(&mut self, top: usize, bottom: usize, start: usize, end: usize) {
        let Some((rows, samples)) = self.block_bounds(top, bottom, start, end) else {
            return;
        };

        self.checkpoint();
        self.clear_cells(rows, samples);
        self.notify_changed();
    }

    /// Copy a rectangle to the block clipboard and clear it, as one edit
    pub fn cut_block(&mut self, top: usize, bottom: usize, start: usize, end: usize) {
        let Some((rows, samples)) = self.block_bounds(top, bottom, start, end) else {
            return;
        };

        self.block_clipboard = Some(BlockClipboard::capture(
            &self.signals,
            rows.clone(),
            samples.clone(),
        ));

        self.checkpoint();
        self.clear_cells(rows, samples);
        self.notify_changed();
    }

    fn clear_cells(&mut self, rows: RangeInclusive<usize>, samples: RangeInclusive<usize>) {
        let sample_count = self.sample_count;
        for signal in &mut self.signals[rows] {
            signal.ensure_len(sample_count);
            for i in samples.clone() {
                signal.clear_at(i);
            }
        }
    }
}

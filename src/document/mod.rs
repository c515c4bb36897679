// WaveDocument - the editable timing diagram
//
// The document owns every signal, marker and arrow plus the clipboards and
// the undo history. All edits go through its methods, which follow the same
// sequence:
// - validate arguments (invalid calls are silent no-ops)
// - record an undo snapshot of the pre-edit state
// - mutate
// - notify listeners with a single DataChanged event
//
// The methods are split by topic across the submodules; they all extend the
// same `WaveDocument` type.

mod annotations;
mod cut;
pub mod events;
mod selection;
mod signals;

pub use events::{DocumentEvent, EventEmitter, ListenerId};

use crate::config::DocumentConfig;
use crate::history::{DocumentSnapshot, HistoryManager};
use crate::model::{
    Arrow, ArrowPlacement, BlockClipboard, IdAllocator, Marker, Signal, SignalId,
};
use crate::vcd::ScopeNode;
use log::debug;

/// Content installed wholesale by a loader
///
/// Used by the file codecs to replace the document in one step without
/// producing undo history.
#[derive(Debug, Clone, Default)]
pub struct DocumentContents {
    pub sample_count: usize,
    pub signals: Vec<Signal>,
    pub vcd_signals: Vec<Signal>,
    pub markers: Vec<Marker>,
}

/// Editable waveform document
pub struct WaveDocument {
    sample_count: usize,
    signals: Vec<Signal>,
    /// Library of signals parsed from a VCD dump; not necessarily visible
    vcd_signals: Vec<Signal>,

    markers: Vec<Marker>,
    marker_ids: IdAllocator,

    arrows: Vec<Arrow>,
    arrow_ids: IdAllocator,

    clipboard_signal: Option<Signal>,
    block_clipboard: Option<BlockClipboard>,

    history: HistoryManager<DocumentSnapshot>,
    events: EventEmitter,
    config: DocumentConfig,
}

impl WaveDocument {
    /// Create an empty document with the default configuration
    pub fn new() -> Self {
        Self::with_config(DocumentConfig::default())
    }

    /// Create an empty document with a custom configuration
    pub fn with_config(config: DocumentConfig) -> Self {
        Self {
            sample_count: config.default_sample_count,
            signals: Vec::new(),
            vcd_signals: Vec::new(),
            markers: Vec::new(),
            marker_ids: IdAllocator::new(),
            arrows: Vec::new(),
            arrow_ids: IdAllocator::new(),
            clipboard_signal: None,
            block_clipboard: None,
            history: HistoryManager::with_capacity(config.max_undo_steps),
            events: EventEmitter::new(),
            config,
        }
    }

    pub fn config(&self) -> &DocumentConfig {
        &self.config
    }

    // ---------------------------------------------------------------------
    // Read access

    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    pub fn signal_list(&self) -> &[Signal] {
        &self.signals
    }

    pub fn vcd_signal_list(&self) -> &[Signal] {
        &self.vcd_signals
    }

    /// Markers sorted by sample
    pub fn marker_list(&self) -> &[Marker] {
        &self.markers
    }

    pub fn arrow_list(&self) -> &[Arrow] {
        &self.arrows
    }

    /// Current row of the signal with the given id
    pub fn signal_index(&self, id: SignalId) -> Option<usize> {
        self.signals.iter().position(|s| s.id == id)
    }

    /// Resolve an arrow's endpoints to current signal rows
    pub fn resolve_arrow(&self, arrow: &Arrow) -> Option<ArrowPlacement> {
        Some(ArrowPlacement {
            id: arrow.id,
            start_signal: self.signal_index(arrow.start_signal)?,
            start_sample: arrow.start_sample,
            end_signal: self.signal_index(arrow.end_signal)?,
            end_sample: arrow.end_sample,
        })
    }

    /// All arrows resolved against the current signal order
    pub fn arrow_placements(&self) -> Vec<ArrowPlacement> {
        self.arrows
            .iter()
            .filter_map(|a| self.resolve_arrow(a))
            .collect()
    }

    pub fn next_marker_id(&self) -> u32 {
        self.marker_ids.peek()
    }

    pub fn next_arrow_id(&self) -> u32 {
        self.arrow_ids.peek()
    }

    pub fn has_clipboard_signal(&self) -> bool {
        self.clipboard_signal.is_some()
    }

    pub fn clipboard_signal(&self) -> Option<&Signal> {
        self.clipboard_signal.as_ref()
    }

    pub fn has_block_clipboard(&self) -> bool {
        self.block_clipboard.is_some()
    }

    pub fn block_clipboard(&self) -> Option<&BlockClipboard> {
        self.block_clipboard.as_ref()
    }

    pub fn block_clipboard_signal_count(&self) -> usize {
        self.block_clipboard
            .as_ref()
            .map_or(0, BlockClipboard::signal_count)
    }

    pub fn block_clipboard_sample_count(&self) -> usize {
        self.block_clipboard
            .as_ref()
            .map_or(0, BlockClipboard::sample_count)
    }

    /// Scope tree of the VCD library, built from the dotted signal names
    pub fn vcd_hierarchy(&self) -> ScopeNode {
        ScopeNode::from_names(self.vcd_signals.iter().map(|s| s.name.as_str()))
    }

    // ---------------------------------------------------------------------
    // Notification

    /// Register a listener called synchronously after every change
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(DocumentEvent) + 'static,
    {
        self.events.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.events.unsubscribe(id)
    }

    fn notify_changed(&mut self) {
        self.events.emit(DocumentEvent::DataChanged);
    }

    // ---------------------------------------------------------------------
    // Undo / redo

    /// Copy of all undoable state
    pub fn snapshot(&self) -> DocumentSnapshot {
        DocumentSnapshot {
            sample_count: self.sample_count,
            signals: self.signals.clone(),
            vcd_signals: self.vcd_signals.clone(),
            markers: self.markers.clone(),
            marker_ids: self.marker_ids,
            arrows: self.arrows.clone(),
            arrow_ids: self.arrow_ids,
        }
    }

    fn restore(&mut self, snapshot: DocumentSnapshot) {
        self.sample_count = snapshot.sample_count;
        self.signals = snapshot.signals;
        self.vcd_signals = snapshot.vcd_signals;
        self.markers = snapshot.markers;
        self.marker_ids = snapshot.marker_ids;
        self.arrows = snapshot.arrows;
        self.arrow_ids = snapshot.arrow_ids;
    }

    /// Record the pre-edit state; called right before every undoable mutation
    fn checkpoint(&mut self) {
        let snapshot = self.snapshot();
        self.history.record(snapshot);
        self.events.emit(DocumentEvent::UndoStateChanged);
    }

    /// Revert the last edit. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let current = self.snapshot();
        match self.history.undo(current) {
            Ok(previous) => {
                self.restore(previous);
                self.notify_changed();
                self.events.emit(DocumentEvent::UndoStateChanged);
                true
            }
            Err(e) => {
                debug!("undo ignored: {}", e);
                false
            }
        }
    }

    /// Re-apply the last undone edit. Returns false when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let current = self.snapshot();
        match self.history.redo(current) {
            Ok(next) => {
                self.restore(next);
                self.notify_changed();
                self.events.emit(DocumentEvent::UndoStateChanged);
                true
            }
            Err(e) => {
                debug!("redo ignored: {}", e);
                false
            }
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_count(&self) -> usize {
        self.history.undo_count()
    }

    pub fn redo_count(&self) -> usize {
        self.history.redo_count()
    }

    // ---------------------------------------------------------------------
    // Resets

    /// Reset everything, including the undo history and the sample count
    pub fn clear(&mut self) {
        self.sample_count = 0;
        self.signals.clear();
        self.vcd_signals.clear();
        self.markers.clear();
        self.arrows.clear();
        self.marker_ids.reset();
        self.arrow_ids.reset();

        self.history.clear();
        self.events.emit(DocumentEvent::UndoStateChanged);
        self.notify_changed();
    }

    /// Remove every visible signal (and with them every arrow)
    pub fn clear_signals(&mut self) {
        if self.signals.is_empty() {
            return;
        }
        self.checkpoint();
        self.signals.clear();
        self.arrows.clear();
        self.arrow_ids.reset();
        self.notify_changed();
    }

    pub fn clear_markers(&mut self) {
        if self.markers.is_empty() {
            return;
        }
        self.checkpoint();
        self.markers.clear();
        self.marker_ids.reset();
        self.notify_changed();
    }

    pub fn clear_arrows(&mut self) {
        if self.arrows.is_empty() {
            return;
        }
        self.checkpoint();
        self.arrows.clear();
        self.arrow_ids.reset();
        self.notify_changed();
    }

    // ---------------------------------------------------------------------
    // Bulk replace

    /// Install loaded content in one step
    ///
    /// Signals are sized to `sample_count`; markers outside the range or
    /// duplicating an id/sample are dropped and the rest sorted; arrows are
    /// cleared since their signals no longer exist. Undo history is left
    /// untouched and no snapshot is recorded.
    pub fn replace_contents(&mut self, contents: DocumentContents) {
        let DocumentContents {
            sample_count,
            mut signals,
            vcd_signals,
            markers,
        } = contents;

        for signal in &mut signals {
            signal.resize(sample_count);
        }

        let mut kept: Vec<Marker> = Vec::with_capacity(markers.len());
        for marker in markers {
            let duplicate = kept
                .iter()
                .any(|m| m.id == marker.id || m.sample == marker.sample);
            if marker.id > 0 && marker.sample < sample_count && !duplicate {
                kept.push(marker);
            }
        }
        kept.sort_by_key(|m| m.sample);

        self.sample_count = sample_count;
        self.signals = signals;
        self.vcd_signals = vcd_signals;
        self.marker_ids.recompute(kept.iter().map(|m| m.id));
        self.markers = kept;
        self.arrows.clear();
        self.arrow_ids.reset();

        self.notify_changed();
    }
}

impl Default for WaveDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for WaveDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WaveDocument")
            .field("sample_count", &self.sample_count)
            .field("signals", &self.signals.len())
            .field("vcd_signals", &self.vcd_signals.len())
            .field("markers", &self.markers.len())
            .field("arrows", &self.arrows.len())
            .field("undo", &self.history.undo_count())
            .field("redo", &self.history.redo_count())
            .finish()
    }
}

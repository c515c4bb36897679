// Integration tests for document editing
// Exercises the editing facade the way a waveform editor front-end drives it

use std::cell::RefCell;
use std::rc::Rc;
use wavepaint::{Color, DocumentConfig, DocumentEvent, SignalKind, UNDEFINED_VALUE, WaveDocument};

const U: i64 = UNDEFINED_VALUE;

fn sample_document() -> WaveDocument {
    let mut doc = WaveDocument::new();
    doc.add_clock_signal("clk", 5, 2, 2);
    doc.add_bit_signal("rst_n");
    doc.add_vector_signal("data");
    doc.set_vector_range(2, 0, 7, 0xA5, "A5");
    doc.set_vector_range(2, 8, 15, 0x3C, "3C");
    doc.add_marker(4);
    doc.add_marker(12);
    doc.add_arrow(0, 3, 2, 8);
    doc
}

#[test]
fn test_clock_synthesis() {
    let mut doc = WaveDocument::new();
    let idx = doc.add_clock_signal("clk", 3, 2, 2).unwrap();

    assert_eq!(doc.sample_count(), 20);
    let clk = &doc.signal_list()[idx];
    assert_eq!(clk.kind, SignalKind::Bit);
    assert_eq!(&clk.values[..12], &[0, 0, 1, 1, 0, 0, 1, 1, 0, 0, 1, 1]);
    assert!(clk.values[12..].iter().all(|v| *v == U));
    assert_eq!(clk.values.len(), 20);
}

#[test]
fn test_clock_grows_document() {
    let mut doc = WaveDocument::new();
    doc.add_bit_signal("a");
    doc.add_clock_signal("clk", 8, 1, 2).unwrap();

    assert_eq!(doc.sample_count(), 24);
    for signal in doc.signal_list() {
        assert_eq!(signal.values.len(), 24);
        assert_eq!(signal.labels.len(), 24);
    }

    assert!(doc.add_clock_signal("bad", 0, 1, 1).is_none());
    assert!(doc.add_clock_signal("bad", 2, 0, 0).is_none());
}

#[test]
fn test_undo_redo_symmetry() {
    let mut doc = WaveDocument::new();
    let initial = doc.snapshot();

    doc.add_bit_signal("a");
    doc.add_vector_signal("b");
    doc.set_bit_value(0, 3, 1);
    doc.set_vector_range(1, 2, 5, 7, "7");
    doc.rename_signal(0, "renamed");
    doc.set_signal_color(1, Color::rgb(1, 2, 3));
    doc.move_signal(1, 0);
    doc.add_marker(6);
    doc.add_arrow(0, 1, 1, 2);
    doc.set_sample_count(12);
    let edited = doc.snapshot();

    let mut steps = 0;
    while doc.undo() {
        steps += 1;
    }
    assert_eq!(steps, 10);
    assert_eq!(doc.snapshot(), initial);

    while doc.redo() {}
    assert_eq!(doc.snapshot(), edited);
}

#[test]
fn test_new_edit_discards_redo() {
    let mut doc = WaveDocument::new();
    doc.add_bit_signal("a");
    doc.add_bit_signal("b");
    doc.undo();
    assert!(doc.can_redo());

    doc.add_vector_signal("c");
    assert!(!doc.can_redo());
    assert_eq!(doc.signal_list().len(), 2);
    assert_eq!(doc.signal_list()[1].name, "c");
}

#[test]
fn test_history_is_capped() {
    let config = DocumentConfig {
        max_undo_steps: 5,
        ..DocumentConfig::default()
    };
    let mut doc = WaveDocument::with_config(config);
    for i in 0..8 {
        doc.add_bit_signal(format!("s{}", i));
    }

    assert_eq!(doc.undo_count(), 5);
    while doc.undo() {}
    assert_eq!(doc.signal_list().len(), 3);
}

#[test]
fn test_rejected_edits_leave_history_alone() {
    let mut doc = sample_document();
    let count = doc.undo_count();
    let before = doc.snapshot();

    doc.set_bit_value(9, 0, 1);
    doc.set_bit_value(0, 99, 1);
    doc.set_vector_range(0, 0, 3, 1, "x");
    doc.remove_signal(9);
    doc.move_signal(0, 9);
    doc.rename_signal(9, "x");
    doc.remove_marker(99);
    doc.remove_arrow(99);
    assert!(doc.add_arrow(0, 0, 9, 0).is_none());
    assert!(doc.add_marker(20).is_none());

    assert_eq!(doc.undo_count(), count);
    assert_eq!(doc.snapshot(), before);
}

#[test]
fn test_arrows_follow_signals() {
    let mut doc = sample_document();
    let arrow = doc.arrow_list()[0];

    doc.move_signal(0, 2);
    let placement = doc.resolve_arrow(&arrow).unwrap();
    assert_eq!(placement.start_signal, 2);
    assert_eq!(placement.end_signal, 1);
    assert_eq!(placement.start_sample, 3);

    doc.remove_signal(1);
    assert!(doc.arrow_list().is_empty());
    assert_eq!(doc.next_arrow_id(), 1);

    doc.undo();
    assert_eq!(doc.arrow_placements().len(), 1);
}

#[test]
fn test_marker_ids_compact() {
    let mut doc = WaveDocument::new();
    assert_eq!(doc.add_marker(5), Some(1));
    assert_eq!(doc.add_marker(9), Some(2));
    assert_eq!(doc.add_marker(5), Some(1));

    doc.remove_marker(2);
    assert_eq!(doc.next_marker_id(), 2);
    assert_eq!(doc.add_marker(11), Some(2));

    doc.clear_markers();
    assert_eq!(doc.next_marker_id(), 1);
}

#[test]
fn test_cut_range_keeps_window() {
    let mut doc = sample_document();
    doc.cut_range(4, 11);

    assert_eq!(doc.sample_count(), 8);
    for signal in doc.signal_list() {
        assert_eq!(signal.values.len(), 8);
        assert_eq!(signal.labels.len(), 8);
    }
    assert_eq!(&doc.signal_list()[0].values[..4], &[0, 0, 1, 1]);
    assert_eq!(&doc.signal_list()[2].values[2..6], &[0xA5, 0xA5, 0x3C, 0x3C]);

    let samples: Vec<usize> = doc.marker_list().iter().map(|m| m.sample).collect();
    assert_eq!(samples, vec![0]);
    assert_eq!(doc.next_marker_id(), 2);
    assert!(doc.arrow_list().is_empty());

    doc.undo();
    assert_eq!(doc.sample_count(), 20);
    assert_eq!(doc.marker_list().len(), 2);
}

#[test]
fn test_signal_clipboard() {
    let mut doc = sample_document();
    doc.copy_signal(2);
    let idx = doc.paste_signal(0).unwrap();
    let idx2 = doc.paste_signal(99).unwrap();

    assert_eq!(idx, 0);
    assert_eq!(idx2, 4);
    assert_eq!(doc.signal_list()[0].name, "data_copy1");
    assert_eq!(doc.signal_list()[4].name, "data_copy2");
    assert_eq!(doc.signal_list()[0].values, doc.signal_list()[3].values);
    assert_ne!(doc.signal_list()[0].id, doc.signal_list()[3].id);
}

#[test]
fn test_block_paste_overflow_clamp() {
    let mut doc = WaveDocument::new();
    for name in ["a", "b", "c"] {
        doc.add_vector_signal(name);
    }
    for s in 0..3 {
        doc.set_vector_range(s, 0, 4, s as i64 + 1, "");
    }

    doc.copy_block(0, 2, 0, 4);
    let last = doc.signal_list().len() - 1;
    doc.paste_block(last, 0);

    assert_eq!(&doc.signal_list()[2].values[..5], &[1, 1, 1, 1, 1]);
    assert_eq!(doc.signal_list()[2].values[5], U);
    assert_eq!(doc.signal_list()[1].values[0], 2);
}

#[test]
fn test_every_edit_notifies_once() {
    let mut doc = WaveDocument::new();
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    doc.subscribe(move |event| sink.borrow_mut().push(event));

    doc.add_bit_signal("a");
    doc.toggle_bit_value(0, 0);
    doc.clear_sample(0, 0);

    let changed = events
        .borrow()
        .iter()
        .filter(|e| **e == DocumentEvent::DataChanged)
        .count();
    assert_eq!(changed, 3);
}

#[test]
fn test_clear_resets_everything() {
    let mut doc = sample_document();
    doc.clear();

    assert_eq!(doc.sample_count(), 0);
    assert!(doc.signal_list().is_empty());
    assert!(doc.marker_list().is_empty());
    assert!(doc.arrow_list().is_empty());
    assert!(!doc.can_undo());
    assert_eq!(doc.next_marker_id(), 1);
}

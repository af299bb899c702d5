use super::*;
use protocol::ElementKind;

fn element() -> DrawingElement {
    DrawingElement::begin(ElementKind::Pencil, (1.0, 2.0), "#000000")
}

// =============================================================
// Local commits
// =============================================================

#[test]
fn commit_appends_and_snapshots_history() {
    let mut canvas = CanvasState::new();
    let e1 = element();

    let log = canvas.commit(e1.clone());

    assert_eq!(log, vec![e1.clone()]);
    assert_eq!(canvas.elements, vec![e1]);
    assert_eq!(canvas.history_depth(), 1);
    assert_eq!(canvas.redo_depth(), 0);
}

#[test]
fn undo_then_redo_restores_the_exact_log() {
    let mut canvas = CanvasState::new();
    let e1 = element();
    let e2 = element();
    canvas.commit(e1.clone());
    canvas.commit(e2.clone());

    let undone = canvas.undo().expect("history should not be empty");
    assert_eq!(undone, vec![e1.clone()]);
    assert_eq!(canvas.elements, vec![e1.clone()]);

    let redone = canvas.redo().expect("redo should not be empty");
    assert_eq!(redone, vec![e1.clone(), e2.clone()]);
    assert_eq!(canvas.elements, vec![e1, e2]);
}

#[test]
fn undo_on_empty_history_is_none() {
    let mut canvas = CanvasState::new();
    assert!(canvas.undo().is_none());
    assert!(canvas.redo().is_none());
}

#[test]
fn commit_invalidates_the_redo_branch() {
    let mut canvas = CanvasState::new();
    canvas.commit(element());
    canvas.commit(element());
    canvas.undo().expect("undo");
    assert_eq!(canvas.redo_depth(), 1);

    // Drawing after an undo forks history; the old branch is unreachable.
    canvas.commit(element());
    assert_eq!(canvas.redo_depth(), 0);
    assert!(canvas.redo().is_none());
}

#[test]
fn clear_empties_the_log_but_stays_undoable() {
    let mut canvas = CanvasState::new();
    let e1 = element();
    canvas.commit(e1.clone());

    let log = canvas.clear();
    assert!(log.is_empty());
    assert!(canvas.elements.is_empty());
    assert_eq!(canvas.redo_depth(), 0);

    let undone = canvas.undo().expect("clear should be undoable");
    assert_eq!(undone, vec![e1]);
}

// =============================================================
// Remote paths
// =============================================================

#[test]
fn apply_append_pushes_in_arrival_order() {
    let mut canvas = CanvasState::new();
    let e1 = element();
    let e2 = element();
    canvas.apply_append(e1.clone());
    canvas.apply_append(e2.clone());

    assert_eq!(canvas.elements, vec![e1, e2]);
    // Remote appends are not local actions; nothing to undo.
    assert_eq!(canvas.history_depth(), 0);
}

#[test]
fn apply_replace_swaps_matching_id_only() {
    let mut canvas = CanvasState::new();
    let e1 = element();
    canvas.apply_append(e1.clone());

    let mut grown = e1.clone();
    grown.path.push((5.0, 6.0));
    canvas.apply_replace(grown.clone());
    assert_eq!(canvas.elements, vec![grown.clone()]);

    let stranger = element();
    canvas.apply_replace(stranger);
    assert_eq!(canvas.elements, vec![grown]);
}

#[test]
fn apply_snapshot_replaces_log_and_drops_both_stacks() {
    let mut canvas = CanvasState::new();
    canvas.commit(element());
    canvas.commit(element());
    canvas.undo().expect("undo");
    assert!(canvas.history_depth() > 0 || canvas.redo_depth() > 0);

    let remote = vec![element()];
    canvas.apply_snapshot(remote.clone());

    assert_eq!(canvas.elements, remote);
    assert_eq!(canvas.history_depth(), 0);
    assert_eq!(canvas.redo_depth(), 0);
    assert!(canvas.undo().is_none());
}

//! Canvas state: the local element log and undo/redo stacks.
//!
//! The log mirrors the server's canonical order for the joined room. Undo
//! and redo are local-only: they snapshot the whole log, and every committed
//! action invalidates the redo branch. A remote full-log resync drops both
//! stacks — keeping them would let a later local undo revert a peer's clear
//! or undo.

#[cfg(test)]
#[path = "canvas_test.rs"]
mod canvas_test;

use protocol::DrawingElement;

/// Local mirror of the room's element log plus undo/redo history.
#[derive(Clone, Debug, Default)]
pub struct CanvasState {
    /// Elements in server acceptance order.
    pub elements: Vec<DrawingElement>,
    /// The stroke being drawn. Rendered on top of the log but not part of
    /// it until commit.
    pub stroke: Option<DrawingElement>,
    history: Vec<Vec<DrawingElement>>,
    redo: Vec<Vec<DrawingElement>>,
}

impl CanvasState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Remote paths
    // -------------------------------------------------------------------------

    /// Incoming `drawElement`: a peer started a stroke.
    pub fn apply_append(&mut self, element: DrawingElement) {
        self.elements.push(element);
    }

    /// Incoming `updateElement`: replace by id, in place. No-op when the id
    /// is unknown; the next full resync converges the log anyway.
    pub fn apply_replace(&mut self, element: DrawingElement) {
        if let Some(slot) = self.elements.iter_mut().find(|el| el.id == element.id) {
            *slot = element;
        }
    }

    /// Incoming `updateDrawing`: the authoritative resync. Replaces the log
    /// wholesale and invalidates both local stacks.
    pub fn apply_snapshot(&mut self, elements: Vec<DrawingElement>) {
        self.elements = elements;
        self.history.clear();
        self.redo.clear();
    }

    // -------------------------------------------------------------------------
    // Local actions — each returns the full log to emit as `updateDrawing`
    // -------------------------------------------------------------------------

    /// Commit a finished stroke: snapshot the log for undo, append, and
    /// invalidate the redo branch.
    pub fn commit(&mut self, element: DrawingElement) -> Vec<DrawingElement> {
        self.history.push(self.elements.clone());
        self.elements.push(element);
        self.redo.clear();
        self.elements.clone()
    }

    /// Step back to the previous snapshot. `None` when there is nothing to
    /// undo.
    pub fn undo(&mut self) -> Option<Vec<DrawingElement>> {
        let previous = self.history.pop()?;
        self.redo.push(std::mem::replace(&mut self.elements, previous));
        Some(self.elements.clone())
    }

    /// Step forward again. `None` when there is nothing to redo.
    pub fn redo(&mut self) -> Option<Vec<DrawingElement>> {
        let next = self.redo.pop()?;
        self.history.push(std::mem::replace(&mut self.elements, next));
        Some(self.elements.clone())
    }

    /// Clear the canvas. The cleared log stays reachable through undo, but
    /// the redo branch is gone.
    pub fn clear(&mut self) -> Vec<DrawingElement> {
        self.history.push(std::mem::take(&mut self.elements));
        self.redo.clear();
        self.elements.clone()
    }

    // -------------------------------------------------------------------------
    // Introspection
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn history_depth(&self) -> usize {
        self.history.len()
    }

    #[must_use]
    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }
}

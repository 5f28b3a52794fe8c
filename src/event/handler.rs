//! FIFO buffer between a renderer and the form.
//!
//! Renderers push [`FormEvent`]s as they happen; the session drains them in
//! arrival order and applies each to the controller.

use std::collections::VecDeque;

use super::message::FormEvent;

// ---------------------------------------------------------------------------
// EventQueue
// ---------------------------------------------------------------------------

/// Queue of pending renderer events.
#[derive(Debug, Default)]
pub struct EventQueue {
    queue: VecDeque<FormEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue an event for later processing.
    pub fn push(&mut self, event: FormEvent) {
        self.queue.push_back(event);
    }

    /// Drain all pending events in arrival order.
    pub fn drain(&mut self) -> Vec<FormEvent> {
        self.queue.drain(..).collect()
    }

    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

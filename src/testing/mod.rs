//! Headless testing helpers: FormPilot, text renderer, snapshot outline.
//!
//! Use the [`FormPilot`] to drive a [`Form`](crate::session::Form) without a
//! real renderer, and [`render_to_string`] to capture a render tree as plain
//! text for snapshot-style assertions.

pub mod pilot;
pub mod snapshot;

pub use pilot::FormPilot;
pub use snapshot::{render_to_string, TextRenderer};

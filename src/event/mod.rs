//! Renderer events and the event queue.

pub mod handler;
pub mod message;

pub use handler::EventQueue;
pub use message::FormEvent;

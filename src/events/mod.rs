//! Event handling for VoteSphere.
//!
//! This module provides input event handling; the poll heartbeat itself is
//! a tokio interval owned by the app loop.

mod handler;
mod input;

pub use handler::EventHandler;
pub use input::{InputEvent, Key};

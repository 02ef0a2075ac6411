//! # VoteSphere - Election Sentiment TUI
//!
//! A terminal dashboard for the Bangladesh national election that polls a
//! grounded generative-AI search API for voting-intention predictions and a
//! live social-sentiment feed. Built with ratatui.
//!
//! ## Architecture
//!
//! The application follows a unidirectional data-flow pattern:
//!
//! - **App**: Core application lifecycle and the event loop
//! - **Sync**: Poll timing, rate-limit backoff, and reentrancy guarding
//! - **Predictor**: Remote generative-AI API integration layer
//! - **State**: Centralized state management
//! - **Storage**: Durable local slots for history and feedback
//! - **UI**: Layout and rendering logic
//! - **Events**: Input handling and event processing
//! - **Config**: Configuration management

pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod predictor;
pub mod state;
pub mod storage;
pub mod sync;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use error::{Error, Result};
pub use sync::{PollController, SyncErrorKind, SyncOutcome, SyncPhase};

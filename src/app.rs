//! Main application module.
//!
//! This module contains the main `App` struct that coordinates
//! the event loop, the poll controller, state management, and rendering.

use crate::config::Config;
use crate::error::Result;
use crate::events::EventHandler;
use crate::predictor::{ElectionPredictor, Predictor};
use crate::state::{Action, Notification, Store, SyncError};
use crate::storage::Storage;
use crate::sync::{PollController, SyncErrorKind, SyncOutcome};
use crate::ui::Ui;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// The main application.
pub struct App {
    /// Terminal.
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application store.
    store: Store,
    /// Event handler.
    event_handler: EventHandler,
    /// Action receiver.
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Remote predictor, absent when no API key is configured.
    predictor: Option<Box<dyn Predictor>>,
    /// Poll timing and backoff state machine.
    controller: PollController,
    /// Durable slots for history and feedback.
    storage: Storage,
    /// Configuration.
    config: Config,
}

impl App {
    /// Create a new application.
    pub fn new(config: Config) -> Result<Self> {
        // Set up terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        // Create action channel
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        // Create store, seeded from the durable slots
        let storage = Storage::open()?;
        let mut store = Store::new(action_tx, config.sync.history_capacity);
        store.history = storage.load_history(config.sync.history_capacity);
        store.feedback = storage.load_feedback();

        // Create event handler
        let event_handler = EventHandler::new(config.keybindings.clone());

        // Try to create the predictor client
        let predictor: Option<Box<dyn Predictor>> =
            if config.predictor.resolved_api_key().is_empty() {
                tracing::warn!("no API key configured, predictions disabled");
                None
            } else {
                match ElectionPredictor::new(config.predictor.clone()) {
                    Ok(client) => Some(Box::new(client)),
                    Err(e) => {
                        tracing::warn!("failed to create predictor client: {}", e);
                        None
                    }
                }
            };

        let controller = PollController::new(&config.sync);

        Ok(Self {
            terminal,
            store,
            event_handler,
            action_rx,
            predictor,
            controller,
            storage,
            config,
        })
    }

    /// Run the application event loop.
    pub async fn run(&mut self) -> Result<()> {
        if self.predictor.is_some() {
            // Kick off the first prediction immediately.
            self.store.dispatch(Action::RequestSync { manual: true })?;
        } else {
            self.store.reduce(Action::ShowNotification(Notification::warning(
                "No API key configured. Set predictor.api_key or VOTESPHERE_API_KEY.",
            )));
        }

        let heartbeat_secs = self.config.ui.heartbeat_secs.max(1);
        let mut heartbeat = tokio::time::interval(Duration::from_secs(heartbeat_secs));
        heartbeat.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        // Main event loop
        loop {
            // Render UI
            self.terminal.draw(|frame| {
                Ui::render(frame, &self.store);
            })?;

            tokio::select! {
                // Countdown heartbeat; fires the automatic sync on expiry
                _ = heartbeat.tick() => {
                    if self.controller.tick(heartbeat_secs) {
                        self.run_sync(false).await;
                    }
                    self.publish_poll_state();
                }

                // Handle terminal events
                result = self.event_handler.next() => {
                    if let Some(action) = result? {
                        self.handle_action(action).await?;
                    }
                }

                // Handle actions from the channel
                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action).await?;
                }
            }

            // Check if we should quit
            if self.store.app.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Handle an action.
    async fn handle_action(&mut self, action: Action) -> Result<()> {
        match action {
            Action::RequestSync { manual } => {
                if manual {
                    self.store.reduce(Action::ClearError);
                }
                self.run_sync(manual).await;
            }
            Action::VoteUp | Action::VoteDown => {
                self.store.reduce(action);
                if let Err(e) = self.storage.save_feedback(&self.store.feedback) {
                    tracing::warn!(error = %e, "failed to persist feedback votes");
                }
            }
            _ => {
                // Let the store handle the action
                self.store.reduce(action);
            }
        }

        Ok(())
    }

    /// Run one guarded sync attempt against the remote predictor.
    async fn run_sync(&mut self, manual: bool) {
        let Some(predictor) = &self.predictor else {
            if manual {
                self.store.reduce(Action::ShowNotification(Notification::warning(
                    "No API key configured. Set predictor.api_key or VOTESPHERE_API_KEY.",
                )));
            }
            return;
        };

        execute_sync(
            &mut self.controller,
            predictor.as_ref(),
            &mut self.store,
            &self.storage,
            &self.config.predictor.election_date,
            manual,
        )
        .await;

        self.publish_poll_state();
    }

    /// Mirror the controller's countdown into the app state for the UI.
    fn publish_poll_state(&mut self) {
        self.store.reduce(Action::PollStateChanged {
            next_sync_secs: self.controller.state().seconds_until_next_sync,
            backoff_active: self.controller.state().backoff_active,
        });
    }
}

/// One sync attempt end to end: guard entry through the controller, call the
/// predictor, reconcile the outcome into the store and the durable history.
///
/// A dropped request (in-flight call, or automatic request inside the
/// minimum spacing) leaves everything untouched.
async fn execute_sync(
    controller: &mut PollController,
    predictor: &dyn Predictor,
    store: &mut Store,
    storage: &Storage,
    election_date: &str,
    manual: bool,
) {
    if !controller.begin_sync(manual, Instant::now()) {
        return;
    }
    store.reduce(Action::SyncStarted);

    match predictor.predict(election_date).await {
        Ok(bundle) => {
            controller.complete_sync(SyncOutcome::Success, Instant::now());
            store.reduce(Action::SetConnected(true));
            store.reduce(Action::ClearError);
            store.reduce(Action::PredictionLoaded {
                snapshot: bundle.snapshot,
                feed: bundle.feed,
            });
            if let Err(e) = storage.save_history(&store.history) {
                tracing::warn!(error = %e, "failed to persist sentiment history");
            }
        }
        Err(err) => {
            let kind = SyncErrorKind::from(&err);
            let surfaced = controller.complete_sync(SyncOutcome::Failed(kind), Instant::now());
            if kind == SyncErrorKind::Transient {
                store.reduce(Action::SetConnected(false));
            }
            match surfaced {
                Some(kind) => {
                    tracing::warn!(error = %err, "sync failed");
                    store.reduce(Action::SyncFailed {
                        error: Some(sync_error_banner(kind, &err)),
                    });
                }
                None => {
                    tracing::info!(error = %err, "automatic sync rate limited, backing off silently");
                    store.reduce(Action::SyncFailed { error: None });
                }
            }
        }
    }
}

fn sync_error_banner(kind: SyncErrorKind, err: &crate::Error) -> SyncError {
    let kind_label = match kind {
        SyncErrorKind::RateLimited => "Rate Limit (429)",
        SyncErrorKind::Transient => "Network",
        SyncErrorKind::MalformedResponse => "Bad Response",
    };
    SyncError {
        message: err.to_string(),
        kind_label: kind_label.to_string(),
    }
}

impl Drop for App {
    fn drop(&mut self) {
        // Restore terminal state
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        );
        let _ = self.terminal.show_cursor();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SyncConfig;
    use crate::error::Error;
    use crate::predictor::{MockPredictor, PredictionBundle};
    use crate::state::{
        PartyShare, Platform, PredictionSnapshot, Sentiment, SentimentPost,
    };
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn sync_config() -> SyncConfig {
        SyncConfig {
            baseline_interval_secs: 60,
            backoff_interval_secs: 300,
            min_spacing_secs: 20,
            history_capacity: 50,
        }
    }

    fn temp_storage() -> Storage {
        let dir = std::env::temp_dir().join(format!("votesphere-app-{}", uuid::Uuid::new_v4()));
        Storage::at(dir).unwrap()
    }

    fn store() -> Store {
        let (tx, _rx) = mpsc::unbounded_channel();
        Store::new(tx, 50)
    }

    fn sample_bundle() -> PredictionBundle {
        PredictionBundle {
            snapshot: PredictionSnapshot {
                party_shares: vec![PartyShare {
                    party: "Awami League".to_string(),
                    percentage: dec!(42),
                    leader: "Sheikh Hasina".to_string(),
                    color_tag: "#006a4e".to_string(),
                }],
                analysis: "steady".to_string(),
                projected_leader: "Sheikh Hasina".to_string(),
                sources: Vec::new(),
                captured_at: chrono::Utc::now(),
            },
            feed: vec![SentimentPost {
                platform: Platform::Facebook,
                author: "user1".to_string(),
                content: "big rally today".to_string(),
                sentiment: Sentiment::Neutral,
                posted_at_label: "Just now".to_string(),
            }],
        }
    }

    #[tokio::test]
    async fn successful_sync_updates_store_and_persists_history() {
        let mut controller = PollController::new(&sync_config());
        let mut store = store();
        let storage = temp_storage();

        let mut predictor = MockPredictor::new();
        predictor
            .expect_predict()
            .times(1)
            .returning(|_| Ok(sample_bundle()));

        execute_sync(
            &mut controller,
            &predictor,
            &mut store,
            &storage,
            "12th February 2026",
            true,
        )
        .await;

        assert!(store.prediction.snapshot.is_some());
        assert_eq!(store.feed.posts.len(), 1);
        assert_eq!(store.history.len(), 1);
        assert!(store.app.connected);
        assert!(!store.app.loading);

        // The merged history landed in the durable slot.
        let reloaded = storage.load_history(50);
        assert_eq!(reloaded.len(), 1);
    }

    #[tokio::test]
    async fn manual_rate_limit_surfaces_an_error_banner() {
        let mut controller = PollController::new(&sync_config());
        let mut store = store();
        let storage = temp_storage();

        let mut predictor = MockPredictor::new();
        predictor
            .expect_predict()
            .times(1)
            .returning(|_| Err(Error::RateLimited));

        execute_sync(
            &mut controller,
            &predictor,
            &mut store,
            &storage,
            "12th February 2026",
            true,
        )
        .await;

        let error = store.app.error.as_ref().expect("banner expected");
        assert_eq!(error.kind_label, "Rate Limit (429)");
        assert!(controller.state().backoff_active);
        assert!(!store.app.loading);
    }

    #[tokio::test]
    async fn automatic_rate_limit_stays_silent_but_backs_off() {
        let mut controller = PollController::new(&sync_config());
        let mut store = store();
        let storage = temp_storage();

        let mut predictor = MockPredictor::new();
        predictor
            .expect_predict()
            .times(1)
            .returning(|_| Err(Error::RateLimited));

        execute_sync(
            &mut controller,
            &predictor,
            &mut store,
            &storage,
            "12th February 2026",
            false,
        )
        .await;

        assert!(store.app.error.is_none());
        assert!(controller.state().backoff_active);
        assert_eq!(controller.current_interval(), 300);
        assert!(!store.app.loading);
    }

    #[tokio::test]
    async fn transient_failure_marks_offline_and_keeps_the_interval() {
        let mut controller = PollController::new(&sync_config());
        let mut store = store();
        let storage = temp_storage();

        let mut predictor = MockPredictor::new();
        predictor
            .expect_predict()
            .times(1)
            .returning(|_| Err(Error::network("connection reset")));

        execute_sync(
            &mut controller,
            &predictor,
            &mut store,
            &storage,
            "12th February 2026",
            false,
        )
        .await;

        assert!(!store.app.connected);
        let error = store.app.error.as_ref().expect("banner expected");
        assert_eq!(error.kind_label, "Network");
        assert_eq!(controller.current_interval(), 60);
    }

    #[tokio::test]
    async fn dropped_request_never_reaches_the_predictor() {
        let mut controller = PollController::new(&sync_config());
        let mut store = store();
        let storage = temp_storage();

        // First attempt within spacing, so the follow-up automatic request
        // must be dropped before the predictor is consulted.
        controller.begin_sync(false, Instant::now());
        controller.complete_sync(SyncOutcome::Success, Instant::now());

        let mut predictor = MockPredictor::new();
        predictor.expect_predict().times(0);

        execute_sync(
            &mut controller,
            &predictor,
            &mut store,
            &storage,
            "12th February 2026",
            false,
        )
        .await;

        assert!(store.prediction.snapshot.is_none());
        assert!(!store.app.loading);
    }
}

//! The poll controller.
//!
//! Owns the timing, throttling, rate-limit backoff and reentrancy guarding
//! for calls to the remote predictor. The controller never performs network
//! IO itself: the app asks it whether a sync may start (`begin_sync`), runs
//! the call, and reports back (`complete_sync`). All decisions are driven by
//! injected instants so tests never touch the wall clock.

use crate::config::SyncConfig;
use crate::error::Error;
use std::time::{Duration, Instant};

/// The controller's state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncPhase {
    /// Waiting for the countdown or a manual trigger.
    #[default]
    Idle,
    /// A call to the remote predictor is in flight.
    Fetching,
    /// A rate-limit failure put the controller on the elevated interval.
    CooldownBackoff,
}

/// Classification of a failed sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncErrorKind {
    RateLimited,
    Transient,
    MalformedResponse,
}

impl From<&Error> for SyncErrorKind {
    fn from(err: &Error) -> Self {
        match err {
            Error::RateLimited => Self::RateLimited,
            Error::MalformedResponse(_) | Error::Serialization(_) => Self::MalformedResponse,
            _ => Self::Transient,
        }
    }
}

/// Outcome of one sync attempt, as reported by the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Success,
    Failed(SyncErrorKind),
}

/// Mutable polling state. Created at startup, owned by the controller,
/// never persisted.
#[derive(Debug, Clone)]
pub struct PollState {
    /// When the last attempt (successful or not) started.
    pub last_attempt: Option<Instant>,
    /// When the last successful fetch completed.
    pub last_successful_fetch: Option<Instant>,
    /// Countdown to the next automatic sync.
    pub seconds_until_next_sync: u64,
    /// Whether the elevated interval is active.
    pub backoff_active: bool,
    /// Classification of the most recent failure, cleared on success.
    pub last_error_kind: Option<SyncErrorKind>,
}

/// Decides when the remote predictor is called and reconciles attempt
/// outcomes into the next-sync schedule.
#[derive(Debug)]
pub struct PollController {
    baseline_interval: u64,
    backoff_interval: u64,
    min_spacing: Duration,
    phase: SyncPhase,
    /// Whether the in-flight attempt was user-triggered.
    in_flight_manual: bool,
    state: PollState,
}

impl PollController {
    /// Create a controller armed with the baseline interval.
    pub fn new(config: &SyncConfig) -> Self {
        Self {
            baseline_interval: config.baseline_interval_secs,
            backoff_interval: config.backoff_interval_secs,
            min_spacing: Duration::from_secs(config.min_spacing_secs),
            phase: SyncPhase::Idle,
            in_flight_manual: false,
            state: PollState {
                last_attempt: None,
                last_successful_fetch: None,
                seconds_until_next_sync: config.baseline_interval_secs,
                backoff_active: false,
                last_error_kind: None,
            },
        }
    }

    pub fn phase(&self) -> SyncPhase {
        self.phase
    }

    pub fn state(&self) -> &PollState {
        &self.state
    }

    /// The interval currently governing automatic syncs.
    pub fn current_interval(&self) -> u64 {
        if self.state.backoff_active {
            self.backoff_interval
        } else {
            self.baseline_interval
        }
    }

    /// Guarded entry into the `Fetching` phase.
    ///
    /// Returns true when the caller should go ahead and invoke the remote
    /// predictor. While a call is in flight every further request, manual or
    /// automatic, is dropped (not queued) and leaves the state untouched.
    /// Automatic requests are additionally dropped when the previous attempt
    /// started less than the minimum spacing ago; manual requests bypass the
    /// spacing check.
    pub fn begin_sync(&mut self, manual: bool, now: Instant) -> bool {
        if self.phase == SyncPhase::Fetching {
            tracing::debug!(manual, "sync already in flight, dropping request");
            return false;
        }

        if !manual
            && let Some(last) = self.state.last_attempt
            && now.duration_since(last) < self.min_spacing
        {
            tracing::debug!("automatic sync inside minimum spacing, dropping request");
            return false;
        }

        self.state.last_attempt = Some(now);
        self.in_flight_manual = manual;
        self.phase = SyncPhase::Fetching;
        true
    }

    /// Reconcile the outcome of the attempt started by `begin_sync`.
    ///
    /// Returns the error kind to surface to the user, if any. Rate-limit
    /// failures on automatic attempts stay silent so the passive refresh
    /// cadence is not interrupted.
    pub fn complete_sync(&mut self, outcome: SyncOutcome, now: Instant) -> Option<SyncErrorKind> {
        let manual = self.in_flight_manual;
        self.in_flight_manual = false;

        match outcome {
            SyncOutcome::Success => {
                self.phase = SyncPhase::Idle;
                self.state.backoff_active = false;
                self.state.last_error_kind = None;
                self.state.last_successful_fetch = Some(now);
                self.state.seconds_until_next_sync = self.baseline_interval;
                None
            }
            SyncOutcome::Failed(SyncErrorKind::RateLimited) => {
                self.phase = SyncPhase::CooldownBackoff;
                self.state.backoff_active = true;
                self.state.last_error_kind = Some(SyncErrorKind::RateLimited);
                self.state.seconds_until_next_sync = self.backoff_interval;
                manual.then_some(SyncErrorKind::RateLimited)
            }
            SyncOutcome::Failed(kind) => {
                // Transient and malformed-response failures leave the sync
                // interval alone; retry is the next tick or a manual action.
                self.phase = if self.state.backoff_active {
                    SyncPhase::CooldownBackoff
                } else {
                    SyncPhase::Idle
                };
                self.state.last_error_kind = Some(kind);
                Some(kind)
            }
        }
    }

    /// One UI-heartbeat decrement of the countdown.
    ///
    /// Returns true when the countdown expired; the caller should then run
    /// an automatic sync. The countdown re-arms with whichever interval is
    /// active.
    pub fn tick(&mut self, heartbeat_secs: u64) -> bool {
        if self.state.seconds_until_next_sync > heartbeat_secs {
            self.state.seconds_until_next_sync -= heartbeat_secs;
            return false;
        }
        self.state.seconds_until_next_sync = self.current_interval();
        true
    }
}

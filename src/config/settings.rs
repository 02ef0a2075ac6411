//! Configuration settings for VoteSphere.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remote predictor configuration.
    pub predictor: PredictorConfig,
    /// Sync/polling configuration.
    pub sync: SyncConfig,
    /// UI configuration.
    pub ui: UiConfig,
    /// Key bindings.
    pub keybindings: KeyBindings,
    /// Theme configuration.
    pub theme: ThemeConfig,
}

impl Config {
    /// Load configuration from file, returning default if file doesn't exist or fails.
    pub fn load_or_default() -> crate::Result<Self> {
        Self::load(None)
    }

    /// Load configuration from file.
    pub fn load(path: Option<PathBuf>) -> crate::Result<Self> {
        let config_path = path.unwrap_or_else(|| {
            super::config_dir()
                .map(|p| p.join("config.toml"))
                .unwrap_or_else(|_| PathBuf::from("config.toml"))
        });

        let mut config: Self = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content).map_err(|e| crate::Error::config(e.to_string()))?
        } else {
            Self::default()
        };

        config.sync.normalize();
        Ok(config)
    }

    /// Save configuration to file.
    pub fn save(&self, path: Option<PathBuf>) -> crate::Result<()> {
        let config_path = path.unwrap_or_else(|| {
            super::config_dir()
                .map(|p| p.join("config.toml"))
                .unwrap_or_else(|_| PathBuf::from("config.toml"))
        });

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::config(e.to_string()))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }
}

/// Remote predictor (generative-AI search API) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictorConfig {
    /// Base URL of the generative language API.
    pub base_url: String,
    /// Model identifier to query.
    pub model: String,
    /// API key. Falls back to the `VOTESPHERE_API_KEY` environment variable
    /// when empty.
    pub api_key: String,
    /// Election date label interpolated into the prompt.
    pub election_date: String,
    /// Request timeout in seconds. A hung call resolves as a network error
    /// instead of leaving the controller busy forever.
    pub timeout_secs: u64,
    /// Maximum in-call attempts before surfacing failure upward.
    pub max_retries: u32,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-3-flash-preview".to_string(),
            api_key: String::new(),
            election_date: "12th February 2026".to_string(),
            timeout_secs: 30,
            max_retries: 3,
        }
    }
}

impl PredictorConfig {
    /// Resolve the API key, preferring the config file over the environment.
    pub fn resolved_api_key(&self) -> String {
        if !self.api_key.is_empty() {
            return self.api_key.clone();
        }
        std::env::var("VOTESPHERE_API_KEY").unwrap_or_default()
    }
}

/// Poll controller configuration.
///
/// The exact durations are constants, not contracts; the only load-bearing
/// relationship is `backoff_interval_secs > baseline_interval_secs`, which
/// `normalize` enforces at load time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Normal time between automatic sync attempts, in seconds.
    pub baseline_interval_secs: u64,
    /// Elevated interval entered after a rate-limit failure, in seconds.
    pub backoff_interval_secs: u64,
    /// Minimum spacing between automatic attempts, in seconds.
    pub min_spacing_secs: u64,
    /// Maximum number of posts retained in the history archive.
    pub history_capacity: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            baseline_interval_secs: 60,
            backoff_interval_secs: 300,
            min_spacing_secs: 20,
            history_capacity: 50,
        }
    }
}

impl SyncConfig {
    /// Clamp values into sane ranges.
    pub fn normalize(&mut self) {
        self.baseline_interval_secs = self.baseline_interval_secs.max(1);
        if self.backoff_interval_secs <= self.baseline_interval_secs {
            self.backoff_interval_secs = self.baseline_interval_secs * 5;
        }
        self.history_capacity = self.history_capacity.clamp(20, 50);
    }
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Tick rate in milliseconds for UI redraws.
    pub tick_rate_ms: u64,
    /// Heartbeat in seconds driving the poll controller countdown.
    pub heartbeat_secs: u64,
    /// Number of feed posts to display per page.
    pub feed_per_page: usize,
    /// Show status bar.
    pub show_status_bar: bool,
    /// Show help bar.
    pub show_help_bar: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 250,
            heartbeat_secs: 1,
            feed_per_page: 12,
            show_status_bar: true,
            show_help_bar: true,
        }
    }
}

/// Key bindings configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Quit the application.
    pub quit: String,
    /// Show help.
    pub help: String,
    /// Navigate up.
    pub up: String,
    /// Navigate down.
    pub down: String,
    /// Manually re-run the prediction (retry affordance).
    pub refresh: String,
    /// Switch to dashboard view.
    pub dashboard: String,
    /// Switch to sentiment feed view.
    pub feed: String,
    /// Switch to history archive view.
    pub history: String,
    /// Switch to grounding sources view.
    pub sources: String,
    /// Toggle rally mode (background audio on/off).
    pub rally_mode: String,
    /// Thumbs-up the selected feed post.
    pub vote_up: String,
    /// Thumbs-down the selected feed post.
    pub vote_down: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: "q".to_string(),
            help: "?".to_string(),
            up: "k".to_string(),
            down: "j".to_string(),
            refresh: "r".to_string(),
            dashboard: "1".to_string(),
            feed: "2".to_string(),
            history: "3".to_string(),
            sources: "4".to_string(),
            rally_mode: "m".to_string(),
            vote_up: "+".to_string(),
            vote_down: "-".to_string(),
        }
    }
}

/// Theme configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Primary color (hex).
    pub primary: String,
    /// Accent color (hex).
    pub accent: String,
    /// Success color (hex).
    pub success: String,
    /// Warning color (hex).
    pub warning: String,
    /// Error color (hex).
    pub error: String,
    /// Border color (hex).
    pub border: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            primary: "#10b981".to_string(),
            accent: "#ff7043".to_string(),
            success: "#66bb6a".to_string(),
            warning: "#ffa726".to_string(),
            error: "#ef5350".to_string(),
            border: "#45475a".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_keep_backoff_above_baseline() {
        let sync = SyncConfig::default();
        assert!(sync.backoff_interval_secs > sync.baseline_interval_secs);
    }

    #[test]
    fn normalize_repairs_inverted_intervals() {
        let mut sync = SyncConfig {
            baseline_interval_secs: 120,
            backoff_interval_secs: 30,
            ..Default::default()
        };
        sync.normalize();
        assert!(sync.backoff_interval_secs > sync.baseline_interval_secs);
    }

    #[test]
    fn normalize_clamps_history_capacity() {
        let mut sync = SyncConfig {
            history_capacity: 500,
            ..Default::default()
        };
        sync.normalize();
        assert_eq!(sync.history_capacity, 50);

        sync.history_capacity = 3;
        sync.normalize();
        assert_eq!(sync.history_capacity, 20);
    }

    #[test]
    fn config_roundtrips_through_toml() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(
            parsed.sync.baseline_interval_secs,
            config.sync.baseline_interval_secs
        );
        assert_eq!(parsed.predictor.model, config.predictor.model);
    }
}

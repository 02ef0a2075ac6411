//! Event handler for processing input events.

use crate::config::KeyBindings;
use crate::error::Result;
use crate::state::{Action, View};
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use std::time::Duration;

/// Handles input events and produces actions.
pub struct EventHandler {
    keybindings: KeyBindings,
}

impl EventHandler {
    /// Create a new event handler with the given key bindings.
    pub fn new(keybindings: KeyBindings) -> Self {
        Self { keybindings }
    }

    /// Get the next action from user input.
    pub async fn next(&mut self) -> Result<Option<Action>> {
        if event::poll(Duration::from_millis(100))? {
            let event = event::read()?;
            match event {
                CrosstermEvent::Key(key) => {
                    if let Some(action) = self.handle_key(key) {
                        return Ok(Some(action));
                    }
                }
                CrosstermEvent::Mouse(mouse) => {
                    if let Some(action) = Self::handle_mouse(mouse) {
                        return Ok(Some(action));
                    }
                }
                CrosstermEvent::Resize(_, _) => {
                    // Terminal will automatically redraw
                }
                _ => {}
            }
        }
        Ok(None)
    }

    /// Handle a key event and return an optional action.
    fn handle_key(&self, key: KeyEvent) -> Option<Action> {
        // Only process key press events
        if key.kind != KeyEventKind::Press {
            return None;
        }

        let input = super::InputEvent::from(key);

        if input.matches(&self.keybindings.quit) {
            return Some(Action::Quit);
        }
        if input.matches(&self.keybindings.help) {
            return Some(Action::ToggleHelp);
        }
        // Manual retry affordance: clears the error banner and re-runs the
        // prediction, bypassing the minimum spacing.
        if input.matches(&self.keybindings.refresh) {
            return Some(Action::RequestSync { manual: true });
        }

        // View switching
        if input.matches(&self.keybindings.dashboard) {
            return Some(Action::SetView(View::Dashboard));
        }
        if input.matches(&self.keybindings.feed) {
            return Some(Action::SetView(View::Feed));
        }
        if input.matches(&self.keybindings.history) {
            return Some(Action::SetView(View::History));
        }
        if input.matches(&self.keybindings.sources) {
            return Some(Action::SetView(View::Sources));
        }

        // Rally mode (media toggle)
        if input.matches(&self.keybindings.rally_mode) {
            return Some(Action::ToggleRallyMode);
        }

        // Feedback votes on the selected feed post
        if input.matches(&self.keybindings.vote_up) {
            return Some(Action::VoteUp);
        }
        if input.matches(&self.keybindings.vote_down) {
            return Some(Action::VoteDown);
        }

        // Navigation
        if input.matches(&self.keybindings.up) || key.code == KeyCode::Up {
            return Some(Action::ScrollUp);
        }
        if input.matches(&self.keybindings.down) || key.code == KeyCode::Down {
            return Some(Action::ScrollDown);
        }

        if key.code == KeyCode::Esc {
            return Some(Action::DismissNotification);
        }

        None
    }

    /// Handle a mouse event and return an optional action.
    fn handle_mouse(mouse: MouseEvent) -> Option<Action> {
        match mouse.kind {
            MouseEventKind::ScrollUp => Some(Action::ScrollUp),
            MouseEventKind::ScrollDown => Some(Action::ScrollDown),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    #[test]
    fn refresh_key_requests_a_manual_sync() {
        let handler = EventHandler::new(KeyBindings::default());
        let action = handler.handle_key(press('r'));
        assert!(matches!(action, Some(Action::RequestSync { manual: true })));
    }

    #[test]
    fn view_keys_switch_views() {
        let handler = EventHandler::new(KeyBindings::default());
        assert!(matches!(
            handler.handle_key(press('2')),
            Some(Action::SetView(View::Feed))
        ));
        assert!(matches!(
            handler.handle_key(press('3')),
            Some(Action::SetView(View::History))
        ));
    }

    #[test]
    fn rally_mode_key_toggles_media() {
        let handler = EventHandler::new(KeyBindings::default());
        assert!(matches!(
            handler.handle_key(press('m')),
            Some(Action::ToggleRallyMode)
        ));
    }

    #[test]
    fn vote_keys_emit_feedback_actions() {
        let handler = EventHandler::new(KeyBindings::default());
        assert!(matches!(handler.handle_key(press('+')), Some(Action::VoteUp)));
        assert!(matches!(handler.handle_key(press('-')), Some(Action::VoteDown)));
    }
}

//! Input event types and key binding matching.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Simplified key representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Up,
    Down,
    Other,
}

impl From<KeyCode> for Key {
    fn from(code: KeyCode) -> Self {
        match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Escape,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            _ => Key::Other,
        }
    }
}

/// A processed input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub key: Key,
    pub ctrl: bool,
}

impl From<KeyEvent> for InputEvent {
    fn from(event: KeyEvent) -> Self {
        Self {
            key: Key::from(event.code),
            ctrl: event.modifiers.contains(KeyModifiers::CONTROL),
        }
    }
}

impl InputEvent {
    /// Check if this matches a key binding string (e.g. "Ctrl+q", "m", "?").
    pub fn matches(&self, binding: &str) -> bool {
        let (expect_ctrl, key_part) = match binding.split_once('+') {
            Some((prefix, rest)) if prefix.eq_ignore_ascii_case("ctrl") => (true, rest),
            // '+' itself is a valid binding.
            _ => (false, binding),
        };

        if self.ctrl != expect_ctrl {
            return false;
        }

        match key_part.to_lowercase().as_str() {
            "enter" => self.key == Key::Enter,
            "esc" | "escape" => self.key == Key::Escape,
            "up" => self.key == Key::Up,
            "down" => self.key == Key::Down,
            s if s.chars().count() == 1 => {
                let c = s.chars().next().unwrap_or('\0');
                self.key == Key::Char(c) || self.key == Key::Char(c.to_ascii_uppercase())
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(code: KeyCode) -> InputEvent {
        InputEvent::from(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn plain_character_bindings_match() {
        assert!(event(KeyCode::Char('q')).matches("q"));
        assert!(event(KeyCode::Char('Q')).matches("q"));
        assert!(!event(KeyCode::Char('x')).matches("q"));
    }

    #[test]
    fn plus_and_minus_are_valid_bindings() {
        assert!(event(KeyCode::Char('+')).matches("+"));
        assert!(event(KeyCode::Char('-')).matches("-"));
    }

    #[test]
    fn ctrl_bindings_require_the_modifier() {
        let plain = event(KeyCode::Char('c'));
        let ctrl = InputEvent::from(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!plain.matches("Ctrl+c"));
        assert!(ctrl.matches("Ctrl+c"));
    }
}

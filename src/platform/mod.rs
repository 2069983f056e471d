//! Platform abstraction layer
//!
//! Input arrives as discrete key transitions plus a window-close signal.
//! Whatever polls the real keyboard maps its keys onto [`Key`]; keys outside
//! this set never reach the game, and screens ignore keys they don't use.

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Space,
    Q,
    E,
    Enter,
    M,
    S,
    P,
}

impl Key {
    /// Map a key name as reported by a windowing layer
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "left" => Some(Key::Left),
            "right" => Some(Key::Right),
            "up" => Some(Key::Up),
            "down" => Some(Key::Down),
            "space" | " " => Some(Key::Space),
            "q" => Some(Key::Q),
            "e" => Some(Key::E),
            "enter" | "return" => Some(Key::Enter),
            "m" => Some(Key::M),
            "s" => Some(Key::S),
            "p" => Some(Key::P),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Pressed,
    Released,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub action: KeyAction,
}

impl KeyEvent {
    pub fn pressed(key: Key) -> Self {
        Self {
            key,
            action: KeyAction::Pressed,
        }
    }

    pub fn released(key: Key) -> Self {
        Self {
            key,
            action: KeyAction::Released,
        }
    }
}

/// Everything the session manager can receive from the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    /// Window closed / application quit requested
    Quit,
}

impl InputEvent {
    /// Parse a `+key` / `-key` token (press / release) or `quit`.
    /// Unknown keys yield `None`.
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        if token.eq_ignore_ascii_case("quit") {
            return Some(InputEvent::Quit);
        }
        let (action, name) = match token.split_at_checked(1)? {
            ("+", rest) => (KeyAction::Pressed, rest),
            ("-", rest) => (KeyAction::Released, rest),
            _ => return None,
        };
        let key = Key::from_name(name)?;
        Some(InputEvent::Key(KeyEvent { key, action }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tokens() {
        assert_eq!(
            InputEvent::parse("+enter"),
            Some(InputEvent::Key(KeyEvent::pressed(Key::Enter)))
        );
        assert_eq!(
            InputEvent::parse("-Right"),
            Some(InputEvent::Key(KeyEvent::released(Key::Right)))
        );
        assert_eq!(InputEvent::parse("quit"), Some(InputEvent::Quit));
    }

    #[test]
    fn test_unmapped_keys_are_dropped() {
        assert_eq!(InputEvent::parse("+f12"), None);
        assert_eq!(InputEvent::parse("enter"), None);
        assert_eq!(InputEvent::parse(""), None);
    }
}

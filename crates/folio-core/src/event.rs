#![forbid(unsafe_code)]

//! Host-agnostic input events.
//!
//! The web crate translates DOM `KeyboardEvent`/`MouseEvent` values into these
//! types before handing them to effect state machines.

use crate::geometry::Point;

/// A keyboard key, reduced to what page effects care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character, lowercased for letters.
    Char(char),
    Up,
    Down,
    Left,
    Right,
    Enter,
    Escape,
    Tab,
    Backspace,
    /// Anything else.
    Other,
}

impl KeyCode {
    /// Map a DOM `KeyboardEvent.key` value.
    ///
    /// Letters are case-folded so `B` and `b` compare equal, as the legacy
    /// `keyCode` property did.
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "ArrowUp" | "Up" => Self::Up,
            "ArrowDown" | "Down" => Self::Down,
            "ArrowLeft" | "Left" => Self::Left,
            "ArrowRight" | "Right" => Self::Right,
            "Enter" => Self::Enter,
            "Escape" | "Esc" => Self::Escape,
            "Tab" => Self::Tab,
            "Backspace" => Self::Backspace,
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c.to_ascii_lowercase()),
                    _ => Self::Other,
                }
            }
        }
    }
}

/// What the pointer did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Enter,
    Move,
    Leave,
    Down,
    Click,
}

/// A pointer event in viewport (client) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub position: Point,
}

impl PointerEvent {
    #[inline]
    pub const fn new(kind: PointerKind, x: f64, y: f64) -> Self {
        Self {
            kind,
            position: Point::new(x, y),
        }
    }

    #[inline]
    pub const fn moved(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Move, x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dom_arrow_keys() {
        assert_eq!(KeyCode::from_dom_key("ArrowUp"), KeyCode::Up);
        assert_eq!(KeyCode::from_dom_key("Left"), KeyCode::Left);
    }

    #[test]
    fn dom_letters_are_case_folded() {
        assert_eq!(KeyCode::from_dom_key("B"), KeyCode::Char('b'));
        assert_eq!(KeyCode::from_dom_key("a"), KeyCode::Char('a'));
    }

    #[test]
    fn dom_named_keys_fall_back_to_other() {
        assert_eq!(KeyCode::from_dom_key("Shift"), KeyCode::Other);
        assert_eq!(KeyCode::from_dom_key(""), KeyCode::Other);
    }
}

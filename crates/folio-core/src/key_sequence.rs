#![forbid(unsafe_code)]

//! Fixed key-sequence detection (the Konami code easter egg).
//!
//! # Invariants
//! 1. The buffer never holds more keys than the pattern is long; the oldest
//!    key is dropped first.
//! 2. [`KeySequenceDetector::feed`] returns `true` exactly when the buffer
//!    equals the pattern, and the buffer is cleared on that match.
//! 3. An empty pattern never matches.

use std::collections::VecDeque;

use crate::event::KeyCode;

/// ↑ ↑ ↓ ↓ ← → ← → B A
pub const KONAMI: [KeyCode; 10] = [
    KeyCode::Up,
    KeyCode::Up,
    KeyCode::Down,
    KeyCode::Down,
    KeyCode::Left,
    KeyCode::Right,
    KeyCode::Left,
    KeyCode::Right,
    KeyCode::Char('b'),
    KeyCode::Char('a'),
];

/// Sliding-window matcher for one key sequence.
#[derive(Debug, Clone)]
pub struct KeySequenceDetector {
    pattern: Vec<KeyCode>,
    buffer: VecDeque<KeyCode>,
}

impl KeySequenceDetector {
    /// Detector for an arbitrary pattern.
    #[must_use]
    pub fn new(pattern: impl Into<Vec<KeyCode>>) -> Self {
        let pattern = pattern.into();
        Self {
            buffer: VecDeque::with_capacity(pattern.len()),
            pattern,
        }
    }

    /// Detector for ↑↑↓↓←→←→BA.
    #[must_use]
    pub fn konami() -> Self {
        Self::new(KONAMI.to_vec())
    }

    /// Push a key. Returns `true` when the sequence just completed.
    pub fn feed(&mut self, key: KeyCode) -> bool {
        if self.pattern.is_empty() {
            return false;
        }
        self.buffer.push_back(key);
        while self.buffer.len() > self.pattern.len() {
            self.buffer.pop_front();
        }
        if self.buffer.iter().eq(self.pattern.iter()) {
            self.buffer.clear();
            crate::debug!(len = self.pattern.len(), "key sequence matched");
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    /// Keys currently buffered.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    pub fn pattern(&self) -> &[KeyCode] {
        &self.pattern
    }
}

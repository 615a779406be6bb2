#![forbid(unsafe_code)]

//! Testimonial carousel: exactly one active entry, rotated on a timer or
//! picked by its dot.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::millis;
use crate::effect::{Effect, Lifecycle};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    #[serde(with = "millis")]
    pub interval: Duration,
    /// Restart the rotation timer when a dot is clicked.
    pub reset_timer_on_select: bool,
    pub active_class: String,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            reset_timer_on_select: false,
            active_class: "active".into(),
        }
    }
}

/// Active flags after a change, for cards and dots alike.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub index: usize,
    pub flags: Vec<bool>,
}

#[derive(Debug, Clone)]
pub struct Carousel {
    len: usize,
    index: usize,
    lifecycle: Lifecycle,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            index: 0,
            lifecycle: if len == 0 {
                Lifecycle::Disabled
            } else {
                Lifecycle::Running
            },
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_selected(&self, i: usize) -> bool {
        self.len > 0 && i == self.index
    }

    pub fn selection(&self) -> Selection {
        Selection {
            index: self.index,
            flags: (0..self.len).map(|i| i == self.index).collect(),
        }
    }

    /// Timer tick: move to the next entry, wrapping.
    pub fn advance(&mut self) -> Option<Selection> {
        if self.len == 0 {
            return None;
        }
        self.index = (self.index + 1) % self.len;
        Some(self.selection())
    }

    /// Dot click: select `i`, wrapping out-of-range indices.
    pub fn select(&mut self, i: usize) -> Option<Selection> {
        if self.len == 0 {
            return None;
        }
        self.index = i % self.len;
        Some(self.selection())
    }
}

impl Effect for Carousel {
    fn name(&self) -> &'static str {
        "carousel"
    }

    fn is_active(&self) -> bool {
        self.lifecycle.is_active()
    }

    fn stop(&mut self) {
        self.lifecycle.stop();
    }
}

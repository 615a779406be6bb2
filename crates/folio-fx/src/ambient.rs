#![forbid(unsafe_code)]

//! Ambient DOM particles.
//!
//! A background emitter that adds short-lived CSS-animated dots to a
//! container: an initial staggered burst, then one dot per interval. Each dot
//! is removed after a fixed time-to-live regardless of its own animation
//! length.
//!
//! The emitter is polled with the time since mount and reports what to add
//! and remove; it never touches the DOM itself.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use folio_core::animation::stagger::stagger_offsets;
use folio_core::rng::FxRng;

use crate::config::millis;
use crate::effect::{ContinuousFx, Effect, FrameContext, Lifecycle};
use crate::style::StyleDecl;

/// Largest initial `burst` a page configuration may ask for.
pub const MAX_BURST: usize = 1_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmbientConfig {
    pub burst: usize,
    #[serde(with = "millis")]
    pub burst_gap: Duration,
    #[serde(with = "millis")]
    pub interval: Duration,
    #[serde(with = "millis")]
    pub ttl: Duration,
    #[serde(with = "millis")]
    pub min_duration: Duration,
    #[serde(with = "millis")]
    pub max_duration: Duration,
    #[serde(with = "millis")]
    pub max_delay: Duration,
}

impl Default for AmbientConfig {
    fn default() -> Self {
        Self {
            burst: 10,
            burst_gap: Duration::from_millis(200),
            interval: Duration::from_secs(2),
            ttl: Duration::from_secs(20),
            min_duration: Duration::from_secs(10),
            max_duration: Duration::from_secs(20),
            max_delay: Duration::from_secs(5),
        }
    }
}

/// One emitted dot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientParticle {
    pub id: u64,
    /// Horizontal position in percent of the container, `[0, 100)`.
    pub left_pct: f64,
    pub duration: Duration,
    pub delay: Duration,
}

impl AmbientParticle {
    /// Inline styles for the dot element.
    pub fn styles(&self) -> [StyleDecl; 3] {
        [
            StyleDecl::percent("left", self.left_pct),
            StyleDecl::seconds("animation-duration", self.duration),
            StyleDecl::seconds("animation-delay", self.delay),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AmbientEvent {
    Spawn(AmbientParticle),
    Despawn(u64),
}

#[derive(Debug, Clone)]
pub struct AmbientEmitter {
    config: AmbientConfig,
    /// Remaining burst start times, soonest first.
    burst: Vec<Duration>,
    next_periodic: Duration,
    /// `(expires_at, id)` of live dots, in spawn order.
    live: Vec<(Duration, u64)>,
    next_id: u64,
    pending: Vec<AmbientEvent>,
    rng: FxRng,
    lifecycle: Lifecycle,
}

impl AmbientEmitter {
    /// `config.burst` is capped at [`MAX_BURST`].
    pub fn new(mut config: AmbientConfig, rng: FxRng) -> Self {
        config.burst = config.burst.min(MAX_BURST);
        let mut burst = stagger_offsets(config.burst, config.burst_gap);
        burst.reverse();
        Self {
            next_periodic: config.interval,
            config,
            burst,
            live: Vec::new(),
            next_id: 0,
            pending: Vec::new(),
            rng,
            lifecycle: Lifecycle::Running,
        }
    }

    fn spawn(&mut self, at: Duration) {
        let id = self.next_id;
        self.next_id += 1;
        let span = self
            .config
            .max_duration
            .saturating_sub(self.config.min_duration)
            .as_secs_f64();
        let max_delay = self.config.max_delay.as_secs_f64();
        let particle = AmbientParticle {
            id,
            left_pct: self.rng.next_f64() * 100.0,
            duration: self.config.min_duration
                + Duration::from_secs_f64(self.rng.next_f64() * span),
            delay: Duration::from_secs_f64(self.rng.next_f64() * max_delay),
        };
        self.live.push((at + self.config.ttl, id));
        self.pending.push(AmbientEvent::Spawn(particle));
    }

    /// Advance to `now` and queue every spawn and despawn that fell due.
    pub fn poll(&mut self, now: Duration) {
        if !self.is_active() {
            return;
        }
        while let Some(at) = self.burst.last().copied()
            && at <= now
        {
            self.burst.pop();
            self.spawn(at);
        }
        if !self.config.interval.is_zero() {
            while self.next_periodic <= now {
                let at = self.next_periodic;
                self.next_periodic += self.config.interval;
                self.spawn(at);
            }
        }
        let mut expired = Vec::new();
        self.live.retain(|(expires, id)| {
            if *expires <= now {
                expired.push(*id);
                false
            } else {
                true
            }
        });
        self.pending
            .extend(expired.into_iter().map(AmbientEvent::Despawn));
    }

    /// Take queued events in the order they fell due.
    pub fn drain(&mut self) -> Vec<AmbientEvent> {
        std::mem::take(&mut self.pending)
    }

    /// Dots currently alive.
    pub fn live(&self) -> usize {
        self.live.len()
    }
}

impl Effect for AmbientEmitter {
    fn name(&self) -> &'static str {
        "ambient"
    }

    fn is_active(&self) -> bool {
        self.lifecycle.is_active()
    }

    fn stop(&mut self) {
        self.lifecycle.stop();
        self.pending
            .extend(self.live.drain(..).map(|(_, id)| AmbientEvent::Despawn(id)));
    }
}

impl ContinuousFx for AmbientEmitter {
    fn step(&mut self, ctx: &FrameContext) {
        self.poll(ctx.now);
    }
}

#![forbid(unsafe_code)]

//! Text effects: looping typewriter, one-shot typewriter, scramble, glitch.
//!
//! All of these produce the string to show; scheduling the next update is
//! the host's job. Text is handled per `char`, never per byte.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use folio_core::rng::FxRng;

use crate::config::millis;

/// Glyphs used for scrambled and glitched positions.
pub const TEXT_ALPHABET: &[char] = &[
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '0', '1', '2', '3', '4', '5', '6', '7', '8', '9',
    '!', '@', '#', '$', '%', '^', '&', '*', '(', ')',
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    pub phrases: Vec<String>,
    #[serde(with = "millis")]
    pub type_delay: Duration,
    #[serde(with = "millis")]
    pub delete_delay: Duration,
    #[serde(with = "millis")]
    pub pause: Duration,
    #[serde(with = "millis")]
    pub typewriter_interval: Duration,
    #[serde(with = "millis")]
    pub scramble_duration: Duration,
    pub glitch: GlitchParams,
    pub hover_glitch: GlitchParams,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            phrases: vec![
                "Frontend Developer".into(),
                "Problem Solver".into(),
                "Tech Enthusiast".into(),
            ],
            type_delay: Duration::from_millis(100),
            delete_delay: Duration::from_millis(50),
            pause: Duration::from_millis(1000),
            typewriter_interval: Duration::from_millis(50),
            scramble_duration: Duration::from_millis(2000),
            glitch: GlitchParams::default(),
            hover_glitch: GlitchParams::hover(),
        }
    }
}

// ---------------------------------------------------------------------------
// Looping typewriter
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypingPhase {
    Typing,
    /// Holding the full phrase before deleting.
    Pausing,
    Deleting,
}

/// Types a phrase, holds it, deletes it, then moves to the next phrase.
#[derive(Debug, Clone)]
pub struct TypewriterLoop {
    phrases: Vec<Vec<char>>,
    phrase: usize,
    shown: usize,
    phase: TypingPhase,
    type_delay: Duration,
    delete_delay: Duration,
    pause: Duration,
}

impl TypewriterLoop {
    pub fn new(config: &TextConfig) -> Self {
        Self {
            phrases: config.phrases.iter().map(|p| p.chars().collect()).collect(),
            phrase: 0,
            shown: 0,
            phase: TypingPhase::Typing,
            type_delay: config.type_delay,
            delete_delay: config.delete_delay,
            pause: config.pause,
        }
    }

    pub fn phase(&self) -> TypingPhase {
        self.phase
    }

    pub fn phrase_index(&self) -> usize {
        self.phrase
    }

    /// Text currently shown.
    pub fn text(&self) -> String {
        self.phrases
            .get(self.phrase)
            .map(|p| p[..self.shown].iter().collect())
            .unwrap_or_default()
    }

    fn current_len(&self) -> usize {
        self.phrases.get(self.phrase).map_or(0, Vec::len)
    }

    fn next_phrase(&mut self) -> Duration {
        self.phrase = (self.phrase + 1) % self.phrases.len().max(1);
        self.shown = 0;
        self.phase = TypingPhase::Typing;
        self.type_delay
    }

    /// Perform one transition; returns the delay before the next call.
    pub fn advance(&mut self) -> Duration {
        let len = self.current_len();
        match self.phase {
            TypingPhase::Typing => {
                if len == 0 {
                    return self.next_phrase();
                }
                self.shown = (self.shown + 1).min(len);
                if self.shown == len {
                    self.phase = TypingPhase::Pausing;
                    self.pause
                } else {
                    self.type_delay
                }
            }
            TypingPhase::Pausing | TypingPhase::Deleting => {
                self.phase = TypingPhase::Deleting;
                self.shown = self.shown.saturating_sub(1);
                if self.shown == 0 {
                    self.next_phrase()
                } else {
                    self.delete_delay
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// One-shot typewriter
// ---------------------------------------------------------------------------

/// Reveals a string one character per interval.
#[derive(Debug, Clone)]
pub struct Typewriter {
    chars: Vec<char>,
    shown: usize,
    interval: Duration,
}

impl Typewriter {
    pub fn new(text: &str, interval: Duration) -> Self {
        Self {
            chars: text.chars().collect(),
            shown: 0,
            interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_complete(&self) -> bool {
        self.shown >= self.chars.len()
    }

    pub fn text(&self) -> String {
        self.chars[..self.shown].iter().collect()
    }

    /// Reveal one more character; `None` once the whole string is shown.
    pub fn tick(&mut self) -> Option<String> {
        if self.is_complete() {
            return None;
        }
        self.shown += 1;
        Some(self.text())
    }
}

// ---------------------------------------------------------------------------
// Scramble
// ---------------------------------------------------------------------------

/// Frame of a scramble at `progress` in `[0, 1]`: position `i` is final once
/// `progress * len > i`, random otherwise.
pub fn scramble_frame(target: &str, progress: f64, rng: &mut FxRng) -> String {
    let chars: Vec<char> = target.chars().collect();
    let settled = progress.clamp(0.0, 1.0) * chars.len() as f64;
    chars
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            if settled > i as f64 {
                c
            } else {
                random_glyph(rng)
            }
        })
        .collect()
}

fn random_glyph(rng: &mut FxRng) -> char {
    rng.pick(TEXT_ALPHABET).copied().unwrap_or('#')
}

/// Scrambles into a target string over a fixed duration.
#[derive(Debug, Clone)]
pub struct Scramble {
    target: String,
    duration: Duration,
}

impl Scramble {
    pub fn new(target: impl Into<String>, duration: Duration) -> Self {
        Self {
            target: target.into(),
            duration,
        }
    }

    pub fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn is_complete(&self, elapsed: Duration) -> bool {
        self.progress(elapsed) >= 1.0
    }

    pub fn frame(&self, elapsed: Duration, rng: &mut FxRng) -> String {
        scramble_frame(&self.target, self.progress(elapsed), rng)
    }
}

// ---------------------------------------------------------------------------
// Glitch
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlitchParams {
    /// Number of corrupt/restore repetitions.
    pub intensity: u32,
    /// How long each corruption stays visible.
    #[serde(with = "millis")]
    pub duration: Duration,
    #[serde(with = "millis")]
    pub gap: Duration,
    /// Per-character corruption chance.
    pub probability: f64,
}

impl Default for GlitchParams {
    fn default() -> Self {
        Self {
            intensity: 5,
            duration: Duration::from_millis(100),
            gap: Duration::from_millis(50),
            probability: 0.1,
        }
    }
}

impl GlitchParams {
    /// Repetitions beyond this are dropped.
    pub const MAX_INTENSITY: u32 = 100;

    /// Softer variant used on hover.
    pub fn hover() -> Self {
        Self {
            intensity: 3,
            duration: Duration::from_millis(150),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlitchOp {
    Corrupt,
    Restore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlitchStep {
    pub at: Duration,
    pub op: GlitchOp,
}

/// Replace each character with a random glyph with probability `p`.
pub fn glitch_frame(text: &str, p: f64, rng: &mut FxRng) -> String {
    text.chars()
        .map(|c| if rng.chance(p) { random_glyph(rng) } else { c })
        .collect()
}

/// A glitch burst over a fixed snapshot of the element's text.
///
/// The snapshot is taken once; re-triggering while a burst is running reuses
/// it, so a corrupted frame is never captured as the original.
#[derive(Debug, Clone)]
pub struct Glitch {
    snapshot: String,
    params: GlitchParams,
}

impl Glitch {
    /// `params.intensity` is capped at [`GlitchParams::MAX_INTENSITY`].
    pub fn new(snapshot: impl Into<String>, mut params: GlitchParams) -> Self {
        params.intensity = params.intensity.min(GlitchParams::MAX_INTENSITY);
        Self {
            snapshot: snapshot.into(),
            params,
        }
    }

    pub fn snapshot(&self) -> &str {
        &self.snapshot
    }

    pub fn params(&self) -> GlitchParams {
        self.params
    }

    /// Repetition `i` corrupts at `i * (duration + gap)` and restores
    /// `duration` later.
    pub fn timeline(&self) -> Vec<GlitchStep> {
        let period = self.params.duration.saturating_add(self.params.gap);
        let mut steps = Vec::with_capacity(self.params.intensity as usize * 2);
        for i in 0..self.params.intensity {
            let start = period.saturating_mul(i);
            steps.push(GlitchStep {
                at: start,
                op: GlitchOp::Corrupt,
            });
            steps.push(GlitchStep {
                at: start.saturating_add(self.params.duration),
                op: GlitchOp::Restore,
            });
        }
        steps.sort_by_key(|s| s.at);
        steps
    }

    /// Total time until the final restore.
    pub fn total(&self) -> Duration {
        self.timeline().last().map_or(Duration::ZERO, |s| s.at)
    }

    pub fn render(&self, op: GlitchOp, rng: &mut FxRng) -> String {
        match op {
            GlitchOp::Corrupt => glitch_frame(&self.snapshot, self.params.probability, rng),
            GlitchOp::Restore => self.snapshot.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn single(phrase: &str) -> TextConfig {
        TextConfig {
            phrases: vec![phrase.into(), "Yo".into()],
            ..TextConfig::default()
        }
    }

    #[test]
    fn typewriter_loop_cycle() {
        let mut tw = TypewriterLoop::new(&single("Hey"));
        assert_eq!(tw.advance(), Duration::from_millis(100));
        assert_eq!(tw.text(), "H");
        assert_eq!(tw.advance(), Duration::from_millis(100));
        assert_eq!(tw.advance(), Duration::from_millis(1000));
        assert_eq!(tw.text(), "Hey");
        assert_eq!(tw.phase(), TypingPhase::Pausing);
        assert_eq!(tw.advance(), Duration::from_millis(50));
        assert_eq!(tw.text(), "He");
        assert_eq!(tw.phase(), TypingPhase::Deleting);
        assert_eq!(tw.advance(), Duration::from_millis(50));
        assert_eq!(tw.text(), "H");
        // Emptying the phrase moves on and resumes typing.
        assert_eq!(tw.advance(), Duration::from_millis(100));
        assert_eq!(tw.phrase_index(), 1);
        assert_eq!(tw.text(), "");
        assert_eq!(tw.phase(), TypingPhase::Typing);
    }

    #[test]
    fn typewriter_loop_wraps_phrases() {
        let mut tw = TypewriterLoop::new(&single("A"));
        for _ in 0..2 {
            tw.advance();
        }
        assert_eq!(tw.phrase_index(), 1);
        for _ in 0..4 {
            tw.advance();
        }
        assert_eq!(tw.phrase_index(), 0);
    }

    #[test]
    fn typewriter_loop_default_phrases() {
        let mut tw = TypewriterLoop::new(&TextConfig::default());
        for _ in 0.."Frontend Developer".len() {
            tw.advance();
        }
        assert_eq!(tw.text(), "Frontend Developer");
    }

    #[test]
    fn typewriter_loop_counts_chars_not_bytes() {
        let mut tw = TypewriterLoop::new(&single("héllo"));
        tw.advance();
        tw.advance();
        assert_eq!(tw.text(), "hé");
    }

    #[test]
    fn one_shot_typewriter() {
        let mut tw = Typewriter::new("abc", Duration::from_millis(50));
        assert_eq!(tw.tick().as_deref(), Some("a"));
        assert_eq!(tw.tick().as_deref(), Some("ab"));
        assert_eq!(tw.tick().as_deref(), Some("abc"));
        assert!(tw.is_complete());
        assert!(tw.tick().is_none());
        assert!(Typewriter::new("", Duration::from_millis(50)).is_complete());
    }

    #[test]
    fn scramble_settles_left_to_right() {
        let mut rng = FxRng::from_seed(3);
        let frame = scramble_frame("ABCDEFGHIJ", 0.35, &mut rng);
        assert_eq!(frame.chars().count(), 10);
        assert!(frame.starts_with("ABCD"));
        assert!(frame.chars().all(|c| TEXT_ALPHABET.contains(&c)));
        assert_eq!(scramble_frame("Hello, world", 1.0, &mut rng), "Hello, world");
    }

    #[test]
    fn scramble_progress() {
        let s = Scramble::new("Done", Duration::from_millis(2000));
        assert_eq!(s.progress(Duration::from_millis(500)), 0.25);
        assert!(!s.is_complete(Duration::from_millis(1999)));
        assert!(s.is_complete(Duration::from_millis(2500)));
        let mut rng = FxRng::from_seed(9);
        assert_eq!(s.frame(Duration::from_millis(2000), &mut rng), "Done");
    }

    #[test]
    fn glitch_timeline() {
        let g = Glitch::new("Portfolio", GlitchParams::default());
        let at: Vec<(u128, GlitchOp)> = g
            .timeline()
            .iter()
            .map(|s| (s.at.as_millis(), s.op))
            .collect();
        assert_eq!(at.len(), 10);
        assert_eq!(at[0], (0, GlitchOp::Corrupt));
        assert_eq!(at[1], (100, GlitchOp::Restore));
        assert_eq!(at[2], (150, GlitchOp::Corrupt));
        assert_eq!(g.total(), Duration::from_millis(700));

        let hover = Glitch::new("x", GlitchParams::hover());
        assert_eq!(hover.timeline().len(), 6);
        assert_eq!(hover.timeline()[2].at, Duration::from_millis(200));
    }

    #[test]
    fn glitch_intensity_and_timing_saturate() {
        let params = GlitchParams {
            intensity: u32::MAX,
            duration: Duration::MAX,
            ..GlitchParams::default()
        };
        let g = Glitch::new("x", params);
        assert_eq!(g.params().intensity, GlitchParams::MAX_INTENSITY);
        assert_eq!(g.timeline().len(), 2 * GlitchParams::MAX_INTENSITY as usize);
        assert_eq!(g.total(), Duration::MAX);
    }

    #[test]
    fn glitch_restores_snapshot() {
        let g = Glitch::new("Portfolio", GlitchParams::default());
        let mut rng = FxRng::from_seed(1);
        let corrupt = g.render(GlitchOp::Corrupt, &mut rng);
        assert_eq!(corrupt.chars().count(), 9);
        assert_eq!(g.render(GlitchOp::Restore, &mut rng), "Portfolio");
    }

    #[test]
    fn glitch_probability_extremes() {
        let mut rng = FxRng::from_seed(4);
        assert_eq!(glitch_frame("steady", 0.0, &mut rng), "steady");
        let all = glitch_frame("abcdef", 1.0, &mut rng);
        assert!(all.chars().all(|c| TEXT_ALPHABET.contains(&c)));
    }
}

#![forbid(unsafe_code)]

//! Page-level configuration.
//!
//! Every section falls back to its defaults, so an empty object (or no
//! configuration at all) mounts the stock page. Durations are written in
//! milliseconds.
//!
//! ```json
//! { "particles": { "count": 80 }, "carousel": { "interval": 8000 } }
//! ```

use serde::{Deserialize, Serialize};

use crate::ambient::{AmbientConfig, MAX_BURST};
use crate::carousel::CarouselConfig;
use crate::error::{FxError, FxResult};
use crate::matrix_rain::MatrixConfig;
use crate::particles::{MAX_PARTICLES, ParticleConfig};
use crate::pointer::PointerConfig;
use crate::reveal::RevealConfig;
use crate::scroll::ScrollConfig;
use crate::text::{GlitchParams, TextConfig};
use crate::theme::ThemeConfig;
use crate::trail::{MAX_TRAIL_POINTS, TrailConfig};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    pub particles: ParticleConfig,
    pub matrix: MatrixConfig,
    pub trail: TrailConfig,
    pub ambient: AmbientConfig,
    pub pointer: PointerConfig,
    pub reveal: RevealConfig,
    pub text: TextConfig,
    pub carousel: CarouselConfig,
    pub scroll: ScrollConfig,
    pub theme: ThemeConfig,
    /// Fixed RNG seed; `None` seeds from the host's randomness.
    pub seed: Option<u32>,
}

impl FolioConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> FxResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would stall a timer, make a ratio meaningless or
    /// size a buffer past what a page can hold.
    pub fn validate(&self) -> FxResult<()> {
        check_at_most("particles.count", self.particles.count, MAX_PARTICLES)?;
        check_at_most("trail.max_points", self.trail.max_points, MAX_TRAIL_POINTS)?;
        check_at_most("ambient.burst", self.ambient.burst, MAX_BURST)?;
        let max = GlitchParams::MAX_INTENSITY as usize;
        let glitch = self.text.glitch.intensity as usize;
        check_at_most("text.glitch.intensity", glitch, max)?;
        let hover = self.text.hover_glitch.intensity as usize;
        check_at_most("text.hover_glitch.intensity", hover, max)?;
        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            return Err(FxError::Config(format!(
                "reveal.threshold must be within [0, 1], got {}",
                self.reveal.threshold
            )));
        }
        if self.reveal.counter_tick.is_zero() {
            return Err(FxError::Config("reveal.counter_tick must be non-zero".into()));
        }
        if self.carousel.interval.is_zero() {
            return Err(FxError::Config("carousel.interval must be non-zero".into()));
        }
        if self.particles.connection_distance.is_nan() || self.particles.connection_distance < 0.0 {
            return Err(FxError::Config(
                "particles.connection_distance must be non-negative".into(),
            ));
        }
        if self.matrix.font_px.is_nan() || self.matrix.font_px <= 0.0 {
            return Err(FxError::Config("matrix.font_px must be positive".into()));
        }
        if self.text.phrases.is_empty() {
            return Err(FxError::Config("text.phrases must not be empty".into()));
        }
        if self.theme.storage_key.is_empty() {
            return Err(FxError::Config("theme.storage_key must not be empty".into()));
        }
        Ok(())
    }
}

fn check_at_most(field: &str, value: usize, max: usize) -> FxResult<()> {
    if value > max {
        return Err(FxError::Config(format!("{field} must be at most {max}, got {value}")));
    }
    Ok(())
}

/// `Duration` as whole milliseconds.
pub(crate) mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

/// `Option<Duration>` as milliseconds or `null`.
pub(crate) mod millis_opt {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
        match d {
            Some(d) => s.serialize_some(&u64::try_from(d.as_millis()).unwrap_or(u64::MAX)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        Option::<u64>::deserialize(d).map(|ms| ms.map(Duration::from_millis))
    }
}

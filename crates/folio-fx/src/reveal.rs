#![forbid(unsafe_code)]

//! Scroll-triggered reveals.
//!
//! An element registered with a [`RevealObserver`] fires once, the first time
//! it intersects the viewport. Firing yields a [`RevealPlan`]: a short
//! timeline of style changes and payload actions (skill bars, progress rings,
//! counters, lazy images) that the host schedules with ordinary timeouts.
//!
//! # Invariants
//!
//! - A registered element produces at most one plan, no matter how many
//!   intersection entries it receives.
//! - A [`Counter`] display is non-decreasing, never exceeds its target, and
//!   its last value is exactly the target.

use std::collections::HashMap;
use std::f64::consts::PI;
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use folio_core::geometry::{Bounds, Margin, Size};

use crate::config::millis;
use crate::error::{FxError, FxResult};
use crate::style::{ClassToggle, StyleDecl, Transform, TransformFn, Transition};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Fraction of the element that must be visible.
    pub threshold: f64,
    pub root_margin: Margin,
    /// Gap between the hidden style and the visible style.
    #[serde(with = "millis")]
    pub reveal_delay: Duration,
    #[serde(with = "millis")]
    pub bar_delay: Duration,
    #[serde(with = "millis")]
    pub ring_delay: Duration,
    pub ring_radius: f64,
    #[serde(with = "millis")]
    pub counter_duration: Duration,
    #[serde(with = "millis")]
    pub counter_tick: Duration,
    /// Class reveal fires once an element's top is this far above the
    /// viewport bottom.
    pub class_offset: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: Margin::new(0.0, 0.0, -50.0, 0.0),
            reveal_delay: Duration::from_millis(100),
            bar_delay: Duration::from_millis(200),
            ring_delay: Duration::from_millis(500),
            ring_radius: 35.0,
            counter_duration: Duration::from_millis(600),
            counter_tick: Duration::from_millis(16),
            class_offset: 150.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Kinds
// ---------------------------------------------------------------------------

/// The `data-animate` vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RevealKind {
    FadeInUp,
    SlideInLeft,
    ScaleIn,
    RotateIn,
}

impl RevealKind {
    pub const ALL: [RevealKind; 4] = [
        RevealKind::FadeInUp,
        RevealKind::SlideInLeft,
        RevealKind::ScaleIn,
        RevealKind::RotateIn,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            RevealKind::FadeInUp => "fadeInUp",
            RevealKind::SlideInLeft => "slideInLeft",
            RevealKind::ScaleIn => "scaleIn",
            RevealKind::RotateIn => "rotateIn",
        }
    }

    pub fn initial_transform(self) -> Transform {
        match self {
            RevealKind::FadeInUp => Transform::of(TransformFn::TranslateY(50.0)),
            RevealKind::SlideInLeft => Transform::of(TransformFn::TranslateX(-100.0)),
            RevealKind::ScaleIn => Transform::of(TransformFn::Scale(0.8)),
            RevealKind::RotateIn => {
                Transform::of(TransformFn::Rotate(-180.0)).then(TransformFn::Scale(0.5))
            }
        }
    }

    pub fn final_transform(self) -> Transform {
        match self {
            RevealKind::FadeInUp => Transform::of(TransformFn::TranslateY(0.0)),
            RevealKind::SlideInLeft => Transform::of(TransformFn::TranslateX(0.0)),
            RevealKind::ScaleIn => Transform::of(TransformFn::Scale(1.0)),
            RevealKind::RotateIn => {
                Transform::of(TransformFn::Rotate(0.0)).then(TransformFn::Scale(1.0))
            }
        }
    }

    pub const fn duration(self) -> Duration {
        match self {
            RevealKind::FadeInUp => Duration::from_millis(600),
            RevealKind::SlideInLeft | RevealKind::RotateIn => Duration::from_millis(800),
            RevealKind::ScaleIn => Duration::from_millis(500),
        }
    }

    /// Hidden pose plus the transition that animates out of it.
    pub fn initial_styles(self) -> Vec<StyleDecl> {
        let d = self.duration();
        vec![
            StyleDecl::opacity(0.0),
            StyleDecl::transform(&self.initial_transform()),
            StyleDecl::transition(&[
                Transition::new("opacity", d).timing("ease"),
                Transition::new("transform", d).timing("ease"),
            ]),
        ]
    }

    pub fn final_styles(self) -> Vec<StyleDecl> {
        vec![
            StyleDecl::opacity(1.0),
            StyleDecl::transform(&self.final_transform()),
        ]
    }
}

impl FromStr for RevealKind {
    type Err = FxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RevealKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s.trim())
            .ok_or_else(|| FxError::UnknownRevealKind(s.to_owned()))
    }
}

impl fmt::Display for RevealKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// Extra work attached to a reveal, parsed from `data-*` attributes.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Skill bar width from `data-width`.
    ProgressBar { width: String },
    /// Ring completion in percent from `data-progress`.
    ProgressRing { progress: f64 },
    /// Count up to `data-target`; `percent` when the element's text has `%`.
    Counter { target: u32, percent: bool },
    /// `data-src` to copy into `src`.
    LazyImage { src: String },
}

impl Payload {
    pub fn progress_bar(data_width: &str) -> FxResult<Self> {
        let width = data_width.trim();
        if width.is_empty() {
            return Err(FxError::invalid_attribute("data-width", data_width));
        }
        Ok(Self::ProgressBar {
            width: width.to_owned(),
        })
    }

    pub fn progress_ring(data_progress: &str) -> FxResult<Self> {
        match data_progress.trim().parse::<f64>() {
            Ok(progress) if progress.is_finite() => Ok(Self::ProgressRing { progress }),
            _ => Err(FxError::invalid_attribute("data-progress", data_progress)),
        }
    }

    pub fn counter(data_target: &str, original_text: &str) -> FxResult<Self> {
        let target = parse_leading_int(data_target)
            .ok_or_else(|| FxError::invalid_attribute("data-target", data_target))?;
        Ok(Self::Counter {
            target,
            percent: original_text.contains('%'),
        })
    }

    pub fn lazy_image(data_src: &str) -> FxResult<Self> {
        if data_src.trim().is_empty() {
            return Err(FxError::invalid_attribute("data-src", data_src));
        }
        Ok(Self::LazyImage {
            src: data_src.trim().to_owned(),
        })
    }
}

/// Leading decimal digits, so `"150+"` reads as 150.
fn parse_leading_int(s: &str) -> Option<u32> {
    let s = s.trim();
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s[..end].parse().ok()
}

/// `stroke-dashoffset` for a ring of `radius` at `progress` percent.
pub fn ring_offset(progress: f64, radius: f64) -> f64 {
    let circumference = 2.0 * PI * radius;
    circumference - (progress / 100.0) * circumference
}

// ---------------------------------------------------------------------------
// Counter
// ---------------------------------------------------------------------------

/// Counts from 0 to a target in equal ticks.
///
/// Values are computed from the tick index rather than accumulated, so the
/// last tick lands on the target exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Counter {
    target: u32,
    suffix: char,
    steps: u32,
    step: u32,
}

impl Counter {
    pub fn new(target: u32, percent: bool, duration: Duration, tick: Duration) -> Self {
        let tick_ms = tick.as_millis().max(1);
        let steps = duration.as_millis().div_ceil(tick_ms).max(1);
        Self {
            target,
            suffix: if percent { '%' } else { '+' },
            steps: u32::try_from(steps).unwrap_or(u32::MAX),
            step: 0,
        }
    }

    pub fn from_config(target: u32, percent: bool, config: &RevealConfig) -> Self {
        Self::new(target, percent, config.counter_duration, config.counter_tick)
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn is_complete(&self) -> bool {
        self.step >= self.steps
    }

    pub fn value(&self) -> u32 {
        let v = u64::from(self.target) * u64::from(self.step) / u64::from(self.steps);
        u32::try_from(v).unwrap_or(self.target)
    }

    /// Current text, e.g. `"90+"`.
    pub fn display(&self) -> String {
        format!("{}{}", self.value(), self.suffix)
    }

    /// Advance one tick and return the new text; `None` once complete.
    pub fn tick(&mut self) -> Option<String> {
        if self.is_complete() {
            return None;
        }
        self.step += 1;
        Some(self.display())
    }
}

// ---------------------------------------------------------------------------
// Plans
// ---------------------------------------------------------------------------

/// What to register for one element.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RevealSpec {
    /// Entrance animation; `None` for payload-only elements such as lazy
    /// images.
    pub kind: Option<RevealKind>,
    pub payloads: Vec<Payload>,
    /// Apply the hidden style at registration instead of at intersection.
    pub prime_on_observe: bool,
}

impl RevealSpec {
    pub fn animate(kind: RevealKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    /// Parse a `data-animate` value.
    pub fn from_attribute(data_animate: &str) -> FxResult<Self> {
        Ok(Self::animate(data_animate.parse()?))
    }

    /// A card that starts hidden and slides up on reveal.
    pub fn card() -> Self {
        Self {
            kind: Some(RevealKind::FadeInUp),
            payloads: Vec::new(),
            prime_on_observe: true,
        }
    }

    #[must_use]
    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payloads.push(payload);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RevealAction {
    /// Inline styles on the revealed element.
    Styles(Vec<StyleDecl>),
    /// Width for the element's progress bar child.
    BarWidth(StyleDecl),
    /// `stroke-dashoffset` for the element's progress ring child.
    RingOffset(f64),
    /// Run a counter on the element's text.
    StartCounter(Counter),
    /// Copy into `src` and drop the `lazy` class.
    LoadImage { src: String, class: ClassToggle },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RevealStep {
    pub delay: Duration,
    pub action: RevealAction,
}

/// Timeline of a fired reveal, ordered by delay.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RevealPlan {
    pub steps: Vec<RevealStep>,
}

impl RevealPlan {
    fn push(&mut self, delay: Duration, action: RevealAction) {
        self.steps.push(RevealStep { delay, action });
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }
}

/// One intersection observer entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub is_intersecting: bool,
}

impl Intersection {
    pub const VISIBLE: Self = Self {
        is_intersecting: true,
    };
    pub const HIDDEN: Self = Self {
        is_intersecting: false,
    };
}

/// Tracks registered elements and fires each at most once.
#[derive(Debug, Clone)]
pub struct RevealObserver<K> {
    config: RevealConfig,
    pending: HashMap<K, RevealSpec>,
    fired: usize,
}

impl<K: Eq + Hash> RevealObserver<K> {
    pub fn new(config: RevealConfig) -> Self {
        Self {
            config,
            pending: HashMap::new(),
            fired: 0,
        }
    }

    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    /// Register an element. Returns the styles to apply right away (the
    /// hidden pose for primed specs, otherwise nothing).
    pub fn observe(&mut self, id: K, spec: RevealSpec) -> Vec<StyleDecl> {
        let primed = match (spec.prime_on_observe, spec.kind) {
            (true, Some(kind)) => kind.initial_styles(),
            _ => Vec::new(),
        };
        self.pending.insert(id, spec);
        primed
    }

    pub fn is_observing(&self, id: &K) -> bool {
        self.pending.contains_key(id)
    }

    pub fn observed(&self) -> usize {
        self.pending.len()
    }

    pub fn fired(&self) -> usize {
        self.fired
    }

    /// Handle an entry. The first intersecting entry unobserves the element
    /// and returns its plan.
    pub fn on_intersection(&mut self, id: &K, entry: Intersection) -> Option<RevealPlan> {
        if !entry.is_intersecting {
            return None;
        }
        let spec = self.pending.remove(id)?;
        self.fired += 1;
        tracing::trace!(
            unit = "reveal",
            kind = spec.kind.map(RevealKind::as_str),
            payloads = spec.payloads.len(),
            "reveal fired"
        );
        Some(plan_for(&spec, &self.config))
    }
}

fn plan_for(spec: &RevealSpec, config: &RevealConfig) -> RevealPlan {
    let mut plan = RevealPlan::default();
    if let Some(kind) = spec.kind {
        if spec.prime_on_observe {
            plan.push(Duration::ZERO, RevealAction::Styles(kind.final_styles()));
        } else {
            plan.push(Duration::ZERO, RevealAction::Styles(kind.initial_styles()));
            plan.push(config.reveal_delay, RevealAction::Styles(kind.final_styles()));
        }
    }
    for payload in &spec.payloads {
        match payload {
            Payload::ProgressBar { width } => plan.push(
                config.bar_delay,
                RevealAction::BarWidth(StyleDecl::width(width.clone())),
            ),
            Payload::ProgressRing { progress } => plan.push(
                config.ring_delay,
                RevealAction::RingOffset(ring_offset(*progress, config.ring_radius)),
            ),
            Payload::Counter { target, percent } => plan.push(
                Duration::ZERO,
                RevealAction::StartCounter(Counter::from_config(*target, *percent, config)),
            ),
            Payload::LazyImage { src } => plan.push(
                Duration::ZERO,
                RevealAction::LoadImage {
                    src: src.clone(),
                    class: ClassToggle::new("lazy", false),
                },
            ),
        }
    }
    plan.steps.sort_by_key(|s| s.delay);
    plan
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// Whether `rect` counts as intersecting a `viewport`-sized root under
/// `config`'s threshold and root margin.
pub fn intersects(rect: Bounds, viewport: Size, config: &RevealConfig) -> bool {
    let root = Bounds::from_size(viewport).expand(config.root_margin);
    let area = rect.area();
    if area <= 0.0 {
        let corner = folio_core::geometry::Point::new(rect.left(), rect.top());
        return root.contains(corner);
    }
    match rect.intersection(&root) {
        Some(overlap) => overlap.area() / area >= config.threshold.max(f64::MIN_POSITIVE),
        None => false,
    }
}

/// Whether a `data-animate` element whose top sits at `element_top` should
/// receive the `animate` class.
pub fn class_reveal(element_top: f64, viewport_height: f64, config: &RevealConfig) -> bool {
    element_top < viewport_height - config.class_offset
}

pub const ANIMATE_CLASS: ClassToggle = ClassToggle::new("animate", true);

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn observer() -> RevealObserver<u32> {
        RevealObserver::new(RevealConfig::default())
    }

    fn styles(action: &RevealAction) -> Vec<(&'static str, String)> {
        match action {
            RevealAction::Styles(s) => s.iter().map(|d| (d.property, d.value.clone())).collect(),
            other => panic!("expected styles, got {other:?}"),
        }
    }

    #[test]
    fn kinds_parse_from_attribute() {
        for kind in RevealKind::ALL {
            assert_eq!(kind.as_str().parse::<RevealKind>().expect("parse"), kind);
        }
        match "zoomIn".parse::<RevealKind>() {
            Err(FxError::UnknownRevealKind(name)) => assert_eq!(name, "zoomIn"),
            other => panic!("expected unknown kind, got {other:?}"),
        }
        assert!(RevealSpec::from_attribute("bounce").is_err());
    }

    #[test]
    fn fade_in_up_plan() {
        let mut obs = observer();
        assert!(obs.observe(1, RevealSpec::animate(RevealKind::FadeInUp)).is_empty());
        let plan = obs.on_intersection(&1, Intersection::VISIBLE).expect("fires");
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.steps[0].delay, Duration::ZERO);
        assert_eq!(
            styles(&plan.steps[0].action),
            vec![
                ("opacity", "0".to_string()),
                ("transform", "translateY(50px)".to_string()),
                ("transition", "opacity 0.6s ease, transform 0.6s ease".to_string()),
            ]
        );
        assert_eq!(plan.steps[1].delay, Duration::from_millis(100));
        assert_eq!(
            styles(&plan.steps[1].action),
            vec![
                ("opacity", "1".to_string()),
                ("transform", "translateY(0px)".to_string()),
            ]
        );
    }

    #[test]
    fn rotate_in_transforms() {
        assert_eq!(
            RevealKind::RotateIn.initial_transform().to_css(),
            "rotate(-180deg) scale(0.5)"
        );
        assert_eq!(
            RevealKind::RotateIn.final_transform().to_css(),
            "rotate(0deg) scale(1)"
        );
        assert_eq!(RevealKind::SlideInLeft.duration(), Duration::from_millis(800));
        assert_eq!(RevealKind::ScaleIn.initial_transform().to_css(), "scale(0.8)");
    }

    #[test]
    fn fires_once_per_element() {
        let mut obs = observer();
        obs.observe(7, RevealSpec::animate(RevealKind::ScaleIn));
        assert!(obs.on_intersection(&7, Intersection::HIDDEN).is_none());
        assert!(obs.is_observing(&7));
        assert!(obs.on_intersection(&7, Intersection::VISIBLE).is_some());
        assert!(obs.on_intersection(&7, Intersection::VISIBLE).is_none());
        assert!(!obs.is_observing(&7));
        assert_eq!(obs.fired(), 1);
    }

    #[test]
    fn unknown_element_is_ignored() {
        let mut obs = observer();
        assert!(obs.on_intersection(&3, Intersection::VISIBLE).is_none());
    }

    #[test]
    fn primed_card_hides_at_registration() {
        let mut obs = observer();
        let primed = obs.observe(1, RevealSpec::card());
        assert_eq!(primed[0].value, "0");
        let plan = obs.on_intersection(&1, Intersection::VISIBLE).expect("fires");
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.steps[0].delay, Duration::ZERO);
    }

    #[test]
    fn payload_timeline() {
        let mut obs = observer();
        let spec = RevealSpec::card()
            .with_payload(Payload::progress_ring("75").expect("ring"))
            .with_payload(Payload::progress_bar("90%").expect("bar"))
            .with_payload(Payload::counter("150", "0+").expect("counter"));
        obs.observe(1, spec);
        let plan = obs.on_intersection(&1, Intersection::VISIBLE).expect("fires");
        let delays: Vec<u64> = plan.steps.iter().map(|s| s.delay.as_millis() as u64).collect();
        assert_eq!(delays, vec![0, 0, 200, 500]);
        assert_eq!(
            plan.steps[2].action,
            RevealAction::BarWidth(StyleDecl::width("90%"))
        );
        match plan.steps[3].action {
            RevealAction::RingOffset(offset) => {
                assert!((offset - 2.0 * PI * 35.0 * 0.25).abs() < 1e-9);
            }
            ref other => panic!("expected ring, got {other:?}"),
        }
    }

    #[test]
    fn lazy_image_plan() {
        let mut obs = observer();
        obs.observe(
            1,
            RevealSpec::default().with_payload(Payload::lazy_image("/img/a.png").expect("src")),
        );
        let plan = obs.on_intersection(&1, Intersection::VISIBLE).expect("fires");
        assert_eq!(
            plan.steps[0].action,
            RevealAction::LoadImage {
                src: "/img/a.png".into(),
                class: ClassToggle::new("lazy", false),
            }
        );
    }

    #[test]
    fn attribute_errors() {
        assert!(matches!(
            Payload::progress_ring("lots"),
            Err(FxError::InvalidAttribute { .. })
        ));
        assert!(Payload::progress_bar("  ").is_err());
        assert!(Payload::counter("", "").is_err());
        assert!(Payload::lazy_image("").is_err());
        assert_eq!(
            Payload::counter("98%", "0%").expect("counter"),
            Payload::Counter {
                target: 98,
                percent: true
            }
        );
    }

    #[test]
    fn ring_offset_for_three_quarters() {
        let expected = 2.0 * PI * 35.0 * (1.0 - 0.75);
        assert!((ring_offset(75.0, 35.0) - expected).abs() < 1e-9);
        assert!(ring_offset(100.0, 35.0).abs() < 1e-9);
    }

    #[test]
    fn counter_reaches_target_exactly() {
        let mut c = Counter::from_config(150, false, &RevealConfig::default());
        assert_eq!(c.steps(), 38);
        let mut last = 0;
        let mut shown = Vec::new();
        while let Some(text) = c.tick() {
            let v = c.value();
            assert!(v >= last && v <= 150);
            last = v;
            shown.push(text);
        }
        assert_eq!(shown.len(), 38);
        assert_eq!(shown.last().map(String::as_str), Some("150+"));
        assert_eq!(shown[0], "3+");
        assert!(c.tick().is_none());
    }

    #[test]
    fn percent_counter_suffix() {
        let mut c = Counter::new(90, true, Duration::from_millis(32), Duration::from_millis(16));
        assert_eq!(c.tick().as_deref(), Some("45%"));
        assert_eq!(c.tick().as_deref(), Some("90%"));
    }

    #[test]
    fn intersection_threshold_and_margin() {
        let config = RevealConfig::default();
        let viewport = Size::new(1000.0, 800.0);
        // Root is 0..750 vertically; 10% of a 100px tall element is 10px.
        assert!(intersects(Bounds::new(0.0, 740.0, 100.0, 100.0), viewport, &config));
        assert!(!intersects(Bounds::new(0.0, 745.0, 100.0, 100.0), viewport, &config));
        assert!(!intersects(Bounds::new(0.0, 900.0, 100.0, 100.0), viewport, &config));
        assert!(intersects(Bounds::new(0.0, 100.0, 0.0, 0.0), viewport, &config));
    }

    #[test]
    fn class_reveal_offset() {
        let config = RevealConfig::default();
        assert!(class_reveal(649.0, 800.0, &config));
        assert!(!class_reveal(650.0, 800.0, &config));
    }
}

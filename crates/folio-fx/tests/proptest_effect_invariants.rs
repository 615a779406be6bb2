#![forbid(unsafe_code)]

//! Property-based invariant tests for the effect units.
//!
//! 1. A bounce keeps particles in bounds and flips only the overflowing axis.
//! 2. Connection opacity is non-increasing in distance and 0 at the threshold.
//! 3. Carousel index after `n` advances is `n mod len`; `select(i)` is `i mod len`.
//! 4. Counters are non-decreasing, bounded by the target, and end on it.
//! 5. A reveal fires at most once per element.
//! 6. Toggling the theme twice restores flag and class.
//! 7. Scramble at progress 1 equals the target.
//! 8. The trail never exceeds its cap and lives stay in (0, 1].
//! 9. Matrix rain always has at least one column, one drop per column.
//! 10. The looping typewriter only ever shows a prefix of the current phrase.

use std::time::Duration;

use folio_core::geometry::{Point, Size};
use folio_core::rng::FxRng;
use folio_fx::carousel::Carousel;
use folio_fx::effect::{ContinuousFx, FrameContext};
use folio_fx::matrix_rain::{MatrixConfig, MatrixRain};
use folio_fx::particles::{Particle, connection_opacity};
use folio_fx::reveal::{Counter, Intersection, RevealKind, RevealObserver, RevealSpec};
use folio_fx::text::{TextConfig, TypewriterLoop, scramble_frame};
use folio_fx::theme::{MemoryThemeStore, ThemeConfig, ThemeController, ThemeStore};
use folio_fx::trail::{MouseTrail, TrailConfig};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn particle_in(w: f64, h: f64) -> impl Strategy<Value = Particle> {
    (0.0..=w, 0.0..=h, -5.0..5.0f64, -5.0..5.0f64, 1.0..3.0f64).prop_map(
        |(x, y, vx, vy, radius)| Particle {
            x,
            y,
            vx,
            vy,
            radius,
        },
    )
}

#[derive(Debug, Clone)]
enum TrailInput {
    Move(f64, f64),
    Frame,
}

fn trail_input() -> impl Strategy<Value = TrailInput> {
    prop_oneof![
        (0.0..2000.0f64, 0.0..2000.0f64).prop_map(|(x, y)| TrailInput::Move(x, y)),
        Just(TrailInput::Frame),
    ]
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Bounce
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn bounce_stays_in_bounds(
        (w, h, p) in (1.0..2000.0f64, 1.0..2000.0f64)
            .prop_flat_map(|(w, h)| (Just(w), Just(h), particle_in(w, h)))
    ) {
        let size = Size::new(w, h);
        let mut q = p;
        q.advance(size);
        prop_assert!((0.0..=w).contains(&q.x), "x={} w={}", q.x, w);
        prop_assert!((0.0..=h).contains(&q.y), "y={} h={}", q.y, h);

        let nx = p.x + p.vx;
        let ny = p.y + p.vy;
        let x_overflow = nx < 0.0 || nx > w;
        let y_overflow = ny < 0.0 || ny > h;
        prop_assert_eq!(q.vx == -p.vx && p.vx != 0.0, x_overflow && p.vx != 0.0);
        prop_assert_eq!(q.vy == -p.vy && p.vy != 0.0, y_overflow && p.vy != 0.0);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Connection opacity
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn opacity_monotone(a in 0.0..300.0f64, b in 0.0..300.0f64, t in 1.0..200.0f64) {
        let (near, far) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(connection_opacity(near, t) >= connection_opacity(far, t));
        prop_assert_eq!(connection_opacity(t, t), 0.0);
        let o = connection_opacity(a, t);
        prop_assert!((0.0..=1.0).contains(&o));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Carousel
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn carousel_advance_and_select(len in 1usize..20, n in 0usize..100, i in 0usize..1000) {
        let mut c = Carousel::new(len);
        for _ in 0..n {
            c.advance();
        }
        prop_assert_eq!(c.index(), n % len);
        let sel = c.select(i).expect("non-empty carousel");
        prop_assert_eq!(sel.index, i % len);
        prop_assert_eq!(sel.flags.iter().filter(|f| **f).count(), 1);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Counter
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn counter_bounded_and_exact(
        target in 0u32..100_000,
        duration_ms in 1u64..5000,
        tick_ms in 1u64..100,
        percent in any::<bool>(),
    ) {
        let mut c = Counter::new(
            target,
            percent,
            Duration::from_millis(duration_ms),
            Duration::from_millis(tick_ms),
        );
        let suffix = if percent { '%' } else { '+' };
        let mut last = 0;
        let mut final_text = None;
        while let Some(text) = c.tick() {
            let v = c.value();
            prop_assert!(v >= last);
            prop_assert!(v <= target);
            prop_assert!(text.ends_with(suffix));
            last = v;
            final_text = Some(text);
        }
        prop_assert_eq!(final_text, Some(format!("{target}{suffix}")));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Reveal fires once
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn reveal_fires_at_most_once(entries in prop::collection::vec(any::<bool>(), 0..30)) {
        let mut obs = RevealObserver::new(Default::default());
        obs.observe(1u32, RevealSpec::animate(RevealKind::FadeInUp));
        let fired = entries
            .iter()
            .filter_map(|&v| obs.on_intersection(&1, Intersection { is_intersecting: v }))
            .count();
        let expected = usize::from(entries.iter().any(|v| *v));
        prop_assert_eq!(fired, expected);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Theme toggle
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn theme_toggle_twice_restores(stored in prop::option::of("true|false|[a-z]{0,5}")) {
        let store = match &stored {
            Some(v) => MemoryThemeStore::with_value("darkMode", v),
            None => MemoryThemeStore::new(),
        };
        let (mut c, initial) = ThemeController::load(store, ThemeConfig::default());
        let flag = c.store().get("darkMode").expect("readable");
        c.toggle();
        let again = c.toggle();
        prop_assert_eq!(again, initial);
        prop_assert_eq!(c.store().get("darkMode").expect("readable"), flag);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Scramble
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn scramble_complete_equals_target(target in "\\PC{0,40}", seed in any::<u32>()) {
        let mut rng = FxRng::from_seed(seed);
        prop_assert_eq!(scramble_frame(&target, 1.0, &mut rng), target.clone());
        let partial = scramble_frame(&target, 0.5, &mut rng);
        prop_assert_eq!(partial.chars().count(), target.chars().count());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 8. Trail
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn trail_bounded_with_live_points(inputs in prop::collection::vec(trail_input(), 0..200)) {
        let mut trail = MouseTrail::new(TrailConfig::default());
        let ctx = FrameContext::nth(1, Duration::from_millis(16));
        for input in inputs {
            match input {
                TrailInput::Move(x, y) => trail.push(Point::new(x, y)),
                TrailInput::Frame => trail.step(&ctx),
            }
            prop_assert!(trail.len() <= 20);
            prop_assert!(trail.points().all(|p| p.life > 0.0 && p.life <= 1.0));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 9. Matrix columns
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn matrix_columns_track_width(w in 0.0..4000.0f64, h in 0.0..3000.0f64, w2 in 0.0..4000.0f64) {
        let mut rain =
            MatrixRain::new(MatrixConfig::default(), Size::new(w, h), FxRng::from_seed(1));
        prop_assert!(rain.columns() >= 1);
        prop_assert_eq!(rain.drops().len(), rain.columns());
        rain.step(&FrameContext::nth(0, Duration::from_millis(33)));
        rain.resize(Size::new(w2, h));
        prop_assert!(rain.columns() >= 1);
        prop_assert_eq!(rain.drops().len(), rain.columns());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 10. Typewriter prefix
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn typewriter_shows_prefix(
        phrases in prop::collection::vec("[a-zA-Z ]{0,12}", 1..4),
        steps in 0usize..200,
    ) {
        let config = TextConfig { phrases: phrases.clone(), ..TextConfig::default() };
        let mut tw = TypewriterLoop::new(&config);
        for _ in 0..steps {
            tw.advance();
            let phrase = &phrases[tw.phrase_index()];
            prop_assert!(phrase.starts_with(&tw.text()));
        }
    }
}

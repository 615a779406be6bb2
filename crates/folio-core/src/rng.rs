#![forbid(unsafe_code)]

//! Deterministic xorshift32 randomness.
//!
//! Effects that need noise (particle placement, matrix glyphs, glitch and
//! scramble characters) draw from an [`FxRng`] so a fixed seed reproduces a
//! run frame for frame. The web crate seeds from `Math.random()` at mount.

/// Xorshift32 generator. Never yields zero from a non-zero state.
#[derive(Debug, Clone)]
pub struct FxRng {
    state: u32,
}

impl FxRng {
    /// Seed used when a caller passes 0 (a zero state would stick at zero).
    pub const FALLBACK_SEED: u32 = 0x9E37_79B9;

    pub fn from_seed(seed: u32) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    /// Seed from a float in `[0, 1)`, as produced by `Math.random()`.
    pub fn from_unit(unit: f64) -> Self {
        let scaled = (unit.clamp(0.0, 1.0) * f64::from(u32::MAX)) as u32;
        Self::from_seed(scaled)
    }

    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Uniform float in `[0, 1)`.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / (f64::from(u32::MAX) + 1.0)
    }

    /// Uniform float in `[lo, hi)`.
    #[inline]
    pub fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }

    /// `true` with probability `p`.
    #[inline]
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Uniform index in `0..len`; `0` when `len == 0`.
    #[inline]
    pub fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        (self.next_f64() * len as f64) as usize % len
    }

    /// Uniformly chosen element, or `None` for an empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let i = self.index(items.len());
        items.get(i)
    }
}

impl Default for FxRng {
    fn default() -> Self {
        Self::from_seed(Self::FALLBACK_SEED)
    }
}

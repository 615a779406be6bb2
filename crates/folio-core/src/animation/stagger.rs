#![forbid(unsafe_code)]

//! Stagger offsets for cascading a list of items.
//!
//! The ambient particle burst starts `n` dots a fixed gap apart;
//! [`stagger_offsets`] computes those start times.
//!
//! # Invariants
//!
//! 1. `stagger_offsets(0, ..)` returns an empty vec.
//! 2. The first offset is always `Duration::ZERO`.
//! 3. `offset[i] = i * gap` exactly, saturating at `Duration::MAX`.

use std::time::Duration;

/// Compute start offsets for `count` items spaced `gap` apart.
#[must_use]
pub fn stagger_offsets(count: usize, gap: Duration) -> Vec<Duration> {
    (0..count)
        .map(|i| gap.saturating_mul(u32::try_from(i).unwrap_or(u32::MAX)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const GAP: Duration = Duration::from_millis(200);

    #[test]
    fn empty_and_single() {
        assert!(stagger_offsets(0, GAP).is_empty());
        assert_eq!(stagger_offsets(1, GAP), vec![Duration::ZERO]);
    }

    #[test]
    fn burst_of_ten() {
        let offsets = stagger_offsets(10, GAP);
        assert_eq!(offsets.len(), 10);
        assert_eq!(offsets[0], Duration::ZERO);
        assert_eq!(offsets[9], Duration::from_millis(1800));
        for (i, o) in offsets.iter().enumerate() {
            assert_eq!(*o, GAP * i as u32);
        }
    }

    #[test]
    fn zero_gap_collapses() {
        let offsets = stagger_offsets(4, Duration::ZERO);
        assert!(offsets.iter().all(|o| o.is_zero()));
    }

    #[test]
    fn huge_gap_saturates() {
        let offsets = stagger_offsets(3, Duration::MAX);
        assert_eq!(offsets[2], Duration::MAX);
    }
}

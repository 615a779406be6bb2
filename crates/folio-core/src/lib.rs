#![forbid(unsafe_code)]

//! Core: geometry, colour, easing, deterministic randomness, and input keys.
//!
//! Everything in this crate is host-agnostic so effect state machines can be
//! driven and tested on native targets exactly as they run in the browser.

pub mod animation;
pub mod color;
pub mod event;
pub mod geometry;
pub mod key_sequence;
pub mod logging;
pub mod rng;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

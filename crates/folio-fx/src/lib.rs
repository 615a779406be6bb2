#![forbid(unsafe_code)]

//! Effect units for the folio portfolio page.
//!
//! Every unit here is a plain state machine: it is fed time, pointer
//! positions, scroll offsets, or intersection entries, and answers with
//! drawing commands, CSS values, or text. Nothing touches the DOM, so the
//! whole engine runs and is tested on native targets; `folio-web` wires the
//! units to a browser page.
//!
//! # Unit families
//!
//! | Family | Modules |
//! |--------|---------|
//! | Continuous animators | [`particles`], [`matrix_rain`], [`trail`], [`floating`], [`ambient`] |
//! | Pointer-reactive | [`pointer`] |
//! | Reveal triggers | [`reveal`] |
//! | Cyclic text | [`text`] |
//! | Rotating selection | [`carousel`] |
//! | Page chrome | [`scroll`], [`theme`] |

pub mod ambient;
pub mod carousel;
pub mod config;
pub mod effect;
pub mod error;
pub mod floating;
pub mod matrix_rain;
pub mod particles;
pub mod pointer;
pub mod reveal;
pub mod scroll;
pub mod style;
pub mod surface;
pub mod text;
pub mod theme;
pub mod trail;

pub use config::FolioConfig;
pub use effect::{CanvasFx, ContinuousFx, Effect, FrameContext, Lifecycle};
pub use error::{FxError, FxResult};
pub use style::{ClassToggle, StyleDecl, Transform, TransformFn, Transition};
pub use surface::{DrawOp, RecordingSurface, Surface};

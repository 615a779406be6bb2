#![forbid(unsafe_code)]

//! Inline-style values produced by DOM effects.
//!
//! Effects compute *what* an element should look like; the web crate applies
//! the resulting [`StyleDecl`]s and [`ClassToggle`]s verbatim.

use std::fmt;
use std::time::Duration;

/// One CSS transform function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformFn {
    Perspective(f64),
    Translate(f64, f64),
    TranslateX(f64),
    TranslateY(f64),
    Scale(f64),
    /// Uniform `scale3d(s, s, s)`.
    Scale3d(f64),
    /// Degrees.
    Rotate(f64),
    RotateX(f64),
    RotateY(f64),
}

/// Formats a number the way JS template literals do for the values we emit:
/// integral floats without a fraction and no negative zero.
struct Num(f64);

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = if self.0 == 0.0 { 0.0 } else { self.0 };
        write!(f, "{v}")
    }
}

impl fmt::Display for TransformFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            TransformFn::Perspective(px) => write!(f, "perspective({}px)", Num(px)),
            TransformFn::Translate(x, y) => write!(f, "translate({}px, {}px)", Num(x), Num(y)),
            TransformFn::TranslateX(x) => write!(f, "translateX({}px)", Num(x)),
            TransformFn::TranslateY(y) => write!(f, "translateY({}px)", Num(y)),
            TransformFn::Scale(s) => write!(f, "scale({})", Num(s)),
            TransformFn::Scale3d(s) => write!(f, "scale3d({0}, {0}, {0})", Num(s)),
            TransformFn::Rotate(d) => write!(f, "rotate({}deg)", Num(d)),
            TransformFn::RotateX(d) => write!(f, "rotateX({}deg)", Num(d)),
            TransformFn::RotateY(d) => write!(f, "rotateY({}deg)", Num(d)),
        }
    }
}

/// An ordered CSS transform list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Transform(Vec<TransformFn>);

impl Transform {
    /// `none`.
    pub fn none() -> Self {
        Self(Vec::new())
    }

    pub fn of(f: TransformFn) -> Self {
        Self(vec![f])
    }

    #[must_use]
    pub fn then(mut self, f: TransformFn) -> Self {
        self.0.push(f);
        self
    }

    pub fn functions(&self) -> &[TransformFn] {
        &self.0
    }

    /// CSS text for the `transform` property.
    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("none");
        }
        for (i, func) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{func}")?;
        }
        Ok(())
    }
}

/// A single `transition` entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub property: &'static str,
    pub duration: Duration,
    /// Timing function; omitted from the CSS when `None`.
    pub timing: Option<&'static str>,
}

impl Transition {
    pub const fn new(property: &'static str, duration: Duration) -> Self {
        Self {
            property,
            duration,
            timing: None,
        }
    }

    #[must_use]
    pub const fn timing(mut self, timing: &'static str) -> Self {
        self.timing = Some(timing);
        self
    }

    /// Comma-joined CSS for several transitions.
    pub fn list_css(list: &[Transition]) -> String {
        list.iter()
            .map(Transition::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}s",
            self.property,
            Num(self.duration.as_secs_f64())
        )?;
        if let Some(timing) = self.timing {
            write!(f, " {timing}")?;
        }
        Ok(())
    }
}

/// An inline style property assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleDecl {
    pub property: &'static str,
    pub value: String,
}

impl StyleDecl {
    pub fn new(property: &'static str, value: impl Into<String>) -> Self {
        Self {
            property,
            value: value.into(),
        }
    }

    pub fn transform(t: &Transform) -> Self {
        Self::new("transform", t.to_css())
    }

    pub fn opacity(v: f64) -> Self {
        Self::new("opacity", Num(v.clamp(0.0, 1.0)).to_string())
    }

    pub fn transition(list: &[Transition]) -> Self {
        Self::new("transition", Transition::list_css(list))
    }

    pub fn width(css: impl Into<String>) -> Self {
        Self::new("width", css)
    }

    pub fn left_px(v: f64) -> Self {
        Self::new("left", format!("{}px", Num(v)))
    }

    pub fn top_px(v: f64) -> Self {
        Self::new("top", format!("{}px", Num(v)))
    }

    pub fn percent(property: &'static str, v: f64) -> Self {
        Self::new(property, format!("{}%", Num(v)))
    }

    pub fn seconds(property: &'static str, d: Duration) -> Self {
        Self::new(property, format!("{}s", Num(d.as_secs_f64())))
    }
}

/// Add (`on`) or remove a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassToggle {
    pub class: &'static str,
    pub on: bool,
}

impl ClassToggle {
    pub const fn new(class: &'static str, on: bool) -> Self {
        Self { class, on }
    }
}

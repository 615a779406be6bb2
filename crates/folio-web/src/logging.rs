#![forbid(unsafe_code)]

//! Tracing layer that formats events as single console lines.
//!
//! Lines go through a [`ConsoleWriter`]. In the browser that is
//! `BrowserConsole`, which picks `console.error`/`warn`/`info`/`debug` by
//! level; tests and native hosts use [`CaptureWriter`].
//!
//! ```
//! use folio_web::logging::{CaptureWriter, ConsoleLayer, LogConfig};
//! use tracing_subscriber::prelude::*;
//!
//! let writer = CaptureWriter::new();
//! let layer = ConsoleLayer::with_config(writer.clone(), LogConfig::plain());
//! tracing::subscriber::with_default(tracing_subscriber::registry().with(layer), || {
//!     tracing::info!(unit = "theme", "theme applied");
//! });
//! assert_eq!(writer.lines()[0].1, "INFO  theme applied unit=theme");
//! ```

use std::fmt::{self, Write as FmtWrite};
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::level_filters::LevelFilter;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;

// ============================================================================
// Configuration
// ============================================================================

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Most verbose level written. Default: `INFO`.
    pub max_level: LevelFilter,
    /// Prefix with HH:MM:SS. Default: false, the devtools console stamps lines.
    pub show_time: bool,
    pub show_level: bool,
    /// Module path of the event. Default: false.
    pub show_target: bool,
    pub show_fields: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            max_level: LevelFilter::INFO,
            show_time: false,
            show_level: true,
            show_target: false,
            show_fields: true,
        }
    }
}

impl LogConfig {
    /// Level, message and fields at every verbosity; stable for assertions.
    pub fn plain() -> Self {
        Self {
            max_level: LevelFilter::TRACE,
            ..Self::default()
        }
    }
}

fn level_str(level: Level) -> &'static str {
    match level {
        Level::ERROR => "ERROR",
        Level::WARN => "WARN ",
        Level::INFO => "INFO ",
        Level::DEBUG => "DEBUG",
        Level::TRACE => "TRACE",
    }
}

// ============================================================================
// Writers
// ============================================================================

/// Destination for formatted lines.
pub trait ConsoleWriter {
    fn write_line(&self, level: Level, line: &str);
}

/// Keeps every line in memory.
#[derive(Debug, Clone, Default)]
pub struct CaptureWriter {
    lines: Arc<Mutex<Vec<(Level, String)>>>,
}

impl CaptureWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<(Level, String)> {
        match self.lines.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl ConsoleWriter for CaptureWriter {
    fn write_line(&self, level: Level, line: &str) {
        let mut guard = match self.lines.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.push((level, line.to_owned()));
    }
}

/// Writes to the devtools console.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserConsole;

#[cfg(target_arch = "wasm32")]
impl ConsoleWriter for BrowserConsole {
    fn write_line(&self, level: Level, line: &str) {
        let value = wasm_bindgen::JsValue::from_str(line);
        match level {
            Level::ERROR => web_sys::console::error_1(&value),
            Level::WARN => web_sys::console::warn_1(&value),
            Level::INFO => web_sys::console::info_1(&value),
            Level::DEBUG | Level::TRACE => web_sys::console::debug_1(&value),
        }
    }
}

// ============================================================================
// Event Visitor
// ============================================================================

#[derive(Default)]
struct EventVisitor {
    message: Option<String>,
    fields: Vec<(&'static str, String)>,
}

impl EventVisitor {
    fn push(&mut self, field: &Field, value: String) {
        if field.name() == "message" {
            self.message = Some(value);
        } else {
            self.fields.push((field.name(), value));
        }
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let rendered = format!("{value:?}");
        self.push(field, strip_debug_quotes(&rendered).to_owned());
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.push(field, value.to_owned());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.push(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.push(field, value.to_string());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.push(field, value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.push(field, value.to_string());
    }
}

fn strip_debug_quotes(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(s)
}

fn timestamp_now() -> String {
    // std::time::SystemTime panics on wasm32-unknown-unknown.
    let since_epoch = web_time::SystemTime::now()
        .duration_since(web_time::UNIX_EPOCH)
        .unwrap_or_default();
    let secs = since_epoch.as_secs();
    format!(
        "{:02}:{:02}:{:02}",
        (secs / 3600) % 24,
        (secs % 3600) / 60,
        secs % 60
    )
}

// ============================================================================
// ConsoleLayer
// ============================================================================

/// A `tracing_subscriber::Layer` writing one line per event.
pub struct ConsoleLayer<W> {
    writer: W,
    config: LogConfig,
}

impl<W: ConsoleWriter> ConsoleLayer<W> {
    pub fn new(writer: W) -> Self {
        Self::with_config(writer, LogConfig::default())
    }

    pub fn with_config(writer: W, config: LogConfig) -> Self {
        Self { writer, config }
    }

    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    /// Render `event` as it would be written, or `None` when filtered out.
    fn format_event(&self, event: &Event<'_>) -> Option<String> {
        let metadata = event.metadata();
        let level = *metadata.level();
        if self.config.max_level < level {
            return None;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let mut line = String::new();
        if self.config.show_time {
            line.push_str(&timestamp_now());
            line.push(' ');
        }
        if self.config.show_level {
            line.push_str(level_str(level));
            line.push(' ');
        }
        if self.config.show_target {
            let _ = write!(line, "{}: ", metadata.target());
        }
        line.push_str(visitor.message.as_deref().unwrap_or_default());
        if self.config.show_fields {
            for (k, v) in &visitor.fields {
                let _ = write!(line, " {k}={v}");
            }
        }
        Some(line)
    }
}

impl<S, W> Layer<S> for ConsoleLayer<W>
where
    S: Subscriber,
    W: ConsoleWriter + 'static,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if let Some(line) = self.format_event(event) {
            self.writer.write_line(*event.metadata().level(), &line);
        }
    }
}

/// Install a console layer as the global subscriber. A second call is a
/// no-op and returns false.
#[cfg(target_arch = "wasm32")]
pub fn install(config: LogConfig) -> bool {
    use tracing_subscriber::layer::SubscriberExt;

    let subscriber =
        tracing_subscriber::registry().with(ConsoleLayer::with_config(BrowserConsole, config));
    tracing::subscriber::set_global_default(subscriber).is_ok()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tracing_subscriber::prelude::*;

    fn capture(config: LogConfig, f: impl FnOnce()) -> Vec<(Level, String)> {
        let writer = CaptureWriter::new();
        let layer = ConsoleLayer::with_config(writer.clone(), config);
        tracing::subscriber::with_default(tracing_subscriber::registry().with(layer), f);
        writer.lines()
    }

    #[test]
    fn default_config() {
        let cfg = LogConfig::default();
        assert_eq!(cfg.max_level, LevelFilter::INFO);
        assert!(!cfg.show_time);
        assert!(cfg.show_level);
        assert!(!cfg.show_target);
        assert!(cfg.show_fields);
    }

    #[test]
    fn level_and_fields_in_order() {
        let lines = capture(LogConfig::plain(), || {
            tracing::warn!(unit = "theme", store = "localStorage", "theme flag not persisted");
        });
        assert_eq!(
            lines,
            vec![(
                Level::WARN,
                "WARN  theme flag not persisted unit=theme store=localStorage".to_string()
            )]
        );
    }

    #[test]
    fn debug_values_lose_quotes() {
        let lines = capture(LogConfig::plain(), || {
            let selector = "#particle-canvas";
            tracing::debug!(selector = ?selector, count = 3u64, "target missing");
        });
        assert_eq!(lines[0].1, "DEBUG target missing selector=#particle-canvas count=3");
    }

    #[test]
    fn max_level_filters_verbose_events() {
        let lines = capture(LogConfig::default(), || {
            tracing::trace!("dropped");
            tracing::debug!("dropped");
            tracing::info!("kept");
            tracing::error!("kept too");
        });
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].0, Level::ERROR);
    }

    #[test]
    fn level_and_fields_can_be_hidden() {
        let config = LogConfig {
            show_level: false,
            show_fields: false,
            ..LogConfig::plain()
        };
        let lines = capture(config, || tracing::info!(count = 5u64, "page disposed"));
        assert_eq!(lines[0].1, "page disposed");
    }

    #[test]
    fn target_prefix() {
        let config = LogConfig {
            show_level: false,
            show_target: true,
            ..LogConfig::plain()
        };
        let lines = capture(config, || tracing::info!("mounted"));
        assert_eq!(lines[0].1, format!("{}: mounted", module_path!()));
    }

    #[test]
    fn timestamp_shape() {
        let ts = timestamp_now();
        assert_eq!(ts.len(), 8);
        assert_eq!(ts.as_bytes()[2], b':');
        assert_eq!(ts.as_bytes()[5], b':');
    }

    #[test]
    fn strip_quotes_only_when_paired() {
        assert_eq!(strip_debug_quotes("\"x\""), "x");
        assert_eq!(strip_debug_quotes("\"x"), "\"x");
        assert_eq!(strip_debug_quotes("7"), "7");
    }
}

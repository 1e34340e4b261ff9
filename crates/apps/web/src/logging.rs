use std::io;
use std::sync::OnceLock;

use tracing::{Level, debug};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;
use wasm_bindgen::JsValue;

static LOGGING: OnceLock<String> = OnceLock::new();

/// Installs the global `tracing` subscriber. Only the first call has an effect;
/// a later call asking for a different directive is reported and ignored.
pub fn init(directive: &str) {
    let installed = LOGGING.get_or_init(|| {
        let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(ConsoleMakeWriter)
            // No wall clock in wasm32-unknown-unknown; the console stamps lines anyway.
            .without_time()
            .with_ansi(false)
            .try_init();
        directive.trim().to_owned()
    });
    if let Some(ignored) = ignored_directive(installed, directive) {
        debug!(installed = %installed, requested = ignored, "log level fixed at first boot");
    }
}

/// The requested directive when it differs from the one already installed.
fn ignored_directive<'a>(installed: &str, requested: &'a str) -> Option<&'a str> {
    let requested = requested.trim();
    (requested != installed).then_some(requested)
}

#[derive(Debug, Clone, Copy, Default)]
struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &tracing::Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(*meta.level())
    }
}

/// Buffers one formatted event and emits it as a single console line on drop.
struct ConsoleWriter {
    level: Level,
    buf: Vec<u8>,
}

impl ConsoleWriter {
    fn new(level: Level) -> Self {
        Self {
            level,
            buf: Vec::with_capacity(128),
        }
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let text = String::from_utf8_lossy(&self.buf);
        let line = text.trim_end();
        if line.is_empty() {
            return;
        }
        let value = JsValue::from_str(line);
        match self.level {
            Level::ERROR => web_sys::console::error_1(&value),
            Level::WARN => web_sys::console::warn_1(&value),
            Level::DEBUG | Level::TRACE => web_sys::console::debug_1(&value),
            _ => web_sys::console::log_1(&value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ignored_directive;

    #[test]
    fn same_directive_is_not_reported() {
        assert_eq!(ignored_directive("info", "info"), None);
        assert_eq!(ignored_directive("info", " info\n"), None);
    }

    #[test]
    fn different_directive_is_reported() {
        assert_eq!(ignored_directive("info", "debug"), Some("debug"));
        assert_eq!(
            ignored_directive("warn", "carousel=trace"),
            Some("carousel=trace")
        );
    }
}

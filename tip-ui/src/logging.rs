use anyhow::Result;
use chrono::Local;
use std::{
    fs::File,
    io::{self, IsTerminal, Write},
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError},
};
use tracing::{Event, Level, Subscriber, debug};
use tracing_subscriber::{
    EnvFilter,
    Layer, // needed for .with_filter() on the stdout layer
    fmt::{
        FmtContext, MakeWriter,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    reload,
    util::SubscriberInitExt,
};

/// Logging settings resolved from the config file and command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingOptions {
    /// Bare level or full `EnvFilter` directive. `RUST_LOG` takes precedence.
    pub level: String,
    /// File to append records to, if any.
    pub file: Option<PathBuf>,
    /// Whether records are echoed to stdout.
    pub stdout: bool,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            stdout: true,
        }
    }
}

// --- Formatter ---

/// `HH:MM:SS.mmm LEVEL file:line message fields`
struct TipFmt;

impl<S, N> FormatEvent<S, N> for TipFmt
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let ansi = writer.has_ansi_escapes();
        let timestamp = Local::now().format("%H:%M:%S%.3f");

        if ansi {
            let color = match *meta.level() {
                Level::ERROR => "1;31",
                Level::WARN => "1;33",
                Level::INFO => "1;32",
                Level::DEBUG => "1;34",
                Level::TRACE => "1;35",
            };
            write!(
                writer,
                "\x1b[2m{timestamp}\x1b[0m \x1b[{color}m{:>5}\x1b[0m ",
                meta.level()
            )?;
        } else {
            write!(writer, "{timestamp} {:>5} ", meta.level())?;
        }

        if let (Some(file), Some(line)) = (meta.file(), meta.line()) {
            let file = file
                .strip_prefix("src/")
                .or_else(|| file.strip_prefix("src\\"))
                .unwrap_or(file);
            if ansi {
                write!(writer, "\x1b[36m{file}:{line}\x1b[0m ")?;
            } else {
                write!(writer, "{file}:{line} ")?;
            }
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

// --- Late-bound file writer ---

/// A MakeWriter that can be pointed at a file after initialization.
/// Records are dropped while no file is set.
#[derive(Clone)]
struct FileSlot(Arc<Mutex<Option<File>>>);

struct SlotWriter<'a>(MutexGuard<'a, Option<File>>);

impl Write for SlotWriter<'_> {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        match &mut *self.0 {
            Some(f) => f.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut *self.0 {
            Some(f) => f.flush(),
            None => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for FileSlot {
    type Writer = SlotWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        SlotWriter(self.0.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

// --- Handles ---

type SetFilterFn = Box<dyn Fn(EnvFilter) -> Result<()> + Send + Sync>;

struct Handles {
    level: SetFilterFn,
    stdout: SetFilterFn,
    file: Arc<Mutex<Option<File>>>,
}

static HANDLES: OnceLock<Handles> = OnceLock::new();

fn handles() -> Result<&'static Handles> {
    HANDLES
        .get()
        .ok_or_else(|| anyhow::anyhow!("logging not yet initialized"))
}

fn filter_setter<S>(
    handle: reload::Handle<EnvFilter, S>,
    what: &'static str,
) -> SetFilterFn
where
    S: Subscriber + Send + Sync + 'static,
{
    Box::new(move |filter| {
        handle
            .reload(filter)
            .map_err(|e| anyhow::anyhow!("{what} filter reload failed: {e}"))
    })
}

fn parse_filter(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(level).map_err(|e| anyhow::anyhow!("invalid log level '{level}': {e}"))
}

// --- Public API ---

/// Initializes logging. Call once at startup.
///
/// - Level: `RUST_LOG` if set, otherwise `options.level`.
/// - Stdout: colored on a terminal, plain when piped, off if `options.stdout` is false.
/// - File: appended to when `options.file` is set; can be changed later.
pub fn init_logging(options: &LoggingOptions) -> Result<()> {
    let level = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => parse_filter(&options.level)?,
    };

    let file_inner: Arc<Mutex<Option<File>>> = Arc::new(Mutex::new(None));

    // Stdout gate starts open; the level filter is still the ceiling.
    let (stdout_gate, stdout_handle) = reload::Layer::new(EnvFilter::new("trace"));
    let (level_filter, level_handle) = reload::Layer::new(level);

    let stdout_layer = tracing_subscriber::fmt::layer()
        .event_format(TipFmt)
        .with_ansi(io::stdout().is_terminal())
        .with_filter(stdout_gate);

    let file_layer = tracing_subscriber::fmt::layer()
        .event_format(TipFmt)
        .with_ansi(false)
        .with_writer(FileSlot(file_inner.clone()));

    tracing_subscriber::registry()
        .with(level_filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("logging already initialized: {e}"))?;

    let _ = HANDLES.set(Handles {
        level: filter_setter(level_handle, "level"),
        stdout: filter_setter(stdout_handle, "stdout"),
        file: file_inner,
    });

    set_stdout_enabled(options.stdout)?;
    if let Some(path) = &options.file {
        enable_file_logging(path)?;
    }

    debug!(?options, "logging initialized");
    Ok(())
}

/// Changes the active log filter at runtime.
/// Accepts a bare level ("error", "warn", "info", "debug", "trace")
/// or any full EnvFilter directive.
pub fn set_log_level(level: &str) -> Result<()> {
    (handles()?.level)(parse_filter(level)?)
}

/// Shows or hides stdout output without affecting file logging.
pub fn set_stdout_enabled(enabled: bool) -> Result<()> {
    let gate = if enabled { "trace" } else { "off" };
    (handles()?.stdout)(EnvFilter::new(gate))
}

/// Starts appending log output to `path`, replacing any open log file.
/// The directory must already exist.
pub fn enable_file_logging(path: &Path) -> Result<()> {
    let handles = handles()?;
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| anyhow::anyhow!("cannot open log file '{}': {e}", path.display()))?;

    *handles.file.lock().unwrap_or_else(PoisonError::into_inner) = Some(file);
    Ok(())
}

/// Flushes and closes the current log file, if any.
pub fn disable_file_logging() {
    if let Some(handles) = HANDLES.get() {
        let mut slot = handles.file.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(file) = slot.as_mut() {
            let _ = file.flush();
        }
        *slot = None;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_options_log_info_to_stdout_only() {
        let options = LoggingOptions::default();

        assert_eq!(options.level, "info");
        assert_eq!(options.file, None);
        assert!(options.stdout);
    }

    #[test]
    fn parse_filter_accepts_levels_and_directives() {
        assert!(parse_filter("debug").is_ok());
        assert!(parse_filter("info,tip_core=trace").is_ok());
    }

    #[test]
    fn runtime_controls_fail_before_initialization() {
        assert!(set_log_level("debug").is_err());
        assert!(set_stdout_enabled(false).is_err());
        assert!(enable_file_logging(Path::new("tip-time.log")).is_err());
        disable_file_logging();
    }

    #[test]
    fn parse_filter_rejects_garbage() {
        assert!(parse_filter("tip_core=loud").is_err());
    }
}

use std::sync::Once;

/// Logger configuration. `RUST_LOG` (e.g. "electromos_assets=debug") takes
/// precedence over `verbosity`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Number of `-v` flags given on the command line.
    pub verbosity: u8,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            verbosity: 0,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

pub fn level_for_verbosity(verbosity: u8) -> log::LevelFilter {
    match verbosity {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once; later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(level_for_verbosity(config.verbosity));
        }

        builder.write_style(config.write_style);
        builder.format_timestamp(None);
        // A second logger (e.g. from a test harness) is not fatal.
        let _ = builder.try_init();

        log::debug!("logging initialized");
    });
}

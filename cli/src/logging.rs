use doxsearch_core::types::LoggingConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Simple levels are forgiving about case; anything else is an
/// `EnvFilter` directive string.
fn level_directives(level: &str) -> String {
    let trimmed = level.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "" => "info".to_owned(),
        "trace" | "debug" | "info" | "error" => trimmed.to_ascii_lowercase(),
        "warn" | "warning" => "warn".to_owned(),
        _ => trimmed.to_owned(),
    }
}

fn config_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_new(level_directives(&config.level))
        .unwrap_or_else(|_| EnvFilter::default().add_directive(LevelFilter::INFO.into()))
}

/// The configured level with `RUST_LOG` merged in.
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    let env_directives = std::env::var("RUST_LOG")
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty());

    match env_directives {
        Some(env_directives) => {
            let combined = format!("{},{env_directives}", level_directives(&config.level));
            EnvFilter::try_new(combined)
                .or_else(|_| EnvFilter::try_new(env_directives))
                .unwrap_or_else(|_| config_filter(config))
        }
        None => config_filter(config),
    }
}

/// Installs the stderr subscriber. Later calls are ignored.
pub fn init(config: &LoggingConfig) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

use std::{
    env,
    fs::File,
    path::{Path, PathBuf},
    sync::Mutex,
};

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing for the notifier.
///
/// Always logs to stdout. With `log_file` set, the same events are also written
/// (without ANSI colors) to that file, which is truncated on startup. A log
/// file that cannot be created is reported as a warning and skipped.
pub fn init(service_name: &str, log_file: Option<&Path>) {
    // Default: debug for our crates, info for everything else.
    // Can be overridden with `RUST_LOG`.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "info,hwn=debug,hwn_core=debug,hwn_practicum=debug,hwn_telegram=debug,{service_name}=debug"
        ))
    });

    let mut open_failure = None;
    let file_layer = match log_file.map(|path| (path, File::create(path))) {
        Some((_, Ok(file))) => Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file))),
        Some((path, Err(e))) => {
            open_failure = Some(format!("cannot open log file {}: {e}", path.display()));
            None
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_ansi(true))
        .with(file_layer)
        .init();

    if let Some(reason) = open_failure {
        tracing::warn!("{reason}; logging to stdout only");
    }
}

/// `LOG_FILE` from the environment, if set and non-blank.
pub fn log_file_from_env() -> Option<PathBuf> {
    env::var("LOG_FILE")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from)
}

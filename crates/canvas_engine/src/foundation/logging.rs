//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system
///
/// Honors `RUST_LOG`; falls back to `Info` when it is unset. Calling this more
/// than once is harmless, later calls are ignored.
pub fn init() {
    init_with_level(log::LevelFilter::Info);
}

/// Initialize the logging system with a default level
///
/// `RUST_LOG` filters still take precedence over `level`.
pub fn init_with_level(level: log::LevelFilter) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }

    if builder.try_init().is_ok() {
        log::debug!("Logging initialized at {}", level);
    }
}

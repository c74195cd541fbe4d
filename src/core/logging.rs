//! Logging initialization and utilities

/// Initialize the logging system
///
/// Uses env_logger with default filter level of `info`.
/// Override with RUST_LOG environment variable, e.g.
/// `RUST_LOG=stronghold_scan::structure=debug` to trace layout retries.
///
/// # Example
/// ```no_run
/// stronghold_scan::core::logging::init();
/// log::info!("Scan started");
/// ```
pub fn init() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    )
    .format_timestamp_millis()
    .init();
}

//! Logging initialization

/// Initialize the logging system
///
/// Uses env_logger with default filter level of `info`.
/// Override with RUST_LOG environment variable.
///
/// Only binaries should call this; the library only emits through `log`.
///
/// # Example
/// ```
/// ripplet::core::logging::init();
/// log::info!("Water surface ready");
/// ```
pub fn init() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).init();
}

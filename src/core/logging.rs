//! Logging initialization

/// Initialize the logging system
///
/// Uses env_logger with default filter level of `info`.
/// Override with RUST_LOG environment variable.
///
/// # Example
/// ```
/// knoll::core::logging::init();
/// log::info!("Scene started");
/// ```
pub fn init() {
    // Tests and embedding hosts may have installed a logger already
    let _ = builder().try_init();
}

/// Initialize logging with millisecond timestamps, for long-running hosts.
pub fn init_timestamped() {
    let _ = builder().format_timestamp_millis().try_init();
}

fn builder() -> env_logger::Builder {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
}

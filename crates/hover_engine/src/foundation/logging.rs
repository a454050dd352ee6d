//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system from `RUST_LOG`
pub fn init() {
    env_logger::init();
}

/// Initialize logging, falling back to `filter` when `RUST_LOG` is unset.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_with_default_filter(filter: &str) {
    let env = env_logger::Env::default().default_filter_or(filter);
    let _ = env_logger::Builder::from_env(env).try_init();
}

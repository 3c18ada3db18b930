//! # Logging Module
//!
//! Installs [`pretty_env_logger`] behind the [`log`] facade. Every line the program prints
//! (window status, frame rate, shader diagnostics) goes through `log` macros.

use std::sync::Once;

use log::LevelFilter;

static INIT: Once = Once::new();

/// Initializes the global logger. Safe to call more than once; only the first call has effect.
///
/// The filter is taken from `RUST_LOG` when set, otherwise everything at `info` and above is
/// shown so the frame-rate counter is visible by default.
pub fn init() {
    INIT.call_once(|| {
        let mut builder = pretty_env_logger::formatted_builder();

        match std::env::var("RUST_LOG") {
            Ok(filter) => {
                builder.parse_filters(&filter);
            }
            Err(_) => {
                builder.filter_level(LevelFilter::Info);
            }
        }

        // Another logger may already be installed (e.g. by a test harness).
        if builder.try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });
}

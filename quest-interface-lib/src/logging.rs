//! Logger setup.
//!
//! On Android the bridge owns logcat initialization. Everywhere else the
//! embedding application installs whatever `log` backend it wants.

use crate::config::BridgeConfig;
use crate::error::{Error, Result};

#[cfg(target_os = "android")]
pub fn init(config: &BridgeConfig) -> Result<()> {
    let level = config.max_level()?;
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(level)
            .with_tag(config.log_tag.as_str()),
    );
    log::info!("Android logger initialized with {} level", level);
    Ok(())
}

#[cfg(not(target_os = "android"))]
pub fn init(config: &BridgeConfig) -> Result<()> {
    config.max_level()?;
    Ok(())
}

/// Initialize from `config`, or from the defaults if its level is invalid.
/// Returns the reason the defaults were used.
pub fn init_or_default(config: &BridgeConfig) -> Option<Error> {
    match init(config) {
        Ok(()) => None,
        Err(e) => match init(&BridgeConfig::default()) {
            Ok(()) => Some(e),
            Err(fallback) => Some(fallback),
        },
    }
}

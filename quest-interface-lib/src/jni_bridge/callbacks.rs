//! Calls made by the engine into the host shim.

#![allow(non_snake_case)]

use log::warn;

use super::types::current_bridge;

/// Engine: the application finished loading. Callable from any engine thread.
#[no_mangle]
pub extern "C" fn questOnAppLoadedComplete() {
    match current_bridge() {
        Some(bridge) => bridge.on_app_loaded_complete(),
        None => warn!("questOnAppLoadedComplete with no live activity, ignoring"),
    }
}

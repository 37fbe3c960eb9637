#[cfg(test)]
#[macro_use]
mod tests;

pub mod bridge;
pub mod config;
pub mod dispatcher;
pub mod engine;
pub mod error;
pub mod lifecycle;
pub mod logging;

pub use bridge::LifecycleBridge;
pub use config::BridgeConfig;
pub use dispatcher::{ThreadDispatcher, UiAction, UiDispatcher};
pub use engine::VrEngine;
pub use error::{Error, Result};
pub use lifecycle::{LifecycleEvent, LifecycleState};

// JNI bridge for Android
#[cfg(all(feature = "jni-bridge", target_os = "android"))]
pub mod jni_bridge;

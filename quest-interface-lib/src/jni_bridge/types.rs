//! Global state for the JNI bridge.
//!
//! The Java activity owns the bridge's lifetime but cannot hold a Rust value,
//! so the bridge for the live activity instance is parked here between calls.

use std::cell::RefCell;
use std::sync::{Arc, RwLock};

use super::engine::NativeEngine;
use super::looper::{LooperDispatcher, LooperHandler};
use crate::bridge::LifecycleBridge;

pub type QuestBridge = LifecycleBridge<NativeEngine, LooperDispatcher>;

/// Bridge for the current activity instance, if one is between create and destroy.
pub static BRIDGE: RwLock<Option<Arc<QuestBridge>>> = RwLock::new(None);

thread_local! {
    /// Looper registration for the UI thread. Replaced on the next create so
    /// hooks queued right before destroy still get to run.
    pub static UI_LOOPER: RefCell<Option<LooperHandler>> = const { RefCell::new(None) };
}

/// Install the bridge for a newly created activity, returning the previous one.
pub fn install_bridge(bridge: Arc<QuestBridge>) -> Option<Arc<QuestBridge>> {
    match BRIDGE.write() {
        Ok(mut slot) => slot.replace(bridge),
        Err(poisoned) => poisoned.into_inner().replace(bridge),
    }
}

/// Remove the bridge once its activity is destroyed.
pub fn take_bridge() -> Option<Arc<QuestBridge>> {
    match BRIDGE.write() {
        Ok(mut slot) => slot.take(),
        Err(poisoned) => poisoned.into_inner().take(),
    }
}

pub fn current_bridge() -> Option<Arc<QuestBridge>> {
    match BRIDGE.read() {
        Ok(slot) => slot.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

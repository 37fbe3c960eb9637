//! JNI entry points called by `QuestActivity`.
//!
//! The activity invokes each of these on its UI thread right after the
//! matching `super.onXxx()` call. Failures are logged here and never cross
//! back into Java.

use jni::objects::{JByteArray, JObject, JString};
use jni::JNIEnv;
use log::{error, info, warn};
use std::path::Path;
use std::sync::Arc;

use super::engine::NativeEngine;
use super::looper::LooperHandler;
use super::types::{current_bridge, install_bridge, take_bridge, QuestBridge, UI_LOOPER};
use crate::config::BridgeConfig;
use crate::logging;

/// JNI: Activity.onCreate
///
/// Loads the bridge config (`config_path` may be null for defaults), sets up
/// logging and the UI looper on the calling thread, installs a fresh bridge
/// for this activity instance, and forwards create to the engine.
#[no_mangle]
pub extern "C" fn Java_io_highfidelity_questInterface_QuestActivity_nativeOnCreate(
    mut env: JNIEnv,
    _activity: JObject,
    saved_state: JByteArray,
    config_path: JString,
) {
    let path: Result<Option<String>, jni::errors::Error> = if config_path.is_null() {
        Ok(None)
    } else {
        env.get_string(&config_path).map(|s| Some(s.into()))
    };
    let (config, config_err) = match &path {
        Ok(path) => BridgeConfig::load_or_default(path.as_deref().map(Path::new)),
        Err(_) => (BridgeConfig::default(), None),
    };
    if let Some(e) = logging::init_or_default(&config) {
        error!("Falling back to default log settings: {}", e);
    }
    if let Err(e) = path {
        warn!("Failed to read config path: {}", e);
    }
    if let Some(e) = config_err {
        warn!("Using default bridge config: {}", e);
    }
    info!("Bridge config:\n{}", config);

    let saved: Option<Vec<u8>> = if saved_state.is_null() {
        None
    } else {
        match env.convert_byte_array(&saved_state) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                warn!("Ignoring unreadable saved state: {}", e);
                None
            }
        }
    };

    let (handler, dispatcher) = match LooperHandler::attach_to_current_thread() {
        Ok(pair) => pair,
        Err(e) => {
            error!("Failed to attach to the UI looper: {:#}", e);
            return;
        }
    };
    UI_LOOPER.with(|slot| {
        // Dropping the previous handler unregisters its eventfd.
        slot.borrow_mut().replace(handler);
    });

    let bridge: Arc<QuestBridge> = Arc::new(QuestBridge::with_config(
        Arc::new(NativeEngine),
        dispatcher,
        config,
    ));
    if install_bridge(Arc::clone(&bridge)).is_some() {
        warn!("Previous activity was never destroyed, replacing its bridge");
    }

    info!("QuestActivity created");
    if let Err(e) = bridge.on_create(saved.as_deref()) {
        error!("nativeOnCreate: {}", e);
    }
}

/// JNI: Activity.onResume
#[no_mangle]
pub extern "C" fn Java_io_highfidelity_questInterface_QuestActivity_nativeOnResume(
    _env: JNIEnv,
    _activity: JObject,
) {
    let Some(bridge) = current_bridge() else {
        error!("nativeOnResume before nativeOnCreate");
        return;
    };
    if let Err(e) = bridge.on_resume() {
        error!("nativeOnResume: {}", e);
    }
}

/// JNI: Activity.onPause
#[no_mangle]
pub extern "C" fn Java_io_highfidelity_questInterface_QuestActivity_nativeOnPause(
    _env: JNIEnv,
    _activity: JObject,
) {
    let Some(bridge) = current_bridge() else {
        error!("nativeOnPause before nativeOnCreate");
        return;
    };
    if let Err(e) = bridge.on_pause() {
        error!("nativeOnPause: {}", e);
    }
}

/// JNI: Activity.onDestroy
///
/// Forwards destroy, then drops the bridge so a later create starts clean.
/// The UI looper registration stays until then so queued hooks still drain.
#[no_mangle]
pub extern "C" fn Java_io_highfidelity_questInterface_QuestActivity_nativeOnDestroy(
    _env: JNIEnv,
    _activity: JObject,
) {
    let Some(bridge) = current_bridge() else {
        error!("nativeOnDestroy before nativeOnCreate");
        return;
    };
    match bridge.on_destroy() {
        Ok(()) => {
            take_bridge();
            info!("QuestActivity destroyed");
        }
        Err(e) => error!("nativeOnDestroy: {}", e),
    }
}

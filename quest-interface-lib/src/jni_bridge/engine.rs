//! The engine's exported C entry points.

#![allow(non_snake_case)]

use crate::engine::VrEngine;

extern "C" {
    fn questNativeOnCreate();
    fn questNativeOnResume();
    fn questNativeOnPause();
    fn questNativeOnDestroy();
    fn questOnAppAfterLoad();
}

/// `VrEngine` implemented by the native engine library linked into the APK.
#[derive(Debug, Default)]
pub struct NativeEngine;

// SAFETY (all calls below): the entry points are nullary, take no pointers and
// are documented by the engine as callable on the UI thread at these points
// of the lifecycle.
impl VrEngine for NativeEngine {
    fn on_create(&self) {
        unsafe { questNativeOnCreate() }
    }

    fn on_resume(&self) {
        unsafe { questNativeOnResume() }
    }

    fn on_pause(&self) {
        unsafe { questNativeOnPause() }
    }

    fn on_destroy(&self) {
        unsafe { questNativeOnDestroy() }
    }

    fn on_app_after_load(&self) {
        unsafe { questOnAppAfterLoad() }
    }
}

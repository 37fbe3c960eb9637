//! The native VR engine as seen from the bridge.

/// Entry points the engine exposes to the host shim.
///
/// Every call is made on the UI thread and is allowed to block it; the engine
/// bounds how long. None of them report errors.
pub trait VrEngine: Send + Sync + 'static {
    /// May allocate resources. No render surface exists yet.
    fn on_create(&self);
    /// Resume rendering, audio and input.
    fn on_resume(&self);
    /// Stop rendering, release transient resources and flush state.
    fn on_pause(&self);
    /// Terminal teardown.
    fn on_destroy(&self);
    /// Post-load hook, only ever run from the UI dispatcher queue.
    fn on_app_after_load(&self);
}

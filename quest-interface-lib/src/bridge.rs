//! Lifecycle bridge between the host activity and the VR engine.
//!
//! The host calls `on_create`, `on_resume`, `on_pause` and `on_destroy` on its
//! UI thread. Each call is checked against the current state and then
//! forwarded synchronously to the engine. The engine calls
//! `on_app_loaded_complete` from any thread to have its post-load hook run on
//! the UI thread.

use log::{debug, error, info, warn};
use std::sync::Arc;

use crate::config::BridgeConfig;
use crate::dispatcher::UiDispatcher;
use crate::engine::VrEngine;
use crate::error::{Error, Result};
use crate::lifecycle::{LifecycleEvent, LifecycleState, StateCell};

pub struct LifecycleBridge<E: VrEngine, D: UiDispatcher> {
    engine: Arc<E>,
    dispatcher: D,
    state: Arc<StateCell>,
    config: BridgeConfig,
}

impl<E: VrEngine, D: UiDispatcher> LifecycleBridge<E, D> {
    pub fn new(engine: Arc<E>, dispatcher: D) -> Self {
        Self::with_config(engine, dispatcher, BridgeConfig::default())
    }

    pub fn with_config(engine: Arc<E>, dispatcher: D, config: BridgeConfig) -> Self {
        Self {
            engine,
            dispatcher,
            state: Arc::new(StateCell::new()),
            config,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state.get()
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// The host has finished its own create handling. `saved_state` is opaque.
    pub fn on_create(&self, saved_state: Option<&[u8]>) -> Result<()> {
        debug!(
            "Saved instance state: {}",
            saved_state.map_or("none".to_string(), |s| format!("{} bytes", s.len()))
        );
        self.forward(LifecycleEvent::Create, |engine| engine.on_create())
    }

    pub fn on_resume(&self) -> Result<()> {
        self.forward(LifecycleEvent::Resume, |engine| engine.on_resume())
    }

    pub fn on_pause(&self) -> Result<()> {
        self.forward(LifecycleEvent::Pause, |engine| engine.on_pause())
    }

    /// The host has finished its own destroy handling.
    pub fn on_destroy(&self) -> Result<()> {
        self.forward(LifecycleEvent::Destroy, |engine| engine.on_destroy())
    }

    /// Called by the engine, from any thread, once its load has finished.
    ///
    /// Posts exactly one `on_app_after_load` to the UI thread. The hook is never
    /// run inline, even when the caller is already on the UI thread.
    pub fn on_app_loaded_complete(&self) {
        warn!(target: self.config.log_tag.as_str(), "Load Completed");

        if self.state().is_destroyed() {
            debug!("Post-load hook requested after destroy");
        }

        let engine = Arc::clone(&self.engine);
        let state = Arc::clone(&self.state);
        let drop_after_destroy = self.config.drop_posts_after_destroy;
        let posted = self.dispatcher.post(Box::new(move || {
            if drop_after_destroy && state.get().is_destroyed() {
                info!("Dropping post-load hook queued before destroy");
                return;
            }
            engine.on_app_after_load();
        }));
        if let Err(e) = posted {
            error!("Failed to post questOnAppAfterLoad: {}", e);
        }
    }

    fn forward<F>(&self, event: LifecycleEvent, notify: F) -> Result<()>
    where
        F: FnOnce(&E),
    {
        if !self.dispatcher.is_ui_thread() {
            error!("Refusing {} delivered off the UI thread", event);
            return Err(Error::NotOnUiThread { event });
        }

        let from = self.state.get();
        let next = match from.apply(event) {
            Ok(next) => next,
            Err(e) => {
                warn!("Refusing out-of-order lifecycle event: {}", e);
                return Err(e);
            }
        };

        // Publish the new state before notifying so a hook posted from inside
        // the engine call observes it.
        self.state.set(next);
        debug!("{} -> {}, calling {}", from, next, event.entry_point());
        notify(self.engine.as_ref());
        Ok(())
    }
}

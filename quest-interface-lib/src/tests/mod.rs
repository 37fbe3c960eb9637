use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, ThreadId};

use crate::bridge::LifecycleBridge;
use crate::config::BridgeConfig;
use crate::dispatcher::ThreadDispatcher;
use crate::engine::VrEngine;

/// Asserts the kinds of calls the engine has seen, in order.
macro_rules! assert_calls {
    ($engine:expr, [$($kind:ident),* $(,)?]) => {
        assert_eq!(
            $engine.kinds(),
            vec![$($crate::tests::CallKind::$kind),*],
        );
    };
}

mod config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Create,
    Resume,
    Pause,
    Destroy,
    AfterLoad,
}

#[derive(Debug, Clone)]
pub struct Call {
    pub kind: CallKind,
    pub thread: ThreadId,
    /// Whether another engine call was still on the stack when this one began.
    pub nested: bool,
}

type Hook = Box<dyn Fn() + Send + Sync>;

/// Engine double that records every call with the thread it ran on.
#[derive(Default)]
pub struct MockEngine {
    calls: Mutex<Vec<Call>>,
    depth: AtomicUsize,
    on_resume_hook: Mutex<Option<Hook>>,
    on_after_load_hook: Mutex<Option<Hook>>,
}

impl MockEngine {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn kinds(&self) -> Vec<CallKind> {
        self.calls().into_iter().map(|c| c.kind).collect()
    }

    pub fn count(&self, kind: CallKind) -> usize {
        self.calls().iter().filter(|c| c.kind == kind).count()
    }

    /// Runs inside `on_resume`, after the call is recorded.
    pub fn set_on_resume_hook<F: Fn() + Send + Sync + 'static>(&self, hook: F) {
        *self.on_resume_hook.lock().unwrap() = Some(Box::new(hook));
    }

    /// Runs inside `on_app_after_load`, after the call is recorded.
    pub fn set_on_after_load_hook<F: Fn() + Send + Sync + 'static>(&self, hook: F) {
        *self.on_after_load_hook.lock().unwrap() = Some(Box::new(hook));
    }

    fn record(&self, kind: CallKind, hook: Option<&Mutex<Option<Hook>>>) {
        let nested = self.depth.fetch_add(1, Ordering::SeqCst) > 0;
        self.calls.lock().unwrap().push(Call {
            kind,
            thread: thread::current().id(),
            nested,
        });
        if let Some(hook) = hook {
            if let Some(hook) = hook.lock().unwrap().as_ref() {
                hook();
            }
        }
        self.depth.fetch_sub(1, Ordering::SeqCst);
    }
}

impl VrEngine for MockEngine {
    fn on_create(&self) {
        self.record(CallKind::Create, None);
    }

    fn on_resume(&self) {
        self.record(CallKind::Resume, Some(&self.on_resume_hook));
    }

    fn on_pause(&self) {
        self.record(CallKind::Pause, None);
    }

    fn on_destroy(&self) {
        self.record(CallKind::Destroy, None);
    }

    fn on_app_after_load(&self) {
        self.record(CallKind::AfterLoad, Some(&self.on_after_load_hook));
    }
}

pub type TestBridge = LifecycleBridge<MockEngine, ThreadDispatcher>;

pub fn init_logger() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}

pub fn new_bridge() -> (Arc<TestBridge>, Arc<MockEngine>) {
    new_bridge_with_config(BridgeConfig::default())
}

pub fn new_bridge_with_config(config: BridgeConfig) -> (Arc<TestBridge>, Arc<MockEngine>) {
    init_logger();
    let engine = Arc::new(MockEngine::default());
    let dispatcher = ThreadDispatcher::spawn(&config.ui_thread_name).unwrap();
    let bridge = Arc::new(LifecycleBridge::with_config(
        Arc::clone(&engine),
        dispatcher,
        config,
    ));
    (bridge, engine)
}

/// Host side of the tests: delivers a lifecycle event on the UI thread.
pub fn on_ui<F, R>(bridge: &Arc<TestBridge>, f: F) -> R
where
    F: FnOnce(&TestBridge) -> R + Send + 'static,
    R: Send + 'static,
{
    let b = Arc::clone(bridge);
    bridge.dispatcher().run_sync(move || f(&*b)).unwrap()
}

pub fn assert_all_on_ui_thread(bridge: &TestBridge, engine: &MockEngine) {
    let ui = bridge.dispatcher().ui_thread_id();
    for call in engine.calls() {
        assert_eq!(call.thread, ui, "{:?} ran off the UI thread", call.kind);
    }
}

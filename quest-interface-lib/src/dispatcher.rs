//! Posting work onto the UI thread.

use log::{debug, error, warn};
use std::sync::mpsc::{self, channel};
use std::sync::Mutex;
use std::thread::{self, JoinHandle, ThreadId};

use crate::error::{Error, Result};

/// A unit of work for the UI thread.
pub type UiAction = Box<dyn FnOnce() + Send + 'static>;

/// Runs actions on the host's designated UI thread.
pub trait UiDispatcher: Send + Sync {
    /// Enqueue `action`. It runs on the UI thread at some point after this call
    /// returns, after every action posted before it. Callable from any thread,
    /// including the UI thread itself.
    fn post(&self, action: UiAction) -> Result<()>;

    /// Whether the caller is running on the UI thread.
    fn is_ui_thread(&self) -> bool;
}

/// Queue `action` on `tx`, then `wake` the UI thread so it drains the queue.
///
/// Once the send succeeds the action is queued and will run on the next wake,
/// so a failed wake is logged rather than reported as a failed post.
pub fn enqueue_and_wake<W>(
    tx: &Mutex<mpsc::Sender<UiAction>>,
    action: UiAction,
    wake: W,
) -> Result<()>
where
    W: FnOnce() -> anyhow::Result<()>,
{
    {
        let tx = tx.lock().map_err(Error::runtime)?;
        tx.send(action).map_err(|_| Error::DispatcherClosed)?;
    }
    if let Err(e) = wake() {
        warn!("Action queued but UI thread wake failed: {:#}", e);
    }
    Ok(())
}

/// A dispatcher that owns its UI thread.
///
/// The thread drains a FIFO queue until the dispatcher is shut down. Used
/// wherever no host looper exists, tests included.
pub struct ThreadDispatcher {
    tx: Mutex<Option<mpsc::Sender<UiAction>>>,
    thread: Mutex<Option<JoinHandle<()>>>,
    ui_thread: ThreadId,
}

impl ThreadDispatcher {
    pub fn spawn(name: &str) -> Result<Self> {
        let (tx, rx) = channel::<UiAction>();
        let thread = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                debug!("UI thread {:?} started", thread::current().id());
                while let Ok(action) = rx.recv() {
                    action();
                }
                debug!("UI thread {:?} drained and exiting", thread::current().id());
            })
            .map_err(Error::runtime)?;
        let ui_thread = thread.thread().id();
        Ok(Self {
            tx: Mutex::new(Some(tx)),
            thread: Mutex::new(Some(thread)),
            ui_thread,
        })
    }

    pub fn ui_thread_id(&self) -> ThreadId {
        self.ui_thread
    }

    /// Run `f` on the UI thread and wait for its result.
    pub fn run_sync<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        if self.is_ui_thread() {
            return Err(Error::WouldDeadlock);
        }
        let (done_tx, done_rx) = channel();
        self.post(Box::new(move || {
            let _ = done_tx.send(f());
        }))?;
        // A panicking action drops `done_tx` without sending.
        done_rx
            .recv()
            .map_err(|_| Error::runtime("UI action did not complete"))
    }

    /// Wait until every action posted before this call has run.
    pub fn flush(&self) -> Result<()> {
        self.run_sync(|| ())
    }

    /// Stop accepting actions, let the queue drain, and join the UI thread.
    pub fn shutdown(&self) -> Result<()> {
        if self.is_ui_thread() {
            return Err(Error::WouldDeadlock);
        }
        let tx = self.tx.lock().map_err(Error::runtime)?.take();
        drop(tx);
        let thread = self.thread.lock().map_err(Error::runtime)?.take();
        if let Some(thread) = thread {
            thread
                .join()
                .map_err(|_| Error::runtime("UI thread panicked"))?;
        }
        Ok(())
    }
}

impl UiDispatcher for ThreadDispatcher {
    fn post(&self, action: UiAction) -> Result<()> {
        let guard = self.tx.lock().map_err(Error::runtime)?;
        let tx = guard.as_ref().ok_or(Error::DispatcherClosed)?;
        tx.send(action).map_err(|_| Error::DispatcherClosed)
    }

    fn is_ui_thread(&self) -> bool {
        thread::current().id() == self.ui_thread
    }
}

impl Drop for ThreadDispatcher {
    fn drop(&mut self) {
        if self.is_ui_thread() {
            // Dropped by one of its own actions; the thread exits once the
            // sender below is gone.
            return;
        }
        if let Err(e) = self.shutdown() {
            error!("Failed to shut down UI dispatcher: {}", e);
        }
    }
}

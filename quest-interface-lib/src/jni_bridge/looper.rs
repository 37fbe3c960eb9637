//! UI-thread dispatcher backed by the Android main looper.
//!
//! `LooperHandler::attach_to_current_thread` registers an eventfd with the
//! calling thread's `ALooper`. Posting pushes the action into an mpsc queue and
//! bumps the eventfd; the looper then runs `poll_callback` on its own thread,
//! which drains the queue in order.

use anyhow::{bail, Context, Result};
use libc::{c_int, c_void};
use log::{error, info};
use ndk_sys::{ALooper, ALooper_addFd, ALooper_prepare, ALooper_removeFd};
use std::{
    os::fd::{AsRawFd, FromRawFd, OwnedFd, RawFd},
    sync::{
        mpsc::{self, channel, TryRecvError},
        Mutex,
    },
    thread::{self, ThreadId},
};

use crate::dispatcher::{enqueue_and_wake, UiAction, UiDispatcher};

const ALOOPER_CALLBACK_FUNC_RETURN_VALUE_CONTINUE: c_int = 1;

macro_rules! retry_eintr {
    ($libc_call:expr) => {
        loop {
            match $libc_call {
                -1 => {
                    let e = std::io::Error::last_os_error();
                    match e.raw_os_error() {
                        Some(libc::EINTR) => continue,
                        _ => break Err(e),
                    }
                }
                result => {
                    break Ok(result);
                }
            }
        }
    };
}

/// Sending half, safe to share across threads.
pub struct LooperDispatcher {
    tx: Mutex<mpsc::Sender<UiAction>>,
    waker_fd: OwnedFd,
    ui_thread: ThreadId,
}

impl LooperDispatcher {
    fn wake(&self) -> Result<()> {
        let res = retry_eintr!(
            // SAFETY: `self.waker_fd` is a valid eventfd.
            unsafe { libc::eventfd_write(self.waker_fd.as_raw_fd(), 1) }
        );
        if let Err(e) = res {
            bail!("Failed to write to the waker fd: {}", e);
        }
        Ok(())
    }
}

impl UiDispatcher for LooperDispatcher {
    fn post(&self, action: UiAction) -> crate::error::Result<()> {
        enqueue_and_wake(&self.tx, action, || self.wake())
    }

    fn is_ui_thread(&self) -> bool {
        thread::current().id() == self.ui_thread
    }
}

struct HandlerInner {
    event_fd: OwnedFd,
    rx: mpsc::Receiver<UiAction>,
}

impl HandlerInner {
    fn run_pending(&mut self) {
        loop {
            match self.rx.try_recv() {
                Ok(action) => action(),
                // Disconnected only means the dispatcher is gone; anything it
                // queued has been run by now.
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return,
            }
        }
    }
}

/// Receiving half. Lives on the UI thread for as long as actions may be posted.
pub struct LooperHandler {
    // This makes LooperHandler !Send.
    looper: *mut ALooper,
    // Boxed so the pointer handed to the looper stays valid while registered.
    inner: Box<HandlerInner>,
}

impl LooperHandler {
    /// Attach to the calling thread's looper, which becomes the UI thread.
    pub fn attach_to_current_thread() -> Result<(Self, LooperDispatcher)> {
        // SAFETY: 0 is a valid argument.
        let looper = unsafe { ALooper_prepare(0) };
        if looper.is_null() {
            bail!("ALooper_prepare returned null");
        }

        // SAFETY: Passing valid arguments.
        let fd: RawFd = unsafe { libc::eventfd(0, libc::EFD_CLOEXEC | libc::EFD_NONBLOCK) };
        if fd == -1 {
            bail!("Failed to create an eventfd");
        }
        // SAFETY: `fd` is a valid owned fd.
        let event_fd = unsafe { OwnedFd::from_raw_fd(fd) };
        let waker_fd = event_fd.try_clone().context("Failed to clone the eventfd")?;

        let (tx, rx) = channel::<UiAction>();
        let mut inner = Box::new(HandlerInner { event_fd, rx });
        let inner_ptr = &mut *inner as *mut HandlerInner as *mut c_void;

        // SAFETY: `looper` is valid, and `inner_ptr` outlives the registration
        // because `Drop` removes the fd before `inner` is freed.
        let ret = unsafe {
            ALooper_addFd(
                looper,
                inner.event_fd.as_raw_fd(),
                ndk_sys::ALOOPER_POLL_CALLBACK as c_int,
                ndk_sys::ALOOPER_EVENT_INPUT as c_int,
                Some(Self::poll_callback),
                inner_ptr,
            )
        };
        if ret == -1 {
            bail!("ALooper_addFd failed");
        }

        let ui_thread = thread::current().id();
        info!("UI looper handler attached on thread {:?}", ui_thread);

        let dispatcher = LooperDispatcher { tx: Mutex::new(tx), waker_fd, ui_thread };
        Ok((Self { looper, inner }, dispatcher))
    }

    /// Registered with `ALooper_addFd`. Errors here cannot be reported to the
    /// looper, so they are logged and the handler stays registered.
    ///
    /// # Safety
    ///
    /// `data` must point to the `HandlerInner` owned by a live `LooperHandler`.
    unsafe extern "C" fn poll_callback(fd: c_int, _events: c_int, data: *mut c_void) -> c_int {
        // SAFETY: guaranteed by the registration in `attach_to_current_thread`.
        let inner = match unsafe { (data as *mut HandlerInner).as_mut() } {
            Some(inner) => inner,
            None => return 0,
        };
        if fd != inner.event_fd.as_raw_fd() {
            error!("Looper callback fired for unexpected fd {}", fd);
            return ALOOPER_CALLBACK_FUNC_RETURN_VALUE_CONTINUE;
        }

        let mut val: libc::eventfd_t = 0;
        let res = retry_eintr!(
            // SAFETY: `inner.event_fd` is a valid eventfd and `val` is a valid target.
            unsafe { libc::eventfd_read(inner.event_fd.as_raw_fd(), &mut val) }
        );
        if let Err(e) = res {
            // EAGAIN: a previous callback already drained the counter.
            if e.raw_os_error() != Some(libc::EAGAIN) {
                error!("Failed to read from the event fd: {}", e);
            }
        }

        inner.run_pending();
        ALOOPER_CALLBACK_FUNC_RETURN_VALUE_CONTINUE
    }
}

impl Drop for LooperHandler {
    fn drop(&mut self) {
        // SAFETY: `self.looper` is a valid ALooper pointer.
        let ret = unsafe { ALooper_removeFd(self.looper, self.inner.event_fd.as_raw_fd()) };
        if ret != 1 {
            error!("Failed to remove the event fd");
        }
    }
}

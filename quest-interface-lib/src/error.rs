use std::{fmt, result};

use thiserror::Error;

use crate::lifecycle::{LifecycleEvent, LifecycleState};

#[derive(Error, Debug)]
pub enum Error {
    #[error("lifecycle event {event} is not valid in state {from}")]
    InvalidTransition {
        from: LifecycleState,
        event: LifecycleEvent,
    },
    #[error("lifecycle event {event} delivered off the UI thread")]
    NotOnUiThread { event: LifecycleEvent },
    #[error("ui dispatcher is closed")]
    DispatcherClosed,
    #[error("waiting on the UI thread from the UI thread would deadlock")]
    WouldDeadlock,
    #[error("config error: {0}")]
    Config(String),
    #[error("runtime error: {0}")]
    Runtime(String),
}

pub type Result<T> = result::Result<T, Error>;

impl Error {
    pub fn config<T: fmt::Display>(inner: T) -> Self {
        Self::Config(inner.to_string())
    }
    pub fn runtime<T: fmt::Display>(inner: T) -> Self {
        Self::Runtime(inner.to_string())
    }
}

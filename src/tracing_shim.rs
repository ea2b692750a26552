//! `tracing` macros, or stand-ins that expand to nothing when the `tracing` feature is off.
//!
//! Import logging macros from here rather than from `tracing` so call sites need no `#[cfg]`.
//! `#[instrument]` is the exception and is written as
//! `#[cfg_attr(feature = "tracing", tracing::instrument)]`.
//!
//! Only what the crate uses is provided.

#![allow(unused_imports, unused_macros)]

#[cfg(feature = "tracing")]
pub(crate) use tracing::{debug, error, trace, warn};

#[cfg(not(feature = "tracing"))]
macro_rules! event {
    ($($x:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub(crate) use {event as debug, event as error, event as trace, event as warn};

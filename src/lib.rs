//! A pass-through WebAssembly shim over host-provided global state.
//!
//! Built for `wasm32`, this crate is a module that exports `set_global_state` and
//! `get_global_state` and imports `set_state` and `get_state` from the `env` module. Every exported
//! call is forwarded to its import unchanged.
//!
//! Built for any other target, the crate also supplies `set_state` and `get_state` itself (see
//! [`host`]), so that the shim can be linked and driven natively against a [`store::StateStore`].

pub mod error;
pub mod ffi;
#[cfg(not(target_arch = "wasm32"))]
pub mod host;
mod location;
pub mod state;
pub mod store;
mod tracing_shim;

pub use self::error::Error;
pub use self::location::Location;
pub use self::state::{GlobalState, Lookup, StateBuffer};

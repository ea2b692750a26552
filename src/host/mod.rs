//! Native definitions of the host primitives.
//!
//! Outside of `wasm32` nothing imports `set_state` and `get_state` for the shim, so this module
//! defines them. Each thread may [`install`] one [`StateHost`], and calls on that thread are
//! dispatched to it. With [`record_calls`] on, every raw call is also logged as a [`HostCall`] so
//! that callers can check exactly what crossed the ABI.
//!
//! Failures inside the primitives are logged and turned into a no-op (`set_state`) or a null
//! pointer (`get_state`). Nothing unwinds across the ABI.

mod arena;
mod store_host;

pub use self::store_host::StoreHost;

use self::arena::Arena;
use crate::tracing_shim::{error, trace, warn};
use crate::Error;
use core::ffi::{c_int, c_uchar};
use std::cell::RefCell;
use std::marker::PhantomData;
use std::{ptr, slice};

/// The host side of the state primitives.
pub trait StateHost {
    /// Stores a copy of `value` under `key`.
    fn set_state(&mut self, key: &[u8], value: &[u8]);

    /// Returns a copy of the value stored under `key`, if any.
    fn get_state(&mut self, key: &[u8]) -> Option<Vec<u8>>;
}

/// A call to one of the primitives, with the arguments exactly as they were received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCall {
    /// A call to `set_state`.
    SetState {
        /// Start of the key buffer.
        key: *mut c_uchar,
        /// Length of the key buffer.
        key_size: c_int,
        /// Start of the value buffer.
        val: *mut c_uchar,
        /// Length of the value buffer.
        val_size: c_int,
    },
    /// A call to `get_state`, along with the pointer it returned.
    GetState {
        /// Start of the key buffer.
        key: *mut c_uchar,
        /// Length of the key buffer.
        key_size: c_int,
        /// The returned buffer, or null.
        result: *mut c_uchar,
    },
}

#[derive(Default)]
struct Registry {
    host: Option<Box<dyn StateHost>>,
    arena: Arena,
    recording: bool,
    calls: Vec<HostCall>,
}

impl Registry {
    fn record(&mut self, call: HostCall) {
        if self.recording {
            self.calls.push(call);
        }
    }
}

thread_local! {
    static REGISTRY: RefCell<Registry> = RefCell::new(Registry::default());
}

/// Runs `f` on this thread's registry. `None` if the registry is being torn down or is already
/// borrowed, which happens when a host calls back into the primitives.
fn with_registry<T>(f: impl FnOnce(&mut Registry) -> T) -> Option<T> {
    REGISTRY
        .try_with(|registry| {
            registry
                .try_borrow_mut()
                .ok()
                .map(|mut registry| f(&mut registry))
        })
        .ok()
        .flatten()
}

/// Rebuilds a slice from raw ABI arguments. `None` if the length is negative or the pointer is
/// null while the length is not zero.
///
/// # Safety
///
/// If the arguments pass the checks above, `ptr` must be readable for `len` bytes for `'a`.
unsafe fn raw_slice<'a>(ptr: *const c_uchar, len: c_int) -> Option<&'a [u8]> {
    let len = usize::try_from(len).ok()?;
    if len == 0 {
        return Some(&[]);
    }
    if ptr.is_null() {
        return None;
    }
    // SAFETY: non-null, and the caller guarantees `len` readable bytes.
    Some(unsafe { slice::from_raw_parts(ptr, len) })
}

/// Keeps a host installed on the current thread. Dropping it uninstalls the host and frees every
/// buffer the host handed out.
#[derive(Debug)]
#[must_use = "the host is uninstalled as soon as the guard is dropped"]
pub struct HostGuard {
    // The registry is thread-local.
    _not_send: PhantomData<*const ()>,
}

impl Drop for HostGuard {
    fn drop(&mut self) {
        let uninstalled = with_registry(|registry| {
            registry.host = None;
            registry.arena.clear();
            registry.recording = false;
            registry.calls.clear();
        });
        if uninstalled.is_none() {
            warn!("state host registry unavailable while uninstalling");
        }
    }
}

/// Installs `host` as the target of `set_state` and `get_state` on the current thread.
///
/// The host starts with no buffers and an empty call log.
pub fn install(host: impl StateHost + 'static) -> Result<HostGuard, Error> {
    with_registry(|registry| {
        if registry.host.is_some() {
            return Err(Error::HostAlreadyInstalled);
        }
        registry.arena.clear();
        registry.calls.clear();
        registry.host = Some(Box::new(host));
        Ok(())
    })
    .unwrap_or(Err(Error::HostAlreadyInstalled))?;

    Ok(HostGuard {
        _not_send: PhantomData,
    })
}

/// Whether a host is installed on the current thread.
pub fn is_installed() -> bool {
    with_registry(|registry| registry.host.is_some()).unwrap_or(false)
}

/// Turns the call log of the current thread on or off. Off by default, and reset when the host is
/// uninstalled.
pub fn record_calls(on: bool) {
    let _set = with_registry(|registry| registry.recording = on);
}

/// The calls recorded on the current thread since the host was installed, or since the last
/// [`take_calls`] or [`release_buffers`].
pub fn calls() -> Vec<HostCall> {
    with_registry(|registry| registry.calls.clone()).unwrap_or_default()
}

/// Like [`calls`], but also clears the log.
pub fn take_calls() -> Vec<HostCall> {
    with_registry(|registry| std::mem::take(&mut registry.calls)).unwrap_or_default()
}

/// A copy of the buffer `get_state` returned at `ptr`, if it is still alive.
pub fn buffer(ptr: *const u8) -> Option<Vec<u8>> {
    with_registry(|registry| registry.arena.get(ptr).map(<[u8]>::to_vec)).flatten()
}

/// Removes the buffer `get_state` returned at `ptr` and gives back its contents.
pub(crate) fn take_buffer(ptr: *const u8) -> Option<Vec<u8>> {
    with_registry(|registry| registry.arena.take(ptr)).flatten()
}

/// Frees every buffer handed out on the current thread and clears the call log. Pointers
/// previously returned by `get_state` dangle afterwards.
#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
pub fn release_buffers() {
    let released = with_registry(|registry| {
        let count = registry.arena.len();
        registry.arena.clear();
        registry.calls.clear();
        count
    });
    trace!(?released, "released state buffers");
}

/// Native definition of the `set_state` primitive.
///
/// # Safety
///
/// If `key_size` and `val_size` are non-negative and the matching pointers non-null, `key` and
/// `val` must be readable for that many bytes.
#[no_mangle]
pub unsafe extern "C" fn set_state(
    key: *mut c_uchar,
    key_size: c_int,
    val: *mut c_uchar,
    val_size: c_int,
) {
    let call = HostCall::SetState {
        key,
        key_size,
        val,
        val_size,
    };
    // SAFETY: the caller guarantees readable buffers for arguments that pass validation.
    let buffers = unsafe { (raw_slice(key, key_size), raw_slice(val, val_size)) };

    let dispatched = with_registry(|registry| {
        registry.record(call);
        let (Some(key), Some(value)) = buffers else {
            error!(key_size, val_size, "set_state received an invalid buffer");
            return;
        };
        match registry.host.as_mut() {
            Some(host) => host.set_state(key, value),
            None => {
                warn!("set_state called with no host installed");
            }
        }
    });
    if dispatched.is_none() {
        error!("state host registry unavailable in set_state");
    }
}

/// Native definition of the `get_state` primitive.
///
/// The returned buffer is owned by the registry and stays valid until the host is uninstalled or
/// [`release_buffers`] is called. Null means no value, or a failure that has been logged.
///
/// # Safety
///
/// If `key_size` is non-negative and `key` non-null, `key` must be readable for `key_size` bytes.
#[no_mangle]
pub unsafe extern "C" fn get_state(key: *mut c_uchar, key_size: c_int) -> *mut c_uchar {
    // SAFETY: the caller guarantees a readable buffer for arguments that pass validation.
    let key_buffer = unsafe { raw_slice(key, key_size) };

    let result = with_registry(|registry| {
        let result = match (key_buffer, registry.host.as_mut()) {
            (None, _) => {
                error!(key_size, "get_state received an invalid key buffer");
                ptr::null_mut()
            }
            (Some(_), None) => {
                warn!("get_state called with no host installed");
                ptr::null_mut()
            }
            (Some(key), Some(host)) => match host.get_state(key) {
                Some(value) => registry.arena.alloc(value),
                None => ptr::null_mut(),
            },
        };
        registry.record(HostCall::GetState {
            key,
            key_size,
            result,
        });
        result
    });

    result.unwrap_or_else(|| {
        error!("state host registry unavailable in get_state");
        ptr::null_mut()
    })
}

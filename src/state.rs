//! A safe handle over the exported shim.
//!
//! Buffer ownership:
//!
//! - Keys and values passed in stay owned by the caller. The host copies whatever it keeps.
//! - A buffer returned by a lookup is allocated by the host and belongs to it. The guest never
//!   frees it and must not write to it.
//! - A missing key is reported as a null pointer, i.e. [`Lookup::Missing`]. An empty value is a
//!   non-null pointer to a zero-length allocation.

use crate::{ffi, Error};
use core::ffi::c_int;
use std::ptr::NonNull;

/// Converts a buffer length to the C `int` the ABI carries.
fn c_len(len: usize) -> Result<c_int, Error> {
    c_int::try_from(len).map_err(|_| Error::LengthOverflow { len })
}

/// Access to the global state of the linked host.
#[derive(Debug, Default, Clone, Copy)]
pub struct GlobalState;

impl GlobalState {
    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// Nothing reaches the host if either length does not fit in a C `int`.
    pub fn set(self, key: &[u8], value: &[u8]) -> Result<(), Error> {
        let key_size = c_len(key.len())?;
        let val_size = c_len(value.len())?;
        // SAFETY: both slices are valid for their lengths until the call returns. The host only
        // reads through the pointers.
        unsafe {
            ffi::set_global_state(
                key.as_ptr().cast_mut(),
                key_size,
                value.as_ptr().cast_mut(),
                val_size,
            );
        }
        Ok(())
    }

    /// Looks up the value stored under `key`.
    pub fn lookup(self, key: &[u8]) -> Result<Lookup, Error> {
        let key_size = c_len(key.len())?;
        // SAFETY: `key` is valid for `key_size` bytes until the call returns. The host only reads
        // through the pointer.
        let ptr = unsafe { ffi::get_global_state(key.as_ptr().cast_mut(), key_size) };
        Ok(NonNull::new(ptr).map_or(Lookup::Missing, |ptr| Lookup::Found(StateBuffer { ptr })))
    }

    /// Reads the value stored under `key`.
    ///
    /// The value length is taken from the native host's record of the buffer it returned. The
    /// buffer never leaves this call, so it is freed once copied.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn get(self, key: &[u8]) -> Result<Option<Vec<u8>>, Error> {
        match self.lookup(key)? {
            Lookup::Missing => Ok(None),
            Lookup::Found(buffer) => crate::host::take_buffer(buffer.as_ptr())
                .map(Some)
                .ok_or(Error::UnknownBuffer),
        }
    }
}

/// The outcome of [`GlobalState::lookup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// The host returned a buffer.
    Found(StateBuffer),
    /// The host returned null: there is no value for the key.
    Missing,
}

impl Lookup {
    /// Whether the host returned a buffer.
    pub const fn is_found(self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// The returned buffer, if any.
    pub const fn buffer(self) -> Option<StateBuffer> {
        match self {
            Self::Found(buffer) => Some(buffer),
            Self::Missing => None,
        }
    }
}

/// A host-owned buffer holding a value.
///
/// The ABI does not carry the value length, so reading requires the caller to know it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateBuffer {
    ptr: NonNull<u8>,
}

impl StateBuffer {
    /// The pointer exactly as the host returned it.
    pub const fn as_ptr(self) -> *mut u8 {
        self.ptr.as_ptr()
    }

    /// Copies the first `len` bytes of the buffer.
    ///
    /// # Safety
    ///
    /// The host allocation must be at least `len` bytes long and still alive.
    pub unsafe fn read(self, len: usize) -> Vec<u8> {
        // SAFETY: the caller guarantees `len` readable bytes at `ptr`.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), len) }.to_vec()
    }
}

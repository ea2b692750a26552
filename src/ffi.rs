//! The C ABI of the state shim.
//!
//! ```c
//! unsigned char *get_state(unsigned char *key, int key_size);
//! void set_state(unsigned char *key, int key_size, unsigned char *val, int val_size);
//! void set_global_state(unsigned char *key, int key_size, unsigned char *val, int val_size);
//! unsigned char *get_global_state(unsigned char *key, int key_size);
//! ```
//!
//! The first two are host primitives. On `wasm32` they are imported from [`IMPORT_MODULE`]; on
//! other targets the linker resolves them to the definitions in [`crate::host`]. The last two are
//! exported unmangled and do nothing but forward to the primitives.

use core::ffi::{c_int, c_uchar};

/// The import module the host primitives are resolved from.
pub const IMPORT_MODULE: &str = "env";

/// Names of the host primitives the module imports.
pub const IMPORTS: [&str; 2] = ["get_state", "set_state"];

/// Names of the functions the module exports.
pub const EXPORTS: [&str; 2] = ["set_global_state", "get_global_state"];

#[cfg_attr(target_arch = "wasm32", link(wasm_import_module = "env"))]
extern "C" {
    /// Host primitive: reads the value stored under `key`.
    ///
    /// The returned buffer belongs to the host. A null pointer means there is no value.
    pub fn get_state(key: *mut c_uchar, key_size: c_int) -> *mut c_uchar;

    /// Host primitive: stores `val` under `key`, replacing any previous value.
    pub fn set_state(key: *mut c_uchar, key_size: c_int, val: *mut c_uchar, val_size: c_int);
}

/// Stores `val` under `key` by handing all four arguments to [`set_state`].
///
/// # Safety
///
/// Nothing is checked here. The arguments must satisfy the linked host: `key` and `val` must be
/// readable for `key_size` and `val_size` bytes for the duration of the call.
#[no_mangle]
pub unsafe extern "C" fn set_global_state(
    key: *mut c_uchar,
    key_size: c_int,
    val: *mut c_uchar,
    val_size: c_int,
) {
    // SAFETY: forwarded verbatim, the caller upholds the host's contract.
    unsafe { set_state(key, key_size, val, val_size) }
}

/// Reads the value stored under `key` by handing both arguments to [`get_state`] and returning its
/// result untouched.
///
/// # Safety
///
/// Nothing is checked here. `key` must be readable for `key_size` bytes for the duration of the
/// call.
#[no_mangle]
pub unsafe extern "C" fn get_global_state(key: *mut c_uchar, key_size: c_int) -> *mut c_uchar {
    // SAFETY: forwarded verbatim, the caller upholds the host's contract.
    unsafe { get_state(key, key_size) }
}

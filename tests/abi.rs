//! Calls the four C symbols by their unmangled names, so a renamed or mangled symbol fails to link.

mod helpers;

use anyhow::Result;
use core::ffi::{c_int, c_uchar};
use global_state::ffi::{EXPORTS, IMPORTS};
use global_state::host::{self, HostCall};
use helpers::RecordingHost;

extern "C" {
    fn set_global_state(key: *mut c_uchar, key_size: c_int, val: *mut c_uchar, val_size: c_int);
    fn get_global_state(key: *mut c_uchar, key_size: c_int) -> *mut c_uchar;
    fn set_state(key: *mut c_uchar, key_size: c_int, val: *mut c_uchar, val_size: c_int);
    fn get_state(key: *mut c_uchar, key_size: c_int) -> *mut c_uchar;
}

#[test]
fn test_symbol_names() {
    assert_eq!(EXPORTS, ["set_global_state", "get_global_state"]);
    assert_eq!(IMPORTS, ["get_state", "set_state"]);
}

#[test]
fn test_exports_by_name() -> Result<()> {
    let (recording, _seen) = RecordingHost::new();
    let _guard = host::install(recording)?;
    host::record_calls(true);

    let mut key = *b"Hello";
    let mut value = *b"World";
    // SAFETY: both buffers are readable for their full length.
    let result = unsafe {
        set_global_state(key.as_mut_ptr(), 5, value.as_mut_ptr(), 5);
        get_global_state(key.as_mut_ptr(), 5)
    };

    assert_eq!(host::buffer(result), Some(b"World".to_vec()));
    assert_eq!(
        host::calls(),
        [
            HostCall::SetState {
                key: key.as_mut_ptr(),
                key_size: 5,
                val: value.as_mut_ptr(),
                val_size: 5,
            },
            HostCall::GetState {
                key: key.as_mut_ptr(),
                key_size: 5,
                result,
            },
        ]
    );

    Ok(())
}

#[test]
fn test_imports_by_name() -> Result<()> {
    let (recording, seen) = RecordingHost::new();
    let _guard = host::install(recording)?;

    let mut key = *b"Hello";
    let mut value = *b"World";
    // SAFETY: both buffers are readable for their full length.
    let result = unsafe {
        set_state(key.as_mut_ptr(), 5, value.as_mut_ptr(), 5);
        get_state(key.as_mut_ptr(), 5)
    };

    assert_eq!(seen.borrow().len(), 2);
    assert_eq!(host::buffer(result), Some(b"World".to_vec()));

    Ok(())
}

//! Errors raised around the state shim.
//!
//! The shim itself never fails. These are produced by the safe wrapper in [`crate::state`] and by
//! the native host registry in [`crate::host`].

use std::fmt;

/// An error from the safe state API or the native host registry.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A buffer is too long for its length to be passed as a C `int`.
    LengthOverflow {
        /// The length of the rejected buffer.
        len: usize,
    },
    /// A host is already installed on the current thread.
    HostAlreadyInstalled,
    /// The host has no allocation starting at the pointer it was asked about.
    UnknownBuffer,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthOverflow { len } => {
                write!(f, "buffer of {len} bytes does not fit in a C int length")
            }
            Self::HostAlreadyInstalled => f.write_str("a state host is already installed"),
            Self::UnknownBuffer => f.write_str("pointer was not allocated by the state host"),
        }
    }
}

impl std::error::Error for Error {}

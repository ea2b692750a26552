//! Where the host keeps state.
//!
//! Stores never see raw keys, only their [`StateKey`] digest, and every entry belongs to an
//! [`Origin`].

mod key;
mod memory;
#[cfg(all(feature = "sqlite", not(target_arch = "wasm32")))]
mod sqlite;

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::MemoryStore {}
    #[cfg(all(feature = "sqlite", not(target_arch = "wasm32")))]
    impl Sealed for super::Sqlite {}
}

pub use self::key::{Origin, StateKey};
pub use self::memory::MemoryStore;
#[cfg(all(feature = "sqlite", not(target_arch = "wasm32")))]
pub use self::sqlite::Sqlite;

/// A backend holding state values.
pub trait StateStore: sealed::Sealed {
    /// The error the backend reports.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Reads the value of `key` under `origin`.
    fn get(&self, origin: &Origin, key: &StateKey) -> Result<Option<Vec<u8>>, Self::Error>;

    /// Writes the value of `key` under `origin`, replacing any previous value.
    fn set(&mut self, origin: &Origin, key: &StateKey, value: &[u8]) -> Result<(), Self::Error>;
}

use crate::host::StateHost;
use crate::store::{Origin, StateKey, StateStore};
use crate::tracing_shim::{error, trace};

/// A host that keeps state in a [`StateStore`].
///
/// Raw keys are hashed with SHA-256 and every value is scoped to the host's [`Origin`]. Store
/// failures are logged; a failed read looks like a missing value to the guest.
#[derive(Debug)]
pub struct StoreHost<S> {
    store: S,
    origin: Origin,
}

impl<S> StoreHost<S> {
    /// A host over `store` acting for the default (all-zero) origin.
    pub fn new(store: S) -> Self {
        Self::with_origin(store, Origin::default())
    }

    /// A host over `store` acting for `origin`.
    pub const fn with_origin(store: S, origin: Origin) -> Self {
        Self { store, origin }
    }

    /// The underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }
}

#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
impl<S> StateHost for StoreHost<S>
where
    S: StateStore,
{
    fn set_state(&mut self, key: &[u8], value: &[u8]) {
        let key = StateKey::digest(key);
        trace!(origin = %self.origin, %key, len = value.len(), "set_state");
        if let Err(err) = self.store.set(&self.origin, &key, value) {
            error!(origin = %self.origin, %key, %err, "failed to write state");
        }
    }

    fn get_state(&mut self, key: &[u8]) -> Option<Vec<u8>> {
        let key = StateKey::digest(key);
        trace!(origin = %self.origin, %key, "get_state");
        match self.store.get(&self.origin, &key) {
            Ok(value) => value,
            Err(err) => {
                error!(origin = %self.origin, %key, %err, "failed to read state");
                None
            }
        }
    }
}

use std::path::PathBuf;

/// Where a state store keeps its data.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Location {
    /// Held in memory and lost when the store is dropped.
    InMemory,
    /// Persisted in a file.
    OnDisk {
        /// The database file. Created if it does not exist.
        path: PathBuf,
    },
}

impl<T> From<T> for Location
where
    T: Into<PathBuf>,
{
    fn from(path: T) -> Self {
        Self::OnDisk { path: path.into() }
    }
}

use crate::store::{Origin, StateKey, StateStore};
use crate::tracing_shim::{debug, trace};
use crate::Location;
use rusqlite::{params, Connection, OptionalExtension as _};

/// A store backed by an SQLite database.
#[derive(Debug)]
pub struct Sqlite {
    location: Location,
    connection: Connection,
}

impl Sqlite {
    /// Opens the database at `location`, creating the state table if needed.
    ///
    /// Every in-memory store is a fresh, private database.
    #[cfg_attr(feature = "tracing", tracing::instrument)]
    pub fn at_location(location: Location) -> Result<Self, rusqlite::Error> {
        let connection = match &location {
            Location::InMemory => Connection::open_in_memory()?,
            Location::OnDisk { path } => Connection::open(path)?,
        };
        let _rows = connection.execute(
            "CREATE TABLE IF NOT EXISTS state (
                origin BLOB NOT NULL,
                key BLOB NOT NULL,
                value BLOB NOT NULL,
                PRIMARY KEY (origin, key)
            )",
            [],
        )?;
        debug!("state table ready");

        Ok(Self {
            location,
            connection,
        })
    }

    /// Where the database lives.
    pub const fn location(&self) -> &Location {
        &self.location
    }
}

impl StateStore for Sqlite {
    type Error = rusqlite::Error;

    #[cfg_attr(feature = "tracing", tracing::instrument(name = "sqlite_get", skip(self)))]
    fn get(&self, origin: &Origin, key: &StateKey) -> Result<Option<Vec<u8>>, Self::Error> {
        let value: Option<Vec<u8>> = self
            .connection
            .query_row(
                "SELECT value FROM state WHERE origin = ?1 AND key = ?2",
                params![&origin.as_bytes()[..], &key.as_bytes()[..]],
                |row| row.get(0),
            )
            .optional()?;
        trace!(found = value.is_some(), "state read");
        Ok(value)
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "sqlite_set", skip(self, value), fields(len = value.len()))
    )]
    fn set(&mut self, origin: &Origin, key: &StateKey, value: &[u8]) -> Result<(), Self::Error> {
        let _rows = self.connection.execute(
            "INSERT OR REPLACE INTO state (origin, key, value) VALUES (?1, ?2, ?3)",
            params![&origin.as_bytes()[..], &key.as_bytes()[..], value],
        )?;
        trace!("state written");
        Ok(())
    }
}

//! A command-line interface for reading and writing global state through the shim.
//!
//! For usage, run `cargo run --features binary -- --help`.

mod cli;

use crate::cli::{Args, Command};
use clap::Parser as _;
use global_state::ffi::IMPORT_MODULE;
use global_state::host::{self, StoreHost};
use global_state::store::{Origin, Sqlite, StateKey};
use global_state::{GlobalState, Location};
use std::io::{self, Write as _};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const ABI: &str = "\
unsigned char *get_state(unsigned char *key, int key_size);
void set_state(unsigned char *key, int key_size, unsigned char *val, int val_size);
void set_global_state(unsigned char *key, int key_size, unsigned char *val, int val_size);
unsigned char *get_global_state(unsigned char *key, int key_size);
";

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let Args {
        store,
        in_memory,
        origin,
        command,
    } = Args::parse();
    let location = if in_memory {
        Location::InMemory
    } else {
        Location::from(store)
    };

    let mut stdout = io::stdout().lock();
    match command {
        Command::Get { keys } => {
            let found = get(location, origin, &keys, &mut stdout)?;
            Ok(if found {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Set { key, value } => {
            with_state(location, origin, |state| {
                state.set(key.as_bytes(), value.as_bytes())
            })??;
            Ok(ExitCode::SUCCESS)
        }
        Command::Digest { key } => {
            writeln!(stdout, "{}", StateKey::digest(key))?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Abi => {
            writeln!(stdout, "// imports from \"{IMPORT_MODULE}\"")?;
            stdout.write_all(ABI.as_bytes())?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Installs a store-backed host for the duration of `f`.
fn with_state<T>(
    location: Location,
    origin: Origin,
    f: impl FnOnce(GlobalState) -> T,
) -> Result<T, Box<dyn std::error::Error>> {
    let store = Sqlite::at_location(location)?;
    let _guard = host::install(StoreHost::with_origin(store, origin))?;
    Ok(f(GlobalState))
}

/// Writes the values of `keys` to `out`, separated by a null byte (`\0`). Returns whether every
/// key had a value.
///
/// A missing key is written as an empty value.
fn get(
    location: Location,
    origin: Origin,
    keys: &[String],
    out: &mut impl io::Write,
) -> Result<bool, Box<dyn std::error::Error>> {
    let values = with_state(location, origin, |state| {
        keys.iter()
            .map(|key| state.get(key.as_bytes()))
            .collect::<Result<Vec<_>, _>>()
    })??;

    let mut found = true;
    for (i, value) in values.into_iter().enumerate() {
        if i != 0 {
            out.write_all(&[0])?;
        }
        match value {
            Some(value) => out.write_all(&value)?,
            None => found = false,
        }
    }
    out.flush()?;

    Ok(found)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::path::{Path, PathBuf};

    type Result<T = ()> = std::result::Result<T, Box<dyn std::error::Error>>;

    /// A store file private to one test.
    fn store_path(name: &str) -> Result<PathBuf> {
        let path = std::env::temp_dir().join(format!(
            "global-state-{name}-{}.db",
            std::process::id()
        ));
        if path.exists() {
            std::fs::remove_file(&path)?;
        }
        Ok(path)
    }

    /// Stores `values` at `path` for the default origin.
    fn fill(path: &Path, values: &[(&str, &str)]) -> Result {
        with_state(Location::from(path), Origin::default(), |state| {
            values
                .iter()
                .try_for_each(|(key, value)| state.set(key.as_bytes(), value.as_bytes()))
        })??;
        Ok(())
    }

    /// Owned keys, as clap hands them over.
    fn keys(keys: &[&str]) -> Vec<String> {
        keys.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_get_separates_values() -> Result {
        let path = store_path("separated")?;
        fill(&path, &[("first", "a"), ("third", "c")])?;

        let mut out = Vec::new();
        let found = get(
            Location::from(path.clone()),
            Origin::default(),
            &keys(&["first", "third"]),
            &mut out,
        )?;
        assert!(found);
        assert_eq!(out, b"a\0c");

        std::fs::remove_file(path)?;
        Ok(())
    }

    #[test]
    fn test_get_missing_key_fails() -> Result {
        let path = store_path("missing")?;
        fill(&path, &[("first", "a"), ("third", "c")])?;

        let mut out = Vec::new();
        let found = get(
            Location::from(path.clone()),
            Origin::default(),
            &keys(&["first", "second", "third"]),
            &mut out,
        )?;
        assert!(!found);
        assert_eq!(out, b"a\0\0c");

        std::fs::remove_file(path)?;
        Ok(())
    }

    #[test]
    fn test_get_other_origin() -> Result {
        let path = store_path("origin")?;
        fill(&path, &[("first", "a")])?;

        let mut out = Vec::new();
        let found = get(
            Location::from(path.clone()),
            Origin::from([1; 20]),
            &keys(&["first"]),
            &mut out,
        )?;
        assert!(!found);
        assert!(out.is_empty());

        std::fs::remove_file(path)?;
        Ok(())
    }
}

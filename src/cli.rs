//! Command-line interface for the global state tool.

use clap::{Parser, Subcommand};
use global_state::store::Origin;
use std::path::PathBuf;

/// Command-line arguments for the global state tool.
///
/// Values are read and written through the exported shim functions, backed by an SQLite store.
#[derive(Debug, Parser)]
#[command(version, propagate_version = true)]
pub(crate) struct Args {
    /// The location of the state database.
    #[arg(short, long, default_value = "state.db")]
    pub(crate) store: PathBuf,
    /// Keep state in memory instead of on disk. Mostly useful with `digest`.
    #[arg(long, conflicts_with = "store")]
    pub(crate) in_memory: bool,
    /// The account all state is scoped to, as 40 hex digits.
    #[arg(short, long, default_value_t = Origin::default())]
    pub(crate) origin: Origin,
    /// The operation to perform.
    #[command(subcommand)]
    pub(crate) command: Command,
}

/// What operation to perform.
#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Get the value(s) stored under the given key(s).
    ///
    /// If multiple keys are provided, the values are written to stdout in the order the keys were
    /// provided, separated by a null byte (`\0`). If any key has no value, the process exits with
    /// a failure status code.
    #[clap(alias = "fetch")]
    Get {
        /// The key(s) to get the value(s) for.
        #[clap(required = true)]
        keys: Vec<String>,
    },
    /// Store a value under a key.
    ///
    /// If the key already has a value, it is replaced.
    #[clap(aliases = ["put", "store"])]
    Set {
        /// The key to store the value under.
        key: String,
        /// The value to store.
        value: String,
    },
    /// Print the storage key a raw key is hashed to.
    #[clap(alias = "hash")]
    Digest {
        /// The raw key.
        key: String,
    },
    /// Print the C signatures of the shim's imports and exports.
    Abi,
}

//! A minimal embedded document store persisting records as individual JSON
//! files under a directory tree, keyed by `(collection, resource)`.
//!
//! For single-process applications that want durable, human-readable storage
//! without running a database server. Writes commit by an atomic temp-write
//! plus rename, and writes within a collection are serialized by a lazily
//! created per-collection lock.
//!
//! # Example
//!
//! ```rust
//! use jotdb_store::{Driver, Options};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct User {
//!     name: String,
//!     age: u32,
//! }
//!
//! # fn main() -> Result<(), jotdb_store::Error> {
//! # let scratch = tempfile::tempdir().unwrap();
//! let db = Driver::new(scratch.path().join("db"), Options::default())?;
//! db.write("users", "alice", &User { name: "alice".into(), age: 30 })?;
//! let alice: User = db.read("users", "alice")?;
//! assert_eq!(alice.age, 30);
//! # Ok(())
//! # }
//! ```

pub mod driver;
pub mod error;
pub mod logger;
mod paths;

pub use driver::{Driver, Options};
pub use error::Error;
pub use logger::{ConsoleLogger, FacadeLogger, Level, Logger};

/// Crate version, exposed for embedders that report it in diagnostics.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

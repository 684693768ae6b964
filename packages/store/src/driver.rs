//! The store driver: a directory tree of JSON records with per-collection
//! write serialization and atomic commits.
//!
//! Writes land in `<resource>.json.tmp` and are published by a rename onto
//! `<resource>.json`, so a concurrent reader only ever observes a
//! fully-formed old or new record. Reads are deliberately not excluded by
//! the collection lock; see [`Driver::read`] for the consistency contract.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Error;
use crate::logger::{ConsoleLogger, Logger};
use crate::paths;

/// Configuration accepted by [`Driver::new`].
#[derive(Default)]
pub struct Options {
    /// Leveled logger for diagnostic output. Defaults to a
    /// [`ConsoleLogger`] at info level when unset.
    pub logger: Option<Box<dyn Logger>>,
}

/// A document store persisting records as individual JSON files under a base
/// directory, keyed by `(collection, resource)`.
///
/// The driver is safe to share across threads (`Arc<Driver>`); mutating
/// operations on the same collection are serialized by a per-collection lock
/// created lazily on first use.
pub struct Driver {
    dir: PathBuf,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
    log: Box<dyn Logger>,
}

impl Driver {
    /// Opens a store rooted at `dir`, creating the directory tree if absent.
    ///
    /// The path is lexically normalized. When the directory already exists
    /// its contents are left untouched.
    pub fn new(dir: impl AsRef<Path>, options: Options) -> Result<Driver, Error> {
        let dir = paths::clean(dir.as_ref());
        let log = options
            .logger
            .unwrap_or_else(|| Box::new(ConsoleLogger::default()));

        let driver = Driver {
            dir,
            locks: Mutex::new(HashMap::new()),
            log,
        };

        if driver.dir.exists() {
            driver.log.debug(format_args!(
                "using '{}' (database already exists)",
                driver.dir.display()
            ));
            return Ok(driver);
        }

        driver.log.debug(format_args!(
            "creating the database at '{}'...",
            driver.dir.display()
        ));
        create_dir_tree(&driver.dir)?;
        Ok(driver)
    }

    /// The normalized base directory this store persists under.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Serializes `value` as tab-indented JSON and commits it at
    /// `<collection>/<resource>.json`, replacing any prior record.
    ///
    /// The bytes are first written to `<resource>.json.tmp` and then renamed
    /// onto the committed path, so a failure mid-write never corrupts the
    /// previously committed record. Writes to the same collection are fully
    /// serialized.
    pub fn write<T: Serialize>(
        &self,
        collection: &str,
        resource: &str,
        value: &T,
    ) -> Result<(), Error> {
        if collection.is_empty() {
            return Err(Error::MissingCollection);
        }
        if resource.is_empty() {
            return Err(Error::MissingResource);
        }

        let lock = self.collection_lock(collection);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let dir = self.dir.join(collection);
        let committed = paths::append_json(&dir.join(resource));
        let temporary = paths::append_tmp(&committed);

        create_dir_tree(&dir)?;

        let bytes = encode(value)?;
        write_file(&temporary, &bytes)?;
        fs::rename(&temporary, &committed)?;
        Ok(())
    }

    /// Reads the record at `(collection, resource)` into a deserializable
    /// target. The resource name may be given with or without the `.json`
    /// extension.
    ///
    /// Reads take no lock: a read racing a delete, or the very first write
    /// to a collection, may surface a transient [`Error::NotFound`]. That is
    /// an accepted weak-consistency window, not corruption; the commit
    /// rename guarantees any record observed is fully formed.
    pub fn read<T: DeserializeOwned>(&self, collection: &str, resource: &str) -> Result<T, Error> {
        if collection.is_empty() {
            return Err(Error::MissingCollection);
        }
        if resource.is_empty() {
            return Err(Error::MissingResource);
        }

        let record = self.dir.join(collection).join(resource);
        if paths::resolve(&record).is_none() {
            return Err(Error::not_found(record));
        }

        let committed = if resource.ends_with(paths::JSON_EXT) {
            record
        } else {
            paths::append_json(&record)
        };
        let bytes = fs::read(committed)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Returns the raw text of every record in `collection`, in directory
    /// enumeration order (no sort is imposed). Deserialization is left to
    /// the caller.
    ///
    /// A failure reading any one file aborts the whole listing.
    pub fn read_all(&self, collection: &str) -> Result<Vec<String>, Error> {
        if collection.is_empty() {
            return Err(Error::MissingCollection);
        }

        let dir = self.dir.join(collection);
        if paths::resolve(&dir).is_none() {
            return Err(Error::not_found(dir));
        }

        let mut records = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            records.push(fs::read_to_string(entry.path())?);
        }
        Ok(records)
    }

    /// Removes the record at `(collection, resource)`, or the entire
    /// collection subtree when the resolved path is a directory (an empty
    /// `resource` resolves to the collection directory itself).
    ///
    /// Returns [`Error::NotFound`] when neither the bare nor the
    /// `.json`-suffixed path exists, including repeated deletes of the same
    /// resource.
    pub fn delete(&self, collection: &str, resource: &str) -> Result<(), Error> {
        let lock = self.collection_lock(collection);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let target = self.dir.join(collection).join(resource);
        match paths::resolve(&target) {
            Some((found, meta)) if meta.is_dir() => {
                fs::remove_dir_all(found)?;
                Ok(())
            }
            Some((_, meta)) if meta.is_file() => {
                fs::remove_file(paths::append_json(&target))?;
                Ok(())
            }
            // Symlinks and other special files are left alone.
            Some(_) => Ok(()),
            None => Err(Error::not_found(Path::new(collection).join(resource))),
        }
    }

    /// Removes `.json.tmp` files left behind by a crash between temp-write
    /// and rename. Returns the number of files removed.
    ///
    /// Never runs implicitly; call it once at startup if orphan cleanup is
    /// wanted. Each collection's lock is held while that collection is
    /// swept, so the sweep cannot race an in-flight commit.
    pub fn sweep_temp_files(&self) -> Result<usize, Error> {
        let mut removed = 0;
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }

            let collection = entry.file_name().to_string_lossy().into_owned();
            let lock = self.collection_lock(&collection);
            let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

            for file in fs::read_dir(entry.path())? {
                let file = file?;
                let name = file.file_name();
                let is_orphan = name
                    .to_str()
                    .is_some_and(|n| n.ends_with(".json.tmp"))
                    && file.file_type()?.is_file();
                if is_orphan {
                    let path = file.path();
                    fs::remove_file(&path)?;
                    self.log.debug(format_args!(
                        "removed orphaned temp file '{}'",
                        path.display()
                    ));
                    removed += 1;
                }
            }
        }
        Ok(removed)
    }

    /// Returns the lock guarding `collection`, creating it on first access.
    ///
    /// The registry lock is held only for the lookup-or-insert, never across
    /// filesystem I/O, so unrelated collections are never serialized against
    /// each other.
    fn collection_lock(&self, collection: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks.entry(collection.to_string()).or_default().clone()
    }
}

/// Tab-indented JSON with a trailing newline, matching the committed record
/// layout on disk.
fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let mut bytes = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(&mut bytes, formatter);
    value.serialize(&mut serializer)?;
    bytes.push(b'\n');
    Ok(bytes)
}

#[cfg(unix)]
fn create_dir_tree(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new().recursive(true).mode(0o755).create(path)
}

#[cfg(not(unix))]
fn create_dir_tree(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path)
}

#[cfg(unix)]
fn write_file(path: &Path, bytes: &[u8]) -> io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::OpenOptionsExt;

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o644)
        .open(path)?;
    file.write_all(bytes)
}

#[cfg(not(unix))]
fn write_file(path: &Path, bytes: &[u8]) -> io::Result<()> {
    fs::write(path, bytes)
}

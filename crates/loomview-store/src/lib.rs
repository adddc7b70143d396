//! Scoped, read-only access to single-cell matrix stores.
//!
//! Every access opens its own connection and releases it before control
//! returns to the caller, whatever the outcome. Use [`with_store`] for the
//! common open → read → close span.

pub mod detect;
pub mod document;
pub mod entities;
#[cfg(feature = "loom")]
pub mod loom;

use std::fs::File;
use std::io::Read;
use std::ops::Deref;
use std::path::{Path, PathBuf};

use log::debug;
use loomview_core::{AttributeValues, LoomError, Result};

pub use document::DocumentStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreFormat {
    Loom,
    Document,
    Unknown,
}

impl std::fmt::Display for StoreFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreFormat::Loom => write!(f, "loom"),
            StoreFormat::Document => write!(f, "json"),
            StoreFormat::Unknown => write!(f, "unknown"),
        }
    }
}

/// Read access to a matrix file: a features × samples matrix plus
/// per-row and per-column attribute arrays and file-level attributes.
pub trait MatrixStore {
    /// Row attribute keys, ascending.
    fn row_attribute_keys(&self) -> Vec<String>;

    /// Column attribute keys, ascending.
    fn column_attribute_keys(&self) -> Vec<String>;

    fn row_attribute(&self, key: &str) -> Result<AttributeValues>;

    fn column_attribute(&self, key: &str) -> Result<AttributeValues>;

    fn matrix_row(&self, index: usize) -> Result<Vec<f64>>;

    /// `(rows, cols)`, i.e. `(features, samples)`.
    fn shape(&self) -> (usize, usize);

    fn file_attribute(&self, name: &str) -> Result<Option<String>>;

    fn has_row_attribute(&self, key: &str) -> bool {
        self.row_attribute_keys().iter().any(|k| k == key)
    }

    fn has_column_attribute(&self, key: &str) -> bool {
        self.column_attribute_keys().iter().any(|k| k == key)
    }

    /// First row whose `attribute_key` entry equals `value`.
    fn row_index_where(&self, attribute_key: &str, value: &str) -> Result<Option<usize>> {
        Ok(self.row_attribute(attribute_key)?.position_of(value))
    }

    /// Drop the underlying connection. Called exactly once, by
    /// [`StoreHandle`] when it goes out of scope.
    fn release(&mut self) {}
}

/// An open connection to a store. The connection is released on drop.
pub struct StoreHandle {
    path: PathBuf,
    store: Box<dyn MatrixStore>,
}

impl StoreHandle {
    /// Wrap an already-open backend.
    pub fn from_store(path: impl Into<PathBuf>, store: Box<dyn MatrixStore>) -> Self {
        Self {
            path: path.into(),
            store,
        }
    }

    pub fn close(self) {
        drop(self);
    }
}

impl Deref for StoreHandle {
    type Target = dyn MatrixStore;

    fn deref(&self) -> &Self::Target {
        self.store.as_ref()
    }
}

impl Drop for StoreHandle {
    fn drop(&mut self) {
        self.store.release();
        debug!("closed store {}", self.path.display());
    }
}

/// Open a store, picking the backend from the extension and falling back
/// to the file signature.
pub fn open(path: impl AsRef<Path>) -> Result<StoreHandle> {
    let path = path.as_ref();
    let meta = std::fs::metadata(path)
        .map_err(|e| LoomError::NotFound(format!("{}: {}", path.display(), e)))?;
    if !meta.is_file() {
        return Err(LoomError::NotFound(format!(
            "{}: not a regular file",
            path.display()
        )));
    }

    let format = match detect::detect_format_from_extension(path) {
        StoreFormat::Unknown => sniff(path)?,
        known => known,
    };

    let store: Box<dyn MatrixStore> = match format {
        StoreFormat::Document => Box::new(DocumentStore::open(path)?),
        StoreFormat::Loom => open_loom(path)?,
        StoreFormat::Unknown => {
            return Err(LoomError::UnsupportedFormat(path.display().to_string()));
        }
    };
    debug!("opened {} store {}", format, path.display());
    Ok(StoreHandle::from_store(path, store))
}

fn sniff(path: &Path) -> Result<StoreFormat> {
    let mut head = Vec::with_capacity(64);
    File::open(path)
        .map_err(|e| LoomError::NotFound(format!("{}: {}", path.display(), e)))?
        .take(64)
        .read_to_end(&mut head)?;
    Ok(detect::detect_format(&head))
}

#[cfg(feature = "loom")]
fn open_loom(path: &Path) -> Result<Box<dyn MatrixStore>> {
    Ok(Box::new(loom::LoomStore::open(path)?))
}

#[cfg(not(feature = "loom"))]
fn open_loom(path: &Path) -> Result<Box<dyn MatrixStore>> {
    Err(LoomError::UnsupportedFormat(format!(
        "{}: built without the `loom` feature",
        path.display()
    )))
}

/// Run `f` against an already-open handle, releasing it afterwards.
pub fn scoped<T, F>(handle: StoreHandle, f: F) -> Result<T>
where
    F: FnOnce(&dyn MatrixStore) -> Result<T>,
{
    let result = f(&*handle);
    handle.close();
    result
}

/// Open `path`, run `f`, and release the connection on every path out.
pub fn with_store<T, F>(path: impl AsRef<Path>, f: F) -> Result<T>
where
    F: FnOnce(&dyn MatrixStore) -> Result<T>,
{
    scoped(open(path)?, f)
}

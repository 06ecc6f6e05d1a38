use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::Path;

pub mod memory;

pub use memory::MemoryStorage;

/// Minimal file capability the sort engine runs against.
///
/// The engine never touches the file system directly; everything goes through
/// this surface so tests can exercise the full pipeline against
/// [`MemoryStorage`]. Readers and writers are unbuffered; callers wrap them
/// in `BufReader`/`BufWriter` sized from their own configuration.
pub trait Storage: Send + Sync {
    fn open_read(&self, path: &Path) -> io::Result<Box<dyn Read + Send>>;

    /// Creates or truncates the file at `path`, creating parent directories
    /// as needed.
    fn create_write(&self, path: &Path) -> io::Result<Box<dyn Write + Send>>;

    fn exists(&self, path: &Path) -> bool;

    fn delete(&self, path: &Path) -> io::Result<()>;

    /// Byte-for-byte copy, overwriting `to` if it exists. Returns the number
    /// of bytes copied.
    fn copy(&self, from: &Path, to: &Path) -> io::Result<u64>;
}

/// [`Storage`] backed by the real file system.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsStorage;

impl Storage for OsStorage {
    fn open_read(&self, path: &Path) -> io::Result<Box<dyn Read + Send>> {
        Ok(Box::new(File::open(path)?))
    }

    fn create_write(&self, path: &Path) -> io::Result<Box<dyn Write + Send>> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(Box::new(File::create(path)?))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn delete(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn copy(&self, from: &Path, to: &Path) -> io::Result<u64> {
        fs::copy(from, to)
    }
}

use std::collections::HashMap;
use std::io::{self, Cursor, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use super::Storage;

type FileMap = HashMap<PathBuf, Vec<u8>>;

/// In-memory [`Storage`] for exercising the sort engine without touching
/// disk. Paths are plain map keys; directories do not exist as entities.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    files: Arc<Mutex<FileMap>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) {
        self.lock().insert(path.into(), contents.into());
    }

    pub fn contents(&self, path: &Path) -> Option<Vec<u8>> {
        self.lock().get(path).cloned()
    }

    pub fn file_count(&self) -> usize {
        self.lock().len()
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        self.lock().keys().cloned().collect()
    }

    fn lock(&self) -> MutexGuard<'_, FileMap> {
        self.files.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Storage for MemoryStorage {
    fn open_read(&self, path: &Path) -> io::Result<Box<dyn Read + Send>> {
        let contents = self
            .contents(path)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.display().to_string()))?;
        Ok(Box::new(Cursor::new(contents)))
    }

    fn create_write(&self, path: &Path) -> io::Result<Box<dyn Write + Send>> {
        self.insert(path.to_path_buf(), Vec::new());
        Ok(Box::new(MemoryWriter {
            path: path.to_path_buf(),
            buf: Vec::new(),
            files: Arc::clone(&self.files),
        }))
    }

    fn exists(&self, path: &Path) -> bool {
        self.lock().contains_key(path)
    }

    fn delete(&self, path: &Path) -> io::Result<()> {
        match self.lock().remove(path) {
            Some(_) => Ok(()),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                path.display().to_string(),
            )),
        }
    }

    fn copy(&self, from: &Path, to: &Path) -> io::Result<u64> {
        let contents = self
            .contents(from)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, from.display().to_string()))?;
        let len = contents.len() as u64;
        self.lock().insert(to.to_path_buf(), contents);
        Ok(len)
    }
}

/// Writer that accumulates bytes and commits them to the backing map on
/// flush and on drop.
struct MemoryWriter {
    path: PathBuf,
    buf: Vec<u8>,
    files: Arc<Mutex<FileMap>>,
}

impl MemoryWriter {
    fn commit(&self) {
        let mut files = self
            .files
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        files.insert(self.path.clone(), self.buf.clone());
    }
}

impl Write for MemoryWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.commit();
        Ok(())
    }
}

impl Drop for MemoryWriter {
    fn drop(&mut self) {
        self.commit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read_back() {
        let storage = MemoryStorage::new();
        let path = Path::new("/data/file.txt");

        {
            let mut writer = storage.create_write(path).unwrap();
            writer.write_all(b"hello\n").unwrap();
            writer.flush().unwrap();
        }

        let mut reader = storage.open_read(path).unwrap();
        let mut contents = String::new();
        reader.read_to_string(&mut contents).unwrap();
        assert_eq!(contents, "hello\n");
    }

    #[test]
    fn test_writer_commits_on_drop() {
        let storage = MemoryStorage::new();
        let path = Path::new("/data/file.txt");

        {
            let mut writer = storage.create_write(path).unwrap();
            writer.write_all(b"dropped").unwrap();
        }

        assert_eq!(storage.contents(path).unwrap(), b"dropped");
    }

    #[test]
    fn test_delete_missing_file_is_not_found() {
        let storage = MemoryStorage::new();
        let err = storage.delete(Path::new("/nope")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_copy_preserves_exact_bytes() {
        let storage = MemoryStorage::new();
        storage.insert("/src", b"no trailing newline".to_vec());

        let copied = storage.copy(Path::new("/src"), Path::new("/dst")).unwrap();

        assert_eq!(copied, 19);
        assert_eq!(storage.contents(Path::new("/dst")).unwrap(), b"no trailing newline");
    }
}

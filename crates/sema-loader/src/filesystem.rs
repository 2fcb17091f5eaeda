//! The small read-only filesystem surface the loader needs. Treated as an
//! external collaborator (see the concurrency & resource model): the core
//! only ever opens and reads through it, synchronously from its own point
//! of view.

use rustc_hash::FxHashMap;
use std::sync::Mutex;

pub trait FileSystem {
    fn exists(&self, path: &str) -> bool;
    fn read_to_string(&self, path: &str) -> std::io::Result<String>;
}

pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn exists(&self, path: &str) -> bool {
        std::path::Path::new(path).is_file()
    }

    fn read_to_string(&self, path: &str) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }
}

/// An in-memory filesystem for tests that doesn't touch disk.
#[derive(Default)]
pub struct MemoryFileSystem {
    files: Mutex<FxHashMap<String, String>>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: impl Into<String>, contents: impl Into<String>) -> Self {
        self.files.lock().unwrap().insert(path.into(), contents.into());
        self
    }
}

impl FileSystem for MemoryFileSystem {
    fn exists(&self, path: &str) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }

    fn read_to_string(&self, path: &str) -> std::io::Result<String> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, path.to_string()))
    }
}

//! Where imported source units come from.

use std::fmt;
use std::path::PathBuf;

use rustc_hash::FxHashMap;

/// Failure to read a source unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadError {
    pub path: String,
    pub reason: String,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot load \"{}\": {}", self.path, self.reason)
    }
}

impl std::error::Error for LoadError {}

/// Resolves an import path to source text.
pub trait SourceLoader {
    fn load(&self, path: &str) -> Result<String, LoadError>;
}

/// Reads files from disk.
///
/// Relative paths resolve against `base` when set, otherwise against the
/// process working directory.
#[derive(Clone, Debug, Default)]
pub struct FileLoader {
    base: Option<PathBuf>,
}

impl FileLoader {
    pub fn new() -> Self {
        FileLoader::default()
    }

    pub fn with_base(base: impl Into<PathBuf>) -> Self {
        FileLoader {
            base: Some(base.into()),
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        match &self.base {
            Some(base) => base.join(path),
            None => PathBuf::from(path),
        }
    }
}

impl SourceLoader for FileLoader {
    fn load(&self, path: &str) -> Result<String, LoadError> {
        std::fs::read_to_string(self.resolve(path)).map_err(|err| LoadError {
            path: path.to_string(),
            reason: err.to_string(),
        })
    }
}

/// In-memory sources keyed by path, for tests and embedding.
#[derive(Clone, Debug, Default)]
pub struct MemoryLoader {
    files: FxHashMap<String, String>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        MemoryLoader::default()
    }

    #[must_use]
    pub fn with_file(mut self, path: impl Into<String>, source: impl Into<String>) -> Self {
        self.insert(path, source);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, source: impl Into<String>) {
        self.files.insert(path.into(), source.into());
    }
}

impl SourceLoader for MemoryLoader {
    fn load(&self, path: &str) -> Result<String, LoadError> {
        self.files.get(path).cloned().ok_or_else(|| LoadError {
            path: path.to_string(),
            reason: "no such file".to_string(),
        })
    }
}

//! I/O boundary traits for testability
//!
//! Expression text reaches the application from files or stdin; abstracting
//! the reads lets the CLI commands be exercised with in-memory input.

use std::io::{self, Read};
use std::path::Path;

/// Source of expression text.
pub trait InputSource: Send + Sync {
    /// Read a whole file to string.
    fn read_file(&self, path: &Path) -> io::Result<String>;

    /// Read all of standard input.
    fn read_stdin(&self) -> io::Result<String>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Reads from the real filesystem and process stdin.
#[derive(Debug, Default)]
pub struct RealInputSource;

impl InputSource for RealInputSource {
    fn read_file(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn read_stdin(&self) -> io::Result<String> {
        let mut buffer = String::new();
        io::stdin().lock().read_to_string(&mut buffer)?;
        Ok(buffer)
    }
}

// ============================================================
// TEST IMPLEMENTATIONS
// ============================================================

/// Fixed in-memory input; files are looked up by exact path.
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub struct MemoryInputSource {
    pub files: Vec<(std::path::PathBuf, String)>,
    pub stdin: String,
}

#[cfg(test)]
impl MemoryInputSource {
    pub fn with_stdin(stdin: impl Into<String>) -> Self {
        Self {
            files: Vec::new(),
            stdin: stdin.into(),
        }
    }

    pub fn with_file(mut self, path: impl Into<std::path::PathBuf>, content: impl Into<String>) -> Self {
        self.files.push((path.into(), content.into()));
        self
    }
}

#[cfg(test)]
impl InputSource for MemoryInputSource {
    fn read_file(&self, path: &Path) -> io::Result<String> {
        self.files
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, content)| content.clone())
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.display().to_string()))
    }

    fn read_stdin(&self) -> io::Result<String> {
        Ok(self.stdin.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_memory_source_when_reading_then_returns_registered_content() {
        let source = MemoryInputSource::with_stdin("ab+\n").with_file("/tmp/in.txt", "a+b\n");
        assert_eq!(source.read_stdin().unwrap(), "ab+\n");
        assert_eq!(source.read_file(Path::new("/tmp/in.txt")).unwrap(), "a+b\n");
        let err = source.read_file(Path::new("/tmp/other.txt")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}

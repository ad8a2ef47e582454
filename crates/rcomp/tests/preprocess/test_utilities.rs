//! Helpers for filesystem-backed preprocessing tests.

use std::path::Path;
use tempfile::TempDir;

pub fn args(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|t| t.to_string()).collect()
}

/// A scratch directory holding input files for remote commands.
pub struct InputFiles {
    dir: TempDir,
}

impl InputFiles {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    /// Write `contents` to `name` and return its path as an argv token.
    pub fn write(&self, name: &str, contents: &[u8]) -> String {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).expect("Failed to write input file");
        path_token(&path)
    }

    pub fn missing(&self, name: &str) -> String {
        path_token(&self.dir.path().join(name))
    }
}

fn path_token(path: &Path) -> String {
    path.to_str().expect("temp paths are UTF-8").to_string()
}

//! Session log file allocation.
//!
//! Each run appends to its own `logger_<n>.txt` inside the log
//! directory, where `n` is one more than the highest index already
//! present, so earlier sessions are never overwritten.

use std::io;
use std::path::{Path, PathBuf};

const PREFIX: &str = "logger_";
const SUFFIX: &str = ".txt";

/// Index encoded in a session log file name, if it is one.
fn session_index(file_name: &str) -> Option<u64> {
    file_name
        .strip_prefix(PREFIX)?
        .strip_suffix(SUFFIX)?
        .parse()
        .ok()
}

/// Next free session index in `dir`: max existing index + 1, or 0.
///
/// Files that don't follow the `logger_<n>.txt` pattern are ignored.
/// Fails if the highest index is already `u64::MAX`.
pub fn next_session_index(dir: &Path) -> io::Result<u64> {
    let mut max: Option<u64> = None;
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if let Some(index) = entry.file_name().to_str().and_then(session_index) {
            max = Some(max.map_or(index, |m| m.max(index)));
        }
    }
    match max {
        None => Ok(0),
        Some(m) => m.checked_add(1).ok_or_else(|| {
            io::Error::other(format!("session index exhausted in {}", dir.display()))
        }),
    }
}

/// File name for session `index`.
pub fn session_file_name(index: u64) -> String {
    format!("{PREFIX}{index}{SUFFIX}")
}

/// Create `dir` if needed and return the path of this run's log file.
pub fn session_log_path(dir: &Path) -> io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let index = next_session_index(dir)?;
    Ok(dir.join(session_file_name(index)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_directory_starts_at_zero() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(next_session_index(dir.path()).unwrap(), 0);
        assert_eq!(
            session_log_path(dir.path()).unwrap(),
            dir.path().join("logger_0.txt")
        );
    }

    #[test]
    fn test_next_index_follows_highest_existing() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["logger_0.txt", "logger_7.txt", "logger_3.txt"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        assert_eq!(next_session_index(dir.path()).unwrap(), 8);
    }

    #[test]
    fn test_unrelated_files_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["logger_x.txt", "notes.txt", "logger_2.log", "my_logger_9.txt"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        assert_eq!(next_session_index(dir.path()).unwrap(), 0);
    }

    #[test]
    fn test_session_log_path_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("saved_data");
        let path = session_log_path(&nested).unwrap();
        assert!(nested.is_dir());
        assert_eq!(path.file_name().unwrap(), "logger_0.txt");
    }

    #[test]
    fn test_exhausted_index_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(session_file_name(u64::MAX)), b"").unwrap();
        assert!(next_session_index(dir.path()).is_err());
        assert!(session_log_path(dir.path()).is_err());
    }
}

//! Crash-safe replacement of small files such as cache entries

use op2aws_core::{Error, Result};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Replace `path` with `content` so readers never observe a partial file.
///
/// The data is written and synced to a uniquely named sibling which is then
/// renamed over the target. Missing parent directories are created. On Unix
/// the sibling is created with `mode` before any byte is written.
pub fn write_atomic(path: &Path, content: &[u8], mode: u32) -> Result<()> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .ok_or_else(|| {
            Error::configuration(format!("'{}' has no parent directory", path.display()))
        })?;

    fs::create_dir_all(parent)
        .map_err(|e| Error::file_system(parent, "create parent directory", e))?;

    let mut sibling = Sibling::create(parent, mode)?;
    sibling.write(content)?;
    sibling.persist(path)
}

/// Temporary file next to the target, removed on drop unless persisted
struct Sibling {
    path: PathBuf,
    file: File,
    persisted: bool,
}

impl Sibling {
    #[cfg_attr(not(unix), allow(unused_variables))]
    fn create(dir: &Path, mode: u32) -> Result<Self> {
        let path = dir.join(format!(".{}.tmp", Uuid::new_v4()));

        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(mode);
        }

        let file = options
            .open(&path)
            .map_err(|e| Error::file_system(&path, "create temporary file", e))?;

        Ok(Self {
            path,
            file,
            persisted: false,
        })
    }

    fn write(&mut self, content: &[u8]) -> Result<()> {
        self.file
            .write_all(content)
            .and_then(|()| self.file.sync_all())
            .map_err(|e| Error::file_system(&self.path, "write temporary file", e))
    }

    fn persist(mut self, target: &Path) -> Result<()> {
        fs::rename(&self.path, target)
            .map_err(|e| Error::file_system(target, "atomic rename", e))?;
        self.persisted = true;
        Ok(())
    }
}

impl Drop for Sibling {
    fn drop(&mut self) {
        if !self.persisted {
            let _ = fs::remove_file(&self.path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn file_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_write_creates_parents() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("a").join("b").join("entry");

        write_atomic(&file_path, b"{}", 0o600).unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "{}");
        assert_eq!(file_names(file_path.parent().unwrap()), vec!["entry"]);
    }

    #[test]
    fn test_write_replaces_existing() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("entry");
        fs::write(&file_path, "old").unwrap();

        write_atomic(&file_path, b"new", 0o600).unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "new");
    }

    #[test]
    fn test_failed_rename_cleans_up() {
        let temp_dir = TempDir::new().unwrap();
        // A non-empty directory cannot be replaced by a file
        let target = temp_dir.path().join("entry");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), "x").unwrap();

        let err = write_atomic(&target, b"{}", 0o600).unwrap_err();

        assert!(matches!(err, Error::FileSystem { .. }));
        assert_eq!(file_names(temp_dir.path()), vec!["entry"]);
    }

    #[test]
    fn test_bare_file_name_is_rejected() {
        let err = write_atomic(Path::new("entry"), b"{}", 0o600).unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_mode_is_applied() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("private");

        write_atomic(&file_path, b"secret", 0o600).unwrap();

        let mode = fs::metadata(&file_path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}

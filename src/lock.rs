use crate::constants::LOCK_FILE_NAME;
use anyhow::{Context, Result, bail};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::path::Path;

/// exclusive per-repository lock held for the whole run
///
/// a second run against the same repository fails fast instead of
/// interleaving its history rewrite with the first. released on drop, or by
/// the OS if the process dies.
#[derive(Debug)]
pub struct RunLock {
    file: File,
}

impl RunLock {
    pub fn acquire(git_dir: &Path) -> Result<Self> {
        let path = git_dir.join(LOCK_FILE_NAME);
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .with_context(|| format!("failed to open lock file {}", path.display()))?;

        if file.try_lock_exclusive().is_err() {
            bail!("another squash is already running in this repository");
        }
        Ok(Self { file })
    }
}

impl Drop for RunLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_second_run_is_rejected_until_first_ends() {
        let temp_dir = TempDir::new().unwrap();

        let first = RunLock::acquire(temp_dir.path()).unwrap();
        let err = RunLock::acquire(temp_dir.path()).unwrap_err();
        assert!(err.to_string().contains("already running"));

        drop(first);
        assert!(RunLock::acquire(temp_dir.path()).is_ok());
    }
}

use anyhow::{Result, bail};
use git2::{Repository, RepositoryState};
use std::path::{Path, PathBuf};

/// the working tree a run operates on
#[derive(Debug)]
pub struct Workspace {
    root: PathBuf,
    git_dir: PathBuf,
    state: RepositoryState,
}

impl Workspace {
    /// find the working tree containing `start` (can be anywhere within it)
    ///
    /// returns None outside a repository and for bare repositories
    pub fn discover(start: &Path) -> Option<Self> {
        let repo = Repository::discover(start).ok()?;
        let root = repo.workdir()?.to_path_buf();
        Some(Self {
            root,
            git_dir: repo.path().to_path_buf(),
            state: repo.state(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    /// refuse to rewrite history in the middle of another git operation
    pub fn ensure_clean(&self) -> Result<()> {
        if self.state != RepositoryState::Clean {
            bail!("repository is in the middle of an operation (merge, rebase, etc)");
        }
        Ok(())
    }
}

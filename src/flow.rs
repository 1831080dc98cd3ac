use crate::git;
use crate::runner::Runner;
use crate::select::{Selection, Selector};
use std::fmt;
use std::path::Path;

/// knobs the caller passes in rather than reading from the environment
#[derive(Debug, Default, Clone)]
pub struct SquashOptions {
    /// editor for the final commit message, None keeps git's own choice
    pub editor: Option<String>,
    /// stop once the base is validated
    pub dry_run: bool,
}

/// how loudly an abort should be reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Silent,
    Info,
    Error,
}

/// every way a run can end early
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Abort {
    NoWorkspace,
    DetachedHead,
    NoLocalCommits,
    Cancelled,
    NothingSelected,
    SeveralSelected(usize),
    SelectorFailed(String),
    RootCommit(String),
    SquashFailed(String),
}

impl Abort {
    pub fn severity(&self) -> Severity {
        match self {
            Self::Cancelled => Severity::Silent,
            Self::NoLocalCommits | Self::NothingSelected | Self::SeveralSelected(_) => {
                Severity::Info
            }
            Self::NoWorkspace
            | Self::DetachedHead
            | Self::SelectorFailed(_)
            | Self::RootCommit(_)
            | Self::SquashFailed(_) => Severity::Error,
        }
    }
}

impl fmt::Display for Abort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoWorkspace => write!(
                f,
                "no workspace folder: run inside a git working tree or pass --dir"
            ),
            Self::DetachedHead => write!(f, "HEAD is detached, checkout a branch first"),
            Self::NoLocalCommits => write!(f, "no local commits found"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::NothingSelected => write!(f, "nothing selected"),
            Self::SeveralSelected(n) => {
                write!(f, "select exactly one commit as the base ({n} selected)")
            }
            Self::SelectorFailed(e) => write!(f, "could not read a selection: {e}"),
            Self::RootCommit(id) => write!(f, "cannot squash onto the root commit ({id})"),
            Self::SquashFailed(_) => write!(f, "error occurred while squashing"),
        }
    }
}

/// where a run ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// history rewritten; `collapsed` commits became one
    Squashed { base: String, collapsed: usize },
    /// dry run: what would have been squashed
    WouldSquash { base: String, collapsed: usize },
    Aborted(Abort),
}

impl From<Abort> for Outcome {
    fn from(abort: Abort) -> Self {
        Self::Aborted(abort)
    }
}

/// pick a base among the unpushed commits and collapse everything from it onwards
///
/// steps run strictly in order and the first failure ends the run; nothing is
/// retried and nothing below this point reaches the caller as a raw error.
pub fn squash_local_commits(
    workspace: Option<&Path>,
    runner: &impl Runner,
    selector: &mut dyn Selector,
    options: &SquashOptions,
) -> Outcome {
    let Some(dir) = workspace else {
        return Abort::NoWorkspace.into();
    };

    let Some(branch) = git::current_branch(runner, dir) else {
        return Abort::DetachedHead.into();
    };

    // without an upstream the whole branch history is local
    let upstream = git::upstream_branch(runner, &branch, dir);
    let commits = git::local_commits(runner, dir, upstream.as_deref(), &branch);
    if commits.is_empty() {
        return Abort::NoLocalCommits.into();
    }

    let base = match selector.select(&commits) {
        Ok(Selection::Chosen(id)) => id,
        Ok(Selection::Cancelled) => return Abort::Cancelled.into(),
        Ok(Selection::Nothing) => return Abort::NothingSelected.into(),
        Ok(Selection::Several(n)) => return Abort::SeveralSelected(n).into(),
        Err(e) => return Abort::SelectorFailed(format!("{e:#}")).into(),
    };
    let Some(position) = commits.iter().position(|c| c.id == base) else {
        return Abort::NothingSelected.into();
    };
    let collapsed = position + 1;

    if !git::has_parent(runner, &base, dir) {
        return Abort::RootCommit(base).into();
    }

    if options.dry_run {
        return Outcome::WouldSquash { base, collapsed };
    }

    match git::squash(runner, &base, dir, options.editor.as_deref()) {
        Ok(()) => Outcome::Squashed { base, collapsed },
        Err(e) => Abort::SquashFailed(e.message).into(),
    }
}

use crate::commit::Commit;
use crate::constants::{BASE_NOTE, SQUASHED_NOTE};
use crate::select::{Selection, Selector};
use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// how a commit ends up once the squash runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fate {
    Squashed,
    Base,
}

impl Fate {
    fn note(self) -> &'static str {
        match self {
            Self::Squashed => SQUASHED_NOTE,
            Self::Base => BASE_NOTE,
        }
    }
}

/// the reveal steps for `base_id`: newer commits first, the base last
pub fn steps<'a>(commits: &'a [Commit], base_id: &str) -> Vec<(&'a Commit, Fate)> {
    let Some(base) = commits.iter().position(|c| c.id == base_id) else {
        return Vec::new();
    };
    commits[..base]
        .iter()
        .map(|c| (c, Fate::Squashed))
        .chain(std::iter::once((&commits[base], Fate::Base)))
        .collect()
}

/// shows the commits a choice will fold together, then passes the choice through
///
/// the reveal runs as soon as a commit is chosen, before the squash is
/// validated. a guard set with [`Revealing::only_if`] skips it for bases the
/// validation is going to reject.
pub struct Revealing<S> {
    inner: S,
    step: Duration,
    guard: Option<Box<dyn Fn(&str) -> bool>>,
}

impl<S: Selector> Revealing<S> {
    pub fn new(inner: S, step: Duration) -> Self {
        Self {
            inner,
            step,
            guard: None,
        }
    }

    /// only reveal bases for which `guard` holds
    pub fn only_if(mut self, guard: impl Fn(&str) -> bool + 'static) -> Self {
        self.guard = Some(Box::new(guard));
        self
    }

    /// steps to show for `base_id`, none when the guard rejects it
    fn planned<'a>(&self, commits: &'a [Commit], base_id: &str) -> Vec<(&'a Commit, Fate)> {
        match &self.guard {
            Some(guard) if !guard(base_id) => Vec::new(),
            _ => steps(commits, base_id),
        }
    }

    fn reveal(&self, commits: &[Commit], base_id: &str) {
        use colored::Colorize;

        let style = ProgressStyle::default_spinner()
            .template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());

        for (commit, fate) in self.planned(commits, base_id) {
            let row = format!("{} {}", commit.id, commit.summary);
            let spinner = ProgressBar::new_spinner().with_style(style.clone());
            spinner.set_message(row.clone());
            spinner.enable_steady_tick(Duration::from_millis(50));
            std::thread::sleep(self.step);

            let note = match fate {
                Fate::Squashed => fate.note().yellow(),
                Fate::Base => fate.note().green(),
            };
            spinner.finish_and_clear();
            crate::info!("  {}  {}", row, note);
        }
    }
}

impl<S: Selector> Selector for Revealing<S> {
    fn select(&mut self, commits: &[Commit]) -> Result<Selection> {
        let selection = self.inner.select(commits)?;
        if let Some(id) = selection.chosen() {
            self.reveal(commits, id);
        }
        Ok(selection)
    }
}

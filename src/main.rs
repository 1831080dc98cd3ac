mod cli;
mod commit;
mod constants;
mod flow;
mod git;
mod lock;
mod reveal;
mod runner;
mod select;
mod ui;
mod workspace;

use crate::cli::Cli;
use crate::constants::REVEAL_STEP_MS;
use crate::flow::{Abort, Outcome, Severity, SquashOptions};
use crate::lock::RunLock;
use crate::reveal::Revealing;
use crate::runner::GitRunner;
use crate::select::{PromptSelector, Selector, TerminalSelector};
use crate::workspace::Workspace;
use anyhow::{Result, bail};
use std::path::Path;
use std::time::Duration;

fn main() {
    if let Err(e) = run() {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Cli::parse_args();

    // sanity checks
    let start = args.dir.as_deref().unwrap_or(Path::new("."));
    let workspace = Workspace::discover(start);
    let _lock = match &workspace {
        Some(workspace) => {
            workspace.ensure_clean()?;
            Some(RunLock::acquire(workspace.git_dir())?)
        }
        None => None,
    };

    // main
    let runner = GitRunner::new(args.verbose);
    let mut selector = build_selector(&args, workspace.as_ref());
    let options = SquashOptions {
        editor: args.editor.clone(),
        dry_run: args.dry_run,
    };
    let outcome = flow::squash_local_commits(
        workspace.as_ref().map(Workspace::root),
        &runner,
        selector.as_mut(),
        &options,
    );

    report(&outcome)
}

/// arrow-key list on a terminal, line prompt otherwise, optionally revealed
///
/// the reveal skips root commits, which the squash refuses right after
fn build_selector(args: &Cli, workspace: Option<&Workspace>) -> Box<dyn Selector> {
    let selector: Box<dyn Selector> = if args.prompt || !ui::is_interactive() {
        Box::new(PromptSelector)
    } else {
        Box::new(TerminalSelector::new(args.multi))
    };

    if args.no_reveal {
        return selector;
    }
    let revealing = Revealing::new(selector, Duration::from_millis(REVEAL_STEP_MS));
    match workspace {
        Some(workspace) => {
            let root = workspace.root().to_path_buf();
            let verbose = args.verbose;
            Box::new(revealing.only_if(move |id: &str| {
                git::has_parent(&GitRunner::new(verbose), id, &root)
            }))
        }
        None => Box::new(revealing),
    }
}

/// one notification per run, styled by how the run ended
fn report(outcome: &Outcome) -> Result<()> {
    match outcome {
        Outcome::Squashed { base, collapsed } => {
            let word = if *collapsed == 1 { "commit" } else { "commits" };
            status!("squashed {} {} into one, based on {}", collapsed, word, base);
            Ok(())
        }
        Outcome::WouldSquash { base, collapsed } => {
            let word = if *collapsed == 1 { "commit" } else { "commits" };
            status!(
                "dry run: would squash {} {} into one, based on {}",
                collapsed,
                word,
                base
            );
            Ok(())
        }
        Outcome::Aborted(abort @ Abort::SquashFailed(detail)) => {
            for line in detail.lines() {
                info!("  {}", line);
            }
            warning!("no rollback was attempted; check `git status` for staged changes");
            bail!("{abort}")
        }
        Outcome::Aborted(abort) => match abort.severity() {
            Severity::Silent => Ok(()),
            Severity::Info => {
                warning!("{}", abort);
                Ok(())
            }
            Severity::Error => bail!("{abort}"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_fails_only_for_error_severity() {
        let squashed = Outcome::Squashed {
            base: "b2b2b2b".to_string(),
            collapsed: 2,
        };
        assert!(report(&squashed).is_ok());
        assert!(report(&Outcome::Aborted(Abort::Cancelled)).is_ok());
        assert!(report(&Outcome::Aborted(Abort::NoLocalCommits)).is_ok());
        assert!(report(&Outcome::Aborted(Abort::DetachedHead)).is_err());
    }

    #[test]
    fn test_report_returns_squash_failure_as_error() {
        let outcome = Outcome::Aborted(Abort::SquashFailed(
            "Aborting commit due to empty commit message.".to_string(),
        ));
        let err = report(&outcome).unwrap_err();
        assert_eq!(err.to_string(), "error occurred while squashing");
    }
}

use crate::commit::{CommitList, parse_log};
use crate::runner::{ExecutionError, GitCommand, Runner};
use std::path::Path;

/// name of the checked-out branch, None when HEAD is detached
pub fn current_branch(runner: &impl Runner, dir: &Path) -> Option<String> {
    let command = GitCommand::new(["symbolic-ref", "--short", "HEAD"]);
    non_empty(runner.run(&command, dir).ok()?)
}

/// branch configured to track `branch`, None if there isn't one
pub fn upstream_branch(runner: &impl Runner, branch: &str, dir: &Path) -> Option<String> {
    let command = GitCommand::new([
        "rev-parse".to_string(),
        "--symbolic-full-name".to_string(),
        "--abbrev-ref".to_string(),
        format!("{branch}@{{upstream}}"),
    ]);
    non_empty(runner.run(&command, dir).ok()?)
}

/// commits on `branch` that `upstream` doesn't have, newest first
///
/// without an upstream every commit on the branch counts as local.
/// query failures yield an empty list.
pub fn local_commits(
    runner: &impl Runner,
    dir: &Path,
    upstream: Option<&str>,
    branch: &str,
) -> CommitList {
    let range = match upstream {
        Some(upstream) => format!("{upstream}..{branch}"),
        None => branch.to_string(),
    };
    // pin the oneline format against color, decorate and showSignature config
    let command = GitCommand::new([
        "log".to_string(),
        "--oneline".into(),
        "--no-color".into(),
        "--no-decorate".into(),
        "--no-show-signature".into(),
        range,
        "--".into(),
    ]);
    runner
        .run(&command, dir)
        .map(|output| parse_log(&output))
        .unwrap_or_default()
}

/// whether `commit_id` has at least one parent
///
/// fails closed: an id git can't resolve is treated as parentless
pub fn has_parent(runner: &impl Runner, commit_id: &str, dir: &Path) -> bool {
    let command = GitCommand::new(["rev-list", "--parents", "-n", "1", commit_id]);
    match runner.run(&command, dir) {
        // "<commit> <parent> <parent>..."
        Ok(output) => output.split_whitespace().count() > 1,
        Err(_) => false,
    }
}

/// collapse `base_id` and every commit after it into a single commit
///
/// moves the branch to the base's parent with all changes left staged, then
/// commits them with the base's message opened in the editor. there is no
/// rollback: if the commit step fails the changes stay staged.
pub fn squash(
    runner: &impl Runner,
    base_id: &str,
    dir: &Path,
    editor: Option<&str>,
) -> Result<(), ExecutionError> {
    let reset = GitCommand::new(["reset".to_string(), "--soft".into(), format!("{base_id}~1")]);
    runner.run(&reset, dir)?;

    let commit = GitCommand::new(["commit".to_string(), format!("--reedit-message={base_id}")])
        .with_editor(editor)
        .interactive();
    runner.run(&commit, dir)?;

    Ok(())
}

fn non_empty(output: String) -> Option<String> {
    let trimmed = output.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

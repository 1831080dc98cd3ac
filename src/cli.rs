use clap::Parser;
use std::path::PathBuf;

/// git-squash-local: collapse unpushed commits into one, from a base you pick
#[derive(Parser, Debug)]
#[command(name = "git-squash-local", about, long_about = None, version)]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// directory inside the working tree (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// editor for the final commit message (sets GIT_EDITOR)
    #[arg(long, value_name = "CMD")]
    pub editor: Option<String>,

    /// toggle rows with space; exactly one must be picked
    #[arg(long, conflicts_with = "prompt")]
    pub multi: bool,

    /// answer on a line prompt instead of the arrow-key list
    #[arg(long)]
    pub prompt: bool,

    /// skip showing which commits will be squashed
    #[arg(long)]
    pub no_reveal: bool,

    /// validate the chosen base but don't rewrite anything
    #[arg(long)]
    pub dry_run: bool,

    /// print every git command before running it
    #[arg(long, short)]
    pub verbose: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

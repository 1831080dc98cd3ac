use crate::constants::{EDITOR_ENV, GIT_BINARY};
use crate::debug;
use std::fmt;
use std::path::Path;
use std::process::{Command, Stdio};

/// a git invocation: arguments plus how the child should be wired up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitCommand {
    pub args: Vec<String>,
    pub editor: Option<String>,
    pub interactive: bool, // stdin/stdout stay attached to the terminal
}

impl GitCommand {
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            editor: None,
            interactive: false,
        }
    }

    /// override `GIT_EDITOR` for this command only
    pub fn with_editor(mut self, editor: Option<&str>) -> Self {
        self.editor = editor.map(str::to_string);
        self
    }

    pub fn interactive(mut self) -> Self {
        self.interactive = true;
        self
    }

    /// the argument list joined with spaces, without the `git` prefix
    pub fn key(&self) -> String {
        self.args.join(" ")
    }
}

impl fmt::Display for GitCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let words = std::iter::once(GIT_BINARY).chain(self.args.iter().map(String::as_str));
        match shlex::try_join(words) {
            Ok(line) => write!(f, "{line}"),
            Err(_) => write!(f, "{GIT_BINARY} {}", self.key()),
        }
    }
}

/// a git command failed to spawn or exited non-zero
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionError {
    pub message: String,
}

impl ExecutionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ExecutionError {}

/// runs git commands against a working tree
pub trait Runner {
    /// run `command` in `dir`, returning stdout with trailing whitespace trimmed
    fn run(&self, command: &GitCommand, dir: &Path) -> Result<String, ExecutionError>;
}

/// runs the real git binary found on PATH
#[derive(Debug, Default)]
pub struct GitRunner {
    verbose: bool,
}

impl GitRunner {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Runner for GitRunner {
    fn run(&self, command: &GitCommand, dir: &Path) -> Result<String, ExecutionError> {
        debug!(self.verbose, "$ {}", command);

        let mut child = Command::new(GIT_BINARY);
        child.args(&command.args).current_dir(dir);
        if let Some(editor) = &command.editor {
            child.env(EDITOR_ENV, editor);
        }
        if command.interactive {
            // the editor needs the terminal; only stderr is captured
            child
                .stdin(Stdio::inherit())
                .stdout(Stdio::inherit())
                .stderr(Stdio::piped());
        } else {
            child.stdin(Stdio::null());
        }

        let output = child
            .output()
            .map_err(|e| ExecutionError::new(format!("failed to run {command}: {e}")))?;

        if output.status.success() {
            let stdout = String::from_utf8_lossy(&output.stdout);
            return Ok(stdout.trim_end().to_string());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr = stderr.trim();
        if stderr.is_empty() {
            Err(ExecutionError::new(format!(
                "{command} exited with {}",
                output.status
            )))
        } else {
            Err(ExecutionError::new(stderr))
        }
    }
}

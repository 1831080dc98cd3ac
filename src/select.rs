use crate::commit::Commit;
use crate::constants::{NEWEST_NOTE, OLDEST_NOTE};
use crate::{info, warning};
use anyhow::{Context, Result};
use std::io::{self, Write};

/// what the user picked as the new base commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// exactly one commit, by id
    Chosen(String),
    /// the list was dismissed
    Cancelled,
    /// accepted with nothing picked
    Nothing,
    /// accepted with more than one commit picked
    Several(usize),
}

impl Selection {
    pub fn chosen(&self) -> Option<&str> {
        match self {
            Self::Chosen(id) => Some(id),
            _ => None,
        }
    }
}

/// presents commits and returns the user's choice
pub trait Selector {
    fn select(&mut self, commits: &[Commit]) -> Result<Selection>;
}

impl<S: Selector + ?Sized> Selector for Box<S> {
    fn select(&mut self, commits: &[Commit]) -> Result<Selection> {
        (**self).select(commits)
    }
}

/// enforce exactly-one over a set of picked row indices
pub fn resolve(commits: &[Commit], picked: &[usize]) -> Selection {
    let mut valid: Vec<usize> = picked
        .iter()
        .copied()
        .filter(|&idx| idx < commits.len())
        .collect();
    valid.sort_unstable();
    valid.dedup();

    match valid.as_slice() {
        [] => Selection::Nothing,
        [idx] => Selection::Chosen(commits[*idx].id.clone()),
        many => Selection::Several(many.len()),
    }
}

/// row label: id first, then summary, then the positional note if any
pub fn label(commits: &[Commit], idx: usize) -> String {
    let commit = &commits[idx];
    let mut text = if commit.summary.is_empty() {
        commit.id.clone()
    } else {
        format!("{} {}", commit.id, commit.summary)
    };
    let note = if idx == 0 {
        Some(NEWEST_NOTE)
    } else if idx + 1 == commits.len() {
        Some(OLDEST_NOTE)
    } else {
        None
    };
    if let Some(note) = note {
        text = format!("{text} ({note})");
    }
    text
}

/// arrow-key list in raw terminal mode
#[derive(Debug, Default)]
pub struct TerminalSelector {
    multi: bool, // space toggles rows, enter accepts the toggled set
}

impl TerminalSelector {
    pub fn new(multi: bool) -> Self {
        Self { multi }
    }
}

/// restores cooked mode however the list exits
struct RawMode;

impl RawMode {
    fn enable() -> Result<Self> {
        crossterm::terminal::enable_raw_mode()
            .context("this command requires an interactive terminal")?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        crossterm::terminal::disable_raw_mode().ok();
    }
}

/// one keypress, translated to what the list should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKey {
    Up,
    Down,
    Toggle,
    Accept,
    Cancel,
    Interrupt,
    Ignore,
}

fn list_key(event: &crossterm::event::KeyEvent) -> ListKey {
    use crossterm::event::{KeyCode, KeyEventKind, KeyModifiers};

    if event.kind == KeyEventKind::Release {
        return ListKey::Ignore;
    }
    match event.code {
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
            ListKey::Interrupt
        }
        KeyCode::Esc | KeyCode::Char('q') => ListKey::Cancel,
        KeyCode::Up | KeyCode::Char('k') => ListKey::Up,
        KeyCode::Down | KeyCode::Char('j') => ListKey::Down,
        KeyCode::Char(' ') => ListKey::Toggle,
        KeyCode::Enter => ListKey::Accept,
        _ => ListKey::Ignore,
    }
}

/// first row to show so that `cursor` stays inside a window of `height` rows
fn scroll(len: usize, cursor: usize, offset: usize, height: usize) -> usize {
    let height = height.max(1);
    let offset = if cursor < offset {
        cursor
    } else if cursor >= offset + height {
        cursor + 1 - height
    } else {
        offset
    };
    offset.min(len.saturating_sub(height))
}

/// cut `text` to `width` columns so a row never wraps
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    if width > 0 {
        cut.push('…');
    }
    cut
}

/// visible slice of the list and how many lines the last draw left behind
#[derive(Debug, Default)]
struct View {
    offset: usize,
    drawn: usize,
}

impl TerminalSelector {
    fn draw(
        &self,
        view: &mut View,
        rows: &[String],
        cursor: usize,
        picked: &[bool],
    ) -> Result<()> {
        use colored::Colorize;
        use crossterm::{
            cursor::MoveUp,
            queue,
            terminal::{self, Clear, ClearType},
        };

        // keep one line for the hint above the list
        let (width, height) = terminal::size().unwrap_or((80, 24));
        let height = usize::from(height).saturating_sub(1).max(1).min(rows.len());
        let width = usize::from(width).saturating_sub(1).max(1);
        view.offset = scroll(rows.len(), cursor, view.offset, height);

        let mut out = io::stdout();
        if view.drawn > 0 {
            queue!(out, MoveUp(u16::try_from(view.drawn).unwrap_or(u16::MAX)))?;
        }
        queue!(out, Clear(ClearType::FromCursorDown))?;

        for idx in view.offset..view.offset + height {
            let pointer = if idx == cursor { ">" } else { " " };
            let check = match (self.multi, picked[idx]) {
                (false, _) => "",
                (true, true) => "[x] ",
                (true, false) => "[ ] ",
            };
            let line = truncate(&format!("{pointer} {check}{}", rows[idx]), width);
            if idx == cursor {
                write!(out, "\r{}\r\n", line.cyan())?;
            } else {
                write!(out, "\r{line}\r\n")?;
            }
        }
        view.drawn = height;
        out.flush()?;
        Ok(())
    }
}

impl Selector for TerminalSelector {
    fn select(&mut self, commits: &[Commit]) -> Result<Selection> {
        use crossterm::event::{self, Event};

        let rows: Vec<String> = (0..commits.len()).map(|idx| label(commits, idx)).collect();
        let mut picked = vec![false; rows.len()];
        let mut cursor = 0;

        if self.multi {
            info!("pick the base commit (space to toggle, enter to accept, esc to cancel):");
        } else {
            info!("pick the base commit (enter to accept, esc to cancel):");
        }

        let raw = RawMode::enable()?;
        let mut view = View::default();
        let mut interrupted = false;
        self.draw(&mut view, &rows, cursor, &picked)?;

        let selection = loop {
            let Event::Key(key) = event::read().context("failed to read from terminal")? else {
                continue;
            };
            match list_key(&key) {
                ListKey::Up => cursor = cursor.saturating_sub(1),
                ListKey::Down => cursor = (cursor + 1).min(rows.len().saturating_sub(1)),
                ListKey::Toggle if self.multi => picked[cursor] = !picked[cursor],
                ListKey::Accept if self.multi => {
                    let indices: Vec<usize> = picked
                        .iter()
                        .enumerate()
                        .filter_map(|(idx, &on)| on.then_some(idx))
                        .collect();
                    break resolve(commits, &indices);
                }
                ListKey::Accept => break resolve(commits, &[cursor]),
                ListKey::Cancel => break Selection::Cancelled,
                ListKey::Interrupt => {
                    interrupted = true;
                    break Selection::Cancelled;
                }
                ListKey::Toggle | ListKey::Ignore => continue,
            }
            self.draw(&mut view, &rows, cursor, &picked)?;
        };

        drop(raw);
        if interrupted {
            info!("^C");
        }
        Ok(selection)
    }
}

/// numbered list answered on a plain line prompt, for non-terminal sessions
#[derive(Debug, Default)]
pub struct PromptSelector;

impl Selector for PromptSelector {
    fn select(&mut self, commits: &[Commit]) -> Result<Selection> {
        use rustyline::DefaultEditor;
        use rustyline::error::ReadlineError;

        for idx in 0..commits.len() {
            info!("{:>3}) {}", idx + 1, label(commits, idx));
        }

        let mut editor = DefaultEditor::new().context("failed to initialise line editor")?;
        match editor.readline("base commit (number or id, empty to cancel)? ") {
            Ok(answer) => Ok(parse_answer(&answer, commits)),
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => Ok(Selection::Cancelled),
            Err(e) => Err(e).context("failed to read selection"),
        }
    }
}

/// interpret a prompt answer: 1-based row numbers or id prefixes
pub fn parse_answer(answer: &str, commits: &[Commit]) -> Selection {
    let tokens: Vec<&str> = answer
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .collect();
    if tokens.is_empty() {
        return Selection::Cancelled;
    }

    let mut picked = Vec::with_capacity(tokens.len());
    for token in &tokens {
        match find_row(token, commits) {
            Some(idx) => picked.push(idx),
            None => {
                warning!("no commit matches '{}'", token);
                return Selection::Nothing;
            }
        }
    }
    resolve(commits, &picked)
}

fn find_row(token: &str, commits: &[Commit]) -> Option<usize> {
    if let Ok(number) = token.parse::<usize>()
        && (1..=commits.len()).contains(&number)
    {
        return Some(number - 1);
    }
    // an id prefix must match exactly one row
    let mut matches = commits
        .iter()
        .enumerate()
        .filter(|(_, c)| c.id.starts_with(token) || token.starts_with(c.id.as_str()));
    match (matches.next(), matches.next()) {
        (Some((idx, _)), None) => Some(idx),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn commits() -> Vec<Commit> {
        vec![
            Commit::new("c3c3c3c", "fix"),
            Commit::new("b2b2b2b", "add"),
            Commit::new("a1a1a1a", "init"),
        ]
    }

    #[test]
    fn test_labels_carry_positional_notes() {
        let commits = commits();
        assert_eq!(label(&commits, 0), "c3c3c3c fix (most recent)");
        assert_eq!(label(&commits, 1), "b2b2b2b add");
        assert_eq!(label(&commits, 2), "a1a1a1a init (oldest)");
    }

    #[test]
    fn test_single_commit_is_most_recent() {
        let commits = vec![Commit::new("a1a1a1a", "init")];
        assert_eq!(label(&commits, 0), "a1a1a1a init (most recent)");
    }

    #[test]
    fn test_label_keeps_id_as_first_token() {
        let commits = commits();
        for idx in 0..commits.len() {
            let row = label(&commits, idx);
            assert_eq!(row.split_whitespace().next(), Some(commits[idx].id.as_str()));
        }
    }

    #[test]
    fn test_resolve_enforces_exactly_one() {
        let commits = commits();
        assert_eq!(resolve(&commits, &[]), Selection::Nothing);
        assert_eq!(
            resolve(&commits, &[1]),
            Selection::Chosen("b2b2b2b".to_string())
        );
        assert_eq!(resolve(&commits, &[0, 2]), Selection::Several(2));
        // duplicates collapse, out-of-range rows are ignored
        assert_eq!(
            resolve(&commits, &[2, 2, 7]),
            Selection::Chosen("a1a1a1a".to_string())
        );
        assert_eq!(resolve(&commits, &[9]), Selection::Nothing);
    }

    #[test]
    fn test_resolve_only_returns_listed_ids() {
        let commits = commits();
        for picked in [vec![0], vec![1], vec![2], vec![3], vec![0, 1], vec![]] {
            if let Some(id) = resolve(&commits, &picked).chosen() {
                assert!(commits.iter().any(|c| c.id == id));
            }
        }
    }

    #[test]
    fn test_parse_answer_by_number_and_id() {
        let commits = commits();
        assert_eq!(
            parse_answer("2", &commits),
            Selection::Chosen("b2b2b2b".to_string())
        );
        assert_eq!(
            parse_answer(" a1a ", &commits),
            Selection::Chosen("a1a1a1a".to_string())
        );
        // a full-length hash also matches its abbreviation
        assert_eq!(
            parse_answer("c3c3c3c3c3c3c3c3", &commits),
            Selection::Chosen("c3c3c3c".to_string())
        );
    }

    #[test]
    fn test_parse_answer_edge_cases() {
        let commits = commits();
        assert_eq!(parse_answer("", &commits), Selection::Cancelled);
        assert_eq!(parse_answer("   ", &commits), Selection::Cancelled);
        assert_eq!(parse_answer("1 3", &commits), Selection::Several(2));
        assert_eq!(parse_answer("1,2,3", &commits), Selection::Several(3));
        assert_eq!(parse_answer("4", &commits), Selection::Nothing);
        assert_eq!(parse_answer("zzz", &commits), Selection::Nothing);
    }

    #[test]
    fn test_ambiguous_prefix_matches_nothing() {
        let commits = vec![Commit::new("abc1234", "one"), Commit::new("abc9999", "two")];
        assert_eq!(parse_answer("abc", &commits), Selection::Nothing);
        assert_eq!(
            parse_answer("abc9", &commits),
            Selection::Chosen("abc9999".to_string())
        );
    }

    #[test]
    fn test_list_keys() {
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);
        assert_eq!(list_key(&key(KeyCode::Up)), ListKey::Up);
        assert_eq!(list_key(&key(KeyCode::Char('j'))), ListKey::Down);
        assert_eq!(list_key(&key(KeyCode::Char(' '))), ListKey::Toggle);
        assert_eq!(list_key(&key(KeyCode::Enter)), ListKey::Accept);
        assert_eq!(list_key(&key(KeyCode::Char('x'))), ListKey::Ignore);
    }

    #[test]
    fn test_only_ctrl_c_interrupts() {
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);
        assert_eq!(list_key(&key(KeyCode::Esc)), ListKey::Cancel);
        assert_eq!(list_key(&key(KeyCode::Char('q'))), ListKey::Cancel);
        assert_eq!(list_key(&key(KeyCode::Char('c'))), ListKey::Ignore);
        assert_eq!(
            list_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            ListKey::Interrupt
        );
    }

    #[test]
    fn test_scroll_keeps_cursor_visible() {
        // everything fits
        assert_eq!(scroll(3, 2, 0, 10), 0);
        // cursor at the top of a long list
        assert_eq!(scroll(50, 0, 0, 10), 0);
        assert_eq!(scroll(50, 0, 20, 10), 0);
        // cursor moving within the window leaves it alone
        assert_eq!(scroll(50, 25, 20, 10), 20);
        // stepping past the bottom edge scrolls by one
        assert_eq!(scroll(50, 30, 20, 10), 21);
        // stepping above the top edge scrolls back
        assert_eq!(scroll(50, 19, 20, 10), 19);
        // cursor at the bottom of the list pins the last window
        assert_eq!(scroll(50, 49, 0, 10), 40);
        assert_eq!(scroll(50, 49, 45, 10), 40);
        // a zero-height terminal still shows the cursor row
        assert_eq!(scroll(50, 7, 0, 0), 7);
    }

    #[test]
    fn test_truncate_fits_width() {
        assert_eq!(truncate("> c3c3c3c fix", 20), "> c3c3c3c fix");
        assert_eq!(truncate("> c3c3c3c fix", 13), "> c3c3c3c fix");
        assert_eq!(truncate("> c3c3c3c fix", 8), "> c3c3c…");
        assert_eq!(truncate("> c3c3c3c fix", 8).chars().count(), 8);
        assert_eq!(truncate("héllo wörld", 6), "héllo…");
        assert_eq!(truncate("abc", 0), "");
    }
}

/// a single entry from `git log --oneline`
#[derive(Debug, Clone)]
pub struct Commit {
    pub id: String,      // abbreviated hash
    pub summary: String, // first line of the commit message
}

impl PartialEq for Commit {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Commit {}

impl Commit {
    pub fn new(id: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            summary: summary.into(),
        }
    }

    /// parse one oneline log entry; the id is always the first token
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let (id, summary) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        Some(Self::new(id, summary.trim_start()))
    }
}

/// newest-first list of commits, as printed by `git log`
pub type CommitList = Vec<Commit>;

/// parse the full output of `git log --oneline`
pub fn parse_log(output: &str) -> CommitList {
    output.lines().filter_map(Commit::parse).collect()
}

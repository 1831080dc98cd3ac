// selector labels
pub const NEWEST_NOTE: &str = "most recent";
pub const OLDEST_NOTE: &str = "oldest";

// reveal
pub const SQUASHED_NOTE: &str = "will be squashed";
pub const BASE_NOTE: &str = "final base commit";
pub const REVEAL_STEP_MS: u64 = 150;

// git
pub const GIT_BINARY: &str = "git";
pub const EDITOR_ENV: &str = "GIT_EDITOR";

// run lock, created inside the repository's git dir
pub const LOCK_FILE_NAME: &str = "squash-local.lock";

pub mod papers;
pub mod prompts;

/// Key under which the default archive repository path is persisted.
pub const REPO_PATH_KEY: &str = "medquiz_github_repo";

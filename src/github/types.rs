use serde::Deserialize;

/// Pull request metadata plus its changed files.
/// Constructed manually from two GitHub API responses: the pull endpoint
/// for metadata and the files endpoint for per-file patches.
#[derive(Debug, Clone)]
pub struct PullRequest {
    /// PR number (e.g., 42)
    pub number: u64,
    /// PR title
    pub title: String,
    /// Author's GitHub login
    pub author: String,
    /// Total files changed
    pub files_changed: usize,
    /// Total lines added
    pub additions: usize,
    /// Total lines deleted
    pub deletions: usize,
    /// Changed files with their patch bodies
    pub files: Vec<PrFile>,
}

/// One entry of the pulls files endpoint response.
#[derive(Debug, Clone, Deserialize)]
pub struct PrFile {
    /// File path (e.g., "src/auth/config.rs")
    pub filename: String,
    /// GitHub change status: "added", "removed", "modified", "renamed", ...
    pub status: String,
    /// Lines added in this file
    pub additions: usize,
    /// Lines deleted in this file
    pub deletions: usize,
    /// Unified-diff hunk body. Absent for binary or oversized files.
    pub patch: Option<String>,
}

/// Represents the parsed components of a GitHub PR URL.
#[derive(Debug, Clone)]
pub struct PrUrl {
    pub owner: String,
    pub repo: String,
    pub pr_number: u64,
}

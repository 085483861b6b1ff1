pub mod types;

pub use types::{PrFile, PrUrl, PullRequest};

use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub enum GithubError {
    #[error("GitHub API request failed: {0}")]
    ApiRequest(#[from] reqwest::Error),

    #[error("Invalid PR URL: {0}")]
    InvalidUrl(String),

    #[error("GitHub token not found in config or environment")]
    MissingToken,
}

/// Parse a GitHub PR URL into its component parts.
///
/// Expected format: https://github.com/{owner}/{repo}/pull/{number}
pub fn parse_pr_url(url: &str) -> Result<PrUrl, GithubError> {
    let parsed =
        reqwest::Url::parse(url).map_err(|_| GithubError::InvalidUrl(url.to_string()))?;

    if parsed.host_str() != Some("github.com") {
        return Err(GithubError::InvalidUrl(url.to_string()));
    }

    let segments: Vec<_> = parsed
        .path_segments()
        .ok_or_else(|| GithubError::InvalidUrl(url.to_string()))?
        .filter(|segment| !segment.is_empty())
        .collect();

    if segments.len() != 4 || segments[2] != "pull" {
        return Err(GithubError::InvalidUrl(url.to_string()));
    }

    let pr_number = segments[3]
        .parse::<u64>()
        .map_err(|_| GithubError::InvalidUrl(url.to_string()))?;

    Ok(PrUrl {
        owner: segments[0].to_string(),
        repo: segments[1].to_string(),
        pr_number,
    })
}

/// Fetch a complete PullRequest (metadata + changed files with patches)
/// from the GitHub API.
///
/// Two requests: GET /repos/{owner}/{repo}/pulls/{number} for metadata,
/// then the files endpoint, paginated at 100 entries per page. Each file
/// entry carries its patch body in the `patch` field; the diff parser
/// consumes those lazily at render time.
#[instrument(skip(config), fields(owner = %pr_url.owner, repo = %pr_url.repo, pr = pr_url.pr_number))]
pub async fn fetch_pull_request(
    pr_url: &PrUrl,
    config: &crate::config::Config,
) -> Result<PullRequest, GithubError> {
    let token = config.github_token().ok_or(GithubError::MissingToken)?;
    let client = reqwest::Client::new();
    let base_url = format!(
        "https://api.github.com/repos/{}/{}/pulls/{}",
        pr_url.owner, pr_url.repo, pr_url.pr_number
    );

    #[derive(serde::Deserialize)]
    struct User {
        login: String,
    }

    #[derive(serde::Deserialize)]
    struct PullResponse {
        number: u64,
        title: String,
        user: User,
        changed_files: usize,
        additions: usize,
        deletions: usize,
    }

    debug!("fetching PR metadata from GitHub API");
    let response = client
        .get(&base_url)
        .header("User-Agent", "pr-diff")
        .bearer_auth(&token)
        .send()
        .await?
        .error_for_status()?;

    let metadata = response.json::<PullResponse>().await?;
    debug!(title = %metadata.title, changed_files = metadata.changed_files, "received PR metadata");

    let mut files: Vec<PrFile> = Vec::new();
    let mut page = 1u32;
    loop {
        debug!(page, "fetching PR files from GitHub API");
        let batch = client
            .get(format!("{}/files", base_url))
            .header("User-Agent", "pr-diff")
            .bearer_auth(&token)
            .query(&[("per_page", "100"), ("page", &page.to_string())])
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<PrFile>>()
            .await?;

        let batch_len = batch.len();
        files.extend(batch);
        if batch_len < 100 {
            break;
        }
        page += 1;
    }
    debug!(files = files.len(), "received PR files");

    Ok(PullRequest {
        number: metadata.number,
        title: metadata.title,
        author: metadata.user.login,
        files_changed: metadata.changed_files,
        additions: metadata.additions,
        deletions: metadata.deletions,
        files,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_pr_url() {
        let url = parse_pr_url("https://github.com/org/repo/pull/42").unwrap();
        assert_eq!(url.owner, "org");
        assert_eq!(url.repo, "repo");
        assert_eq!(url.pr_number, 42);
    }

    #[test]
    fn test_parse_invalid_pr_url() {
        assert!(parse_pr_url("https://example.com").is_err());
        assert!(parse_pr_url("not-a-url").is_err());
        assert!(parse_pr_url("https://github.com/org/repo/pulls/42").is_err());
        assert!(parse_pr_url("https://github.com/org/repo/pull/abc").is_err());
    }
}

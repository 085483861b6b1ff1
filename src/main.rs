mod config;
mod diff;
mod github;
mod render;

use clap::Parser;
use render::{RenderOptions, ViewMode};
use std::path::PathBuf;
use tracing::{debug, info, info_span};
use tracing_subscriber::EnvFilter;

/// pr-diff — CLI tool that takes a GitHub Pull Request URL and renders its
/// diff in a unified or side-by-side view.
#[derive(Parser, Debug)]
#[command(name = "pr-diff", version, about)]
struct Cli {
    /// GitHub Pull Request URL (e.g., https://github.com/org/repo/pull/42)
    ///
    /// Not required when --mock is used.
    pr_url: Option<String>,

    /// View mode; defaults to the config file's [view] mode, else unified
    #[arg(short, long, value_enum)]
    view: Option<ViewMode>,

    /// Total output width for the split view
    #[arg(long)]
    width: Option<usize>,

    /// Only render files whose path contains this substring
    #[arg(short, long)]
    file: Option<String>,

    /// Optional output file path for a plain-text rendering
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Use a built-in mock PR for demo purposes (no GitHub token needed)
    #[arg(long)]
    r#mock: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    info!("loading configuration");
    let config = config::Config::load()?;

    let pull_request = if cli.r#mock {
        info!("using mock PR data for demo");
        build_mock_pr()
    } else {
        let pr_url = cli.pr_url.as_deref().ok_or(
            "PR URL is required unless --mock is used. Usage: pr-diff <URL> or pr-diff --mock",
        )?;

        let _main_span = info_span!("pr_diff", pr_url = %pr_url).entered();

        info!("parsing PR URL");
        let parsed_url = github::parse_pr_url(pr_url)?;
        debug!(owner = %parsed_url.owner, repo = %parsed_url.repo, pr = parsed_url.pr_number, "parsed PR URL");

        info!("fetching pull request from GitHub");
        let fetched = github::fetch_pull_request(&parsed_url, &config).await?;
        info!(files = fetched.files_changed, additions = fetched.additions, deletions = fetched.deletions, "fetched PR");
        fetched
    };

    let mode = match cli.view {
        Some(mode) => mode,
        None => match config.view.mode.as_deref() {
            Some("split") => ViewMode::Split,
            _ => ViewMode::Unified,
        },
    };
    let opts = RenderOptions {
        mode,
        width: cli.width.or(config.view.width).unwrap_or(120),
        file_filter: cli.file.clone(),
    };

    info!("rendering diff");
    render::output(&pull_request, &opts, cli.output.as_deref())?;
    info!("done");

    Ok(())
}

/// Build a mock PullRequest from the embedded patch fixtures. This
/// exercises the full parse/render pipeline without a GitHub token.
fn build_mock_pr() -> github::PullRequest {
    let fixtures = [
        (
            "src/main.rs",
            "modified",
            include_str!("../tests/fixtures/sample_main.patch"),
        ),
        (
            "README.md",
            "modified",
            include_str!("../tests/fixtures/sample_readme.patch"),
        ),
    ];

    let files: Vec<github::PrFile> = fixtures
        .into_iter()
        .map(|(filename, status, patch)| {
            let parsed = diff::parse_patch(Some(patch));
            github::PrFile {
                filename: filename.to_string(),
                status: status.to_string(),
                additions: parsed.total_additions,
                deletions: parsed.total_deletions,
                patch: Some(patch.to_string()),
            }
        })
        .collect();

    let additions: usize = files.iter().map(|f| f.additions).sum();
    let deletions: usize = files.iter().map(|f| f.deletions).sum();

    github::PullRequest {
        number: 42,
        title: "Accept a name argument in the greeter".to_string(),
        author: "alice".to_string(),
        files_changed: files.len(),
        additions,
        deletions,
        files,
    }
}

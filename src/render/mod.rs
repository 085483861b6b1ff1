use crate::diff::{
    flatten_hunks_to_lines, hunks_to_split_rows, parse_patch, DiffLine, DiffLineKind, SplitRow,
    SplitSide,
};
use crate::github::{PrFile, PullRequest};
use colored::Colorize;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to write diff file: {0}")]
    FileWrite(#[from] std::io::Error),
}

/// How a file's changes are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ViewMode {
    /// Single column with +/- markers
    Unified,
    /// Old and new content in two parallel columns
    Split,
}

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub mode: ViewMode,
    /// Total output width; the split view divides it between the columns.
    pub width: usize,
    /// Substring filter on file paths. None renders every file.
    pub file_filter: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            mode: ViewMode::Unified,
            width: 120,
            file_filter: None,
        }
    }
}

impl RenderOptions {
    fn selected_files<'a>(&self, pr: &'a PullRequest) -> Vec<&'a PrFile> {
        pr.files
            .iter()
            .filter(|f| match &self.file_filter {
                Some(pattern) => f.filename.contains(pattern.as_str()),
                None => true,
            })
            .collect()
    }
}

/// Render the PR diff to the terminal (default) or to a plain-text file.
#[instrument(skip(pr, opts), fields(pr = pr.number, mode = ?opts.mode))]
pub fn output(
    pr: &PullRequest,
    opts: &RenderOptions,
    output_path: Option<&Path>,
) -> Result<(), RenderError> {
    match output_path {
        None => {
            debug!("rendering diff to terminal");
            print_terminal_diff(pr, opts);
            Ok(())
        }
        Some(path) => {
            debug!(path = %path.display(), "writing diff to file");
            write_text_diff(pr, opts, path)
        }
    }
}

/// Colored terminal rendering.
fn print_terminal_diff(pr: &PullRequest, opts: &RenderOptions) {
    println!();
    println!("PR #{}: \"{}\"", pr.number, pr.title);
    println!(
        "Author: {} | Files changed: {} | {} {}",
        pr.author,
        pr.files_changed,
        format!("+{}", pr.additions).green(),
        format!("-{}", pr.deletions).red(),
    );

    for file in opts.selected_files(pr) {
        println!();
        println!(
            "{}",
            format!(
                "{} {} | +{} -{}",
                file.status, file.filename, file.additions, file.deletions
            )
            .bold()
        );

        let Some(patch) = file.patch.as_deref() else {
            println!("{}", "  (no text patch: binary or too large)".dimmed());
            continue;
        };

        let parsed = parse_patch(Some(patch));
        match opts.mode {
            ViewMode::Unified => {
                for line in flatten_hunks_to_lines(&parsed.hunks) {
                    print_unified_line(&line);
                }
            }
            ViewMode::Split => {
                let side_width = side_width(opts.width);
                for row in hunks_to_split_rows(&parsed.hunks) {
                    print_split_row(&row, side_width, opts.width);
                }
            }
        }
    }
    println!();
}

fn print_unified_line(line: &DiffLine) {
    match line.kind {
        DiffLineKind::Header => println!("{}", line.content.blue().bold()),
        DiffLineKind::Addition => println!(
            "{} {} {}",
            gutter(line.old_line).dimmed(),
            gutter(line.new_line).dimmed(),
            format!("+{}", line.content).green(),
        ),
        DiffLineKind::Deletion => println!(
            "{} {} {}",
            gutter(line.old_line).dimmed(),
            gutter(line.new_line).dimmed(),
            format!("-{}", line.content).red(),
        ),
        _ => println!(
            "{} {}  {}",
            gutter(line.old_line).dimmed(),
            gutter(line.new_line).dimmed(),
            line.content,
        ),
    }
}

fn print_split_row(row: &SplitRow, side_width: usize, total_width: usize) {
    if let Some(header) = &row.header {
        println!("{}", fit(header, total_width).blue().bold());
        return;
    }
    let left = fit(&side_text(&row.left), side_width);
    let right = fit(&side_text(&row.right), side_width);
    println!(
        "{} {} {}",
        colorize_side(&row.left, left),
        "│".dimmed(),
        colorize_side(&row.right, right),
    );
}

fn colorize_side(side: &SplitSide, text: String) -> colored::ColoredString {
    match side.kind {
        DiffLineKind::Addition => text.green(),
        DiffLineKind::Deletion => text.red(),
        DiffLineKind::Empty => text.dimmed(),
        _ => text.normal(),
    }
}

/// Uncolored rendering written to a file.
fn write_text_diff(pr: &PullRequest, opts: &RenderOptions, path: &Path) -> Result<(), RenderError> {
    let mut out = String::new();
    out.push_str(&format!("PR #{}: \"{}\"\n", pr.number, pr.title));
    out.push_str(&format!(
        "Author: {} | Files changed: {} | +{} -{}\n",
        pr.author, pr.files_changed, pr.additions, pr.deletions
    ));

    for file in opts.selected_files(pr) {
        out.push('\n');
        out.push_str(&format!(
            "{} {} | +{} -{}\n",
            file.status, file.filename, file.additions, file.deletions
        ));

        let Some(patch) = file.patch.as_deref() else {
            out.push_str("  (no text patch: binary or too large)\n");
            continue;
        };

        let parsed = parse_patch(Some(patch));
        match opts.mode {
            ViewMode::Unified => {
                for line in flatten_hunks_to_lines(&parsed.hunks) {
                    out.push_str(&unified_line_text(&line));
                    out.push('\n');
                }
            }
            ViewMode::Split => {
                let side_width = side_width(opts.width);
                for row in hunks_to_split_rows(&parsed.hunks) {
                    out.push_str(&split_row_text(&row, side_width));
                    out.push('\n');
                }
            }
        }
    }

    std::fs::write(path, out)?;
    Ok(())
}

fn unified_line_text(line: &DiffLine) -> String {
    match line.kind {
        DiffLineKind::Header => line.content.clone(),
        DiffLineKind::Addition => format!(
            "{} {} +{}",
            gutter(line.old_line),
            gutter(line.new_line),
            line.content
        ),
        DiffLineKind::Deletion => format!(
            "{} {} -{}",
            gutter(line.old_line),
            gutter(line.new_line),
            line.content
        ),
        _ => format!(
            "{} {}  {}",
            gutter(line.old_line),
            gutter(line.new_line),
            line.content
        ),
    }
}

fn split_row_text(row: &SplitRow, side_width: usize) -> String {
    match &row.header {
        Some(header) => header.clone(),
        None => format!(
            "{} │ {}",
            fit(&side_text(&row.left), side_width),
            fit(&side_text(&row.right), side_width),
        ),
    }
}

fn side_text(side: &SplitSide) -> String {
    if side.kind == DiffLineKind::Empty {
        String::new()
    } else {
        format!("{} {}", gutter(side.line_number), side.content)
    }
}

/// Four-character line-number column, blank when absent.
fn gutter(num: Option<usize>) -> String {
    match num {
        Some(n) => format!("{:>4}", n),
        None => "    ".to_string(),
    }
}

/// Column width for one side of the split view: total width minus the
/// 3-character separator, halved.
fn side_width(total: usize) -> usize {
    total.saturating_sub(3) / 2
}

/// Pad or truncate to exactly `width` characters.
fn fit(text: &str, width: usize) -> String {
    let mut out: String = text.chars().take(width).collect();
    let len = out.chars().count();
    out.extend(std::iter::repeat(' ').take(width - len));
    out
}

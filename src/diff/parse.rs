use super::types::{DiffHunk, DiffLine, ParsedDiff};

/// Parse a single file's unified-diff patch body into structured hunks.
///
/// The input is the hunk-level patch text GitHub returns in the `patch`
/// field of the pulls files endpoint: only `@@` headers and `+`/`-`/space
/// lines, no `diff --git` or `---`/`+++` file headers. `None` (binary or
/// oversized files) and empty strings yield an empty result.
///
/// This function never fails. Anything before the first hunk header and any
/// line with an unrecognized leading character is silently dropped, so a
/// partially malformed patch still produces a best-effort partial parse.
pub fn parse_patch(patch: Option<&str>) -> ParsedDiff {
    let Some(patch) = patch else {
        return ParsedDiff::default();
    };
    if patch.is_empty() {
        return ParsedDiff::default();
    }

    let mut hunks: Vec<DiffHunk> = Vec::new();
    let mut current: Option<DiffHunk> = None;
    let mut old_line = 0usize;
    let mut new_line = 0usize;
    let mut total_additions = 0usize;
    let mut total_deletions = 0usize;

    // split('\n') rather than lines(): a trailing empty segment is a real
    // (blank) hunk line and must keep consuming the counters.
    for line in patch.split('\n') {
        if let Some(range) = parse_hunk_header(line) {
            if let Some(hunk) = current.take() {
                hunks.push(hunk);
            }
            old_line = range.old_start;
            new_line = range.new_start;
            current = Some(DiffHunk {
                header: line.to_string(),
                old_start: range.old_start,
                old_count: range.old_count,
                new_start: range.new_start,
                new_count: range.new_count,
                lines: Vec::new(),
            });
            continue;
        }

        let Some(hunk) = current.as_mut() else {
            // Leading metadata before the first hunk header.
            continue;
        };

        if let Some(content) = line.strip_prefix('+') {
            hunk.lines.push(DiffLine::addition(content, new_line));
            new_line += 1;
            total_additions += 1;
        } else if let Some(content) = line.strip_prefix('-') {
            hunk.lines.push(DiffLine::deletion(content, old_line));
            old_line += 1;
            total_deletions += 1;
        } else if let Some(content) = line.strip_prefix(' ') {
            hunk.lines.push(DiffLine::context(content, old_line, new_line));
            old_line += 1;
            new_line += 1;
        } else if line.is_empty() {
            // Blank separator lines sometimes lose their leading space
            // marker; treat them as empty context.
            hunk.lines.push(DiffLine::context("", old_line, new_line));
            old_line += 1;
            new_line += 1;
        } else if line.starts_with('\\') {
            // "\ No newline at end of file" — no line, no counter movement.
        }
        // Any other leading character: dropped.
    }

    if let Some(hunk) = current.take() {
        hunks.push(hunk);
    }

    ParsedDiff {
        hunks,
        total_additions,
        total_deletions,
    }
}

struct HunkRange {
    old_start: usize,
    old_count: usize,
    new_start: usize,
    new_count: usize,
}

/// Match `@@ -<old_start>[,<old_count>] +<new_start>[,<new_count>] @@`,
/// tolerating a trailing section heading after the closing `@@`.
/// Returns None for anything that doesn't fit, so malformed headers fall
/// through to the drop path instead of failing the parse.
fn parse_hunk_header(line: &str) -> Option<HunkRange> {
    let rest = line.strip_prefix("@@ ")?;
    let (ranges, _) = rest.split_once(" @@")?;
    let (old_part, new_part) = ranges.split_once(' ')?;
    let (old_start, old_count) = parse_range(old_part.strip_prefix('-')?)?;
    let (new_start, new_count) = parse_range(new_part.strip_prefix('+')?)?;
    Some(HunkRange {
        old_start,
        old_count,
        new_start,
        new_count,
    })
}

/// Parse `start[,count]`; count defaults to 1 when omitted, per the
/// unified-diff convention.
fn parse_range(range: &str) -> Option<(usize, usize)> {
    match range.split_once(',') {
        Some((start, count)) => Some((start.parse().ok()?, count.parse().ok()?)),
        None => Some((range.parse().ok()?, 1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::types::DiffLineKind;

    const SAMPLE_PATCH: &str = "@@ -1,3 +1,4 @@\n line1\n-line2\n+line2modified\n+line3new\n line4";

    #[test]
    fn test_parse_none_is_empty() {
        let parsed = parse_patch(None);
        assert!(parsed.hunks.is_empty());
        assert_eq!(parsed.total_additions, 0);
        assert_eq!(parsed.total_deletions, 0);
    }

    #[test]
    fn test_parse_empty_string_is_empty() {
        assert_eq!(parse_patch(Some("")), ParsedDiff::default());
    }

    #[test]
    fn test_parse_single_hunk() {
        let parsed = parse_patch(Some(SAMPLE_PATCH));
        assert_eq!(parsed.hunks.len(), 1);

        let hunk = &parsed.hunks[0];
        assert_eq!(hunk.old_start, 1);
        assert_eq!(hunk.old_count, 3);
        assert_eq!(hunk.new_start, 1);
        assert_eq!(hunk.new_count, 4);
        assert_eq!(
            hunk.lines,
            vec![
                DiffLine::context("line1", 1, 1),
                DiffLine::deletion("line2", 2),
                DiffLine::addition("line2modified", 2),
                DiffLine::addition("line3new", 3),
                DiffLine::context("line4", 3, 4),
            ]
        );
        assert_eq!(parsed.total_additions, 2);
        assert_eq!(parsed.total_deletions, 1);
    }

    #[test]
    fn test_totals_match_line_tally() {
        let parsed = parse_patch(Some(SAMPLE_PATCH));
        let added = parsed
            .hunks
            .iter()
            .flat_map(|h| &h.lines)
            .filter(|l| l.kind == DiffLineKind::Addition)
            .count();
        let deleted = parsed
            .hunks
            .iter()
            .flat_map(|h| &h.lines)
            .filter(|l| l.kind == DiffLineKind::Deletion)
            .count();
        assert_eq!(parsed.total_additions, added);
        assert_eq!(parsed.total_deletions, deleted);
    }

    #[test]
    fn test_multiple_hunks() {
        let patch = "@@ -1,2 +1,2 @@\n a\n-b\n+B\n@@ -10,2 +10,2 @@\n c\n-d\n+D";
        let parsed = parse_patch(Some(patch));
        assert_eq!(parsed.hunks.len(), 2);
        assert_eq!(parsed.hunks[1].old_start, 10);
        assert_eq!(parsed.hunks[1].lines[1], DiffLine::deletion("d", 11));
        assert_eq!(parsed.hunks[1].lines[2], DiffLine::addition("D", 11));
        assert_eq!(parsed.total_additions, 2);
        assert_eq!(parsed.total_deletions, 2);
    }

    #[test]
    fn test_header_without_counts_defaults_to_one() {
        let parsed = parse_patch(Some("@@ -10 +10 @@\n-old\n+new"));
        let hunk = &parsed.hunks[0];
        assert_eq!(hunk.old_start, 10);
        assert_eq!(hunk.old_count, 1);
        assert_eq!(hunk.new_start, 10);
        assert_eq!(hunk.new_count, 1);
    }

    #[test]
    fn test_header_with_section_heading() {
        let parsed = parse_patch(Some("@@ -4,6 +4,7 @@ fn main() {\n context"));
        let hunk = &parsed.hunks[0];
        assert_eq!(hunk.header, "@@ -4,6 +4,7 @@ fn main() {");
        assert_eq!(hunk.old_start, 4);
        assert_eq!(hunk.new_count, 7);
    }

    #[test]
    fn test_leading_metadata_is_dropped() {
        let patch = "index abc1234..def5678 100644\n--- a/src/main.rs\n+++ b/src/main.rs\n@@ -1,1 +1,1 @@\n-a\n+b";
        let parsed = parse_patch(Some(patch));
        assert_eq!(parsed.hunks.len(), 1);
        assert_eq!(parsed.hunks[0].lines.len(), 2);
        assert_eq!(parsed.total_additions, 1);
        assert_eq!(parsed.total_deletions, 1);
    }

    #[test]
    fn test_no_newline_marker_is_ignored() {
        let patch = "@@ -1,2 +1,2 @@\n a\n-b\n+c\n\\ No newline at end of file";
        let parsed = parse_patch(Some(patch));
        let hunk = &parsed.hunks[0];
        assert_eq!(hunk.lines.len(), 3);
        // Counters unperturbed: the addition after the context line still
        // lands on new line 2.
        assert_eq!(hunk.lines[2], DiffLine::addition("c", 2));
    }

    #[test]
    fn test_blank_line_without_marker_is_context() {
        let patch = "@@ -1,3 +1,3 @@\n a\n\n b";
        let parsed = parse_patch(Some(patch));
        let hunk = &parsed.hunks[0];
        assert_eq!(hunk.lines[1], DiffLine::context("", 2, 2));
        // Both counters consumed by the blank line.
        assert_eq!(hunk.lines[2], DiffLine::context("b", 3, 3));
    }

    #[test]
    fn test_unrecognized_prefix_is_dropped() {
        let patch = "@@ -1,2 +1,2 @@\n a\n? what\n b";
        let parsed = parse_patch(Some(patch));
        let hunk = &parsed.hunks[0];
        assert_eq!(hunk.lines.len(), 2);
        assert_eq!(hunk.lines[1], DiffLine::context("b", 2, 2));
    }

    #[test]
    fn test_malformed_header_before_first_hunk_is_dropped() {
        let parsed = parse_patch(Some("@@ not a header\n+x"));
        assert!(parsed.hunks.is_empty());
        assert_eq!(parsed.total_additions, 0);
    }

    #[test]
    fn test_parse_is_deterministic() {
        assert_eq!(parse_patch(Some(SAMPLE_PATCH)), parse_patch(Some(SAMPLE_PATCH)));
    }

    #[test]
    fn test_trailing_newline_yields_blank_context_line() {
        let parsed = parse_patch(Some("@@ -1,1 +1,1 @@\n a\n"));
        let hunk = &parsed.hunks[0];
        assert_eq!(hunk.lines.len(), 2);
        assert_eq!(hunk.lines[1], DiffLine::context("", 2, 2));
    }
}

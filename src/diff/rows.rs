use super::types::{DiffHunk, DiffLine, DiffLineKind, SplitRow, SplitSide};

/// Project hunks into the flat line sequence the unified view renders: one
/// synthetic header line per hunk followed by the hunk's lines in document
/// order. Output length is always `hunks.len()` plus the total line count.
pub fn flatten_hunks_to_lines(hunks: &[DiffHunk]) -> Vec<DiffLine> {
    let total: usize = hunks.iter().map(|h| h.lines.len()).sum();
    let mut lines = Vec::with_capacity(hunks.len() + total);
    for hunk in hunks {
        lines.push(DiffLine::header(&hunk.header));
        lines.extend(hunk.lines.iter().cloned());
    }
    lines
}

/// Project hunks into side-by-side rows.
///
/// Context lines mirror onto both sides of one row. A maximal run of
/// consecutive deletions paired with the addition run that immediately
/// follows it is aligned index-wise, padding the shorter run with Empty
/// cells; this approximates a replace edit as before/after pairs without
/// any content-based alignment. Additions with no preceding deletions get
/// an Empty left side. No line is ever dropped or merged.
pub fn hunks_to_split_rows(hunks: &[DiffHunk]) -> Vec<SplitRow> {
    let mut rows = Vec::new();
    for hunk in hunks {
        rows.push(SplitRow::header_row(&hunk.header));

        let lines = &hunk.lines;
        let mut i = 0;
        while i < lines.len() {
            match lines[i].kind {
                DiffLineKind::Deletion => {
                    let del_start = i;
                    while i < lines.len() && lines[i].kind == DiffLineKind::Deletion {
                        i += 1;
                    }
                    let deletions = &lines[del_start..i];

                    let add_start = i;
                    while i < lines.len() && lines[i].kind == DiffLineKind::Addition {
                        i += 1;
                    }
                    let additions = &lines[add_start..i];

                    for j in 0..deletions.len().max(additions.len()) {
                        rows.push(SplitRow {
                            header: None,
                            left: deletions.get(j).map(left_side).unwrap_or_default(),
                            right: additions.get(j).map(right_side).unwrap_or_default(),
                        });
                    }
                }
                DiffLineKind::Addition => {
                    rows.push(SplitRow {
                        header: None,
                        left: SplitSide::default(),
                        right: right_side(&lines[i]),
                    });
                    i += 1;
                }
                _ => {
                    let line = &lines[i];
                    rows.push(SplitRow {
                        header: None,
                        left: SplitSide {
                            kind: DiffLineKind::Context,
                            content: line.content.clone(),
                            line_number: line.old_line,
                        },
                        right: SplitSide {
                            kind: DiffLineKind::Context,
                            content: line.content.clone(),
                            line_number: line.new_line,
                        },
                    });
                    i += 1;
                }
            }
        }
    }
    rows
}

fn left_side(line: &DiffLine) -> SplitSide {
    SplitSide {
        kind: line.kind,
        content: line.content.clone(),
        line_number: line.old_line,
    }
}

fn right_side(line: &DiffLine) -> SplitSide {
    SplitSide {
        kind: line.kind,
        content: line.content.clone(),
        line_number: line.new_line,
    }
}

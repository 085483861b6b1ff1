/// Classification of a single diff line or split-view cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffLineKind {
    Addition,
    Deletion,
    Context,
    Header,
    Empty,
}

/// One line of parsed diff content with its reconstructed line numbers.
///
/// Exactly one of `old_line`/`new_line` is present for additions and
/// deletions, both for context lines, neither for header and empty lines.
/// The constructors below are the only way the parser builds these, so the
/// shape holds by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    pub kind: DiffLineKind,
    /// Line text with the leading diff marker stripped. Empty for headers.
    pub content: String,
    pub old_line: Option<usize>,
    pub new_line: Option<usize>,
}

impl DiffLine {
    pub fn addition(content: &str, new_line: usize) -> Self {
        Self {
            kind: DiffLineKind::Addition,
            content: content.to_string(),
            old_line: None,
            new_line: Some(new_line),
        }
    }

    pub fn deletion(content: &str, old_line: usize) -> Self {
        Self {
            kind: DiffLineKind::Deletion,
            content: content.to_string(),
            old_line: Some(old_line),
            new_line: None,
        }
    }

    pub fn context(content: &str, old_line: usize, new_line: usize) -> Self {
        Self {
            kind: DiffLineKind::Context,
            content: content.to_string(),
            old_line: Some(old_line),
            new_line: Some(new_line),
        }
    }

    pub fn header(text: &str) -> Self {
        Self {
            kind: DiffLineKind::Header,
            content: text.to_string(),
            old_line: None,
            new_line: None,
        }
    }
}

/// A contiguous changed region bounded by an `@@ ... @@` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffHunk {
    /// Raw header text, including any trailing section heading.
    pub header: String,
    /// Starting line number in the old file
    pub old_start: usize,
    /// Number of lines in the old file
    pub old_count: usize,
    /// Starting line number in the new file
    pub new_start: usize,
    /// Number of lines in the new file
    pub new_count: usize,
    /// Lines of the hunk in document order
    pub lines: Vec<DiffLine>,
}

/// Parse result for one file's patch body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDiff {
    pub hunks: Vec<DiffHunk>,
    pub total_additions: usize,
    pub total_deletions: usize,
}

/// One cell of a side-by-side row. The default value is the Empty filler
/// cell used when a deletion or addition has no counterpart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitSide {
    pub kind: DiffLineKind,
    pub content: String,
    pub line_number: Option<usize>,
}

impl Default for SplitSide {
    fn default() -> Self {
        Self {
            kind: DiffLineKind::Empty,
            content: String::new(),
            line_number: None,
        }
    }
}

/// One row of the side-by-side view. `header` is set for hunk-boundary
/// rows, in which case both sides are Empty. The pairing policy guarantees
/// the left side never carries an addition and the right side never carries
/// a deletion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitRow {
    pub header: Option<String>,
    pub left: SplitSide,
    pub right: SplitSide,
}

impl SplitRow {
    pub fn header_row(text: &str) -> Self {
        Self {
            header: Some(text.to_string()),
            ..Self::default()
        }
    }

    pub fn is_header(&self) -> bool {
        self.header.is_some()
    }
}

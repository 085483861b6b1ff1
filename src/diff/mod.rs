//! Unified-diff parsing and view-model projections.
//!
//! Everything in this module is a pure function over patch text: parsing
//! never fails, and the two projections (`flatten_hunks_to_lines` for the
//! unified view, `hunks_to_split_rows` for the side-by-side view) allocate
//! fresh result trees owned by the caller.

pub mod parse;
pub mod rows;
pub mod types;

pub use parse::parse_patch;
pub use rows::{flatten_hunks_to_lines, hunks_to_split_rows};
pub use types::{DiffHunk, DiffLine, DiffLineKind, ParsedDiff, SplitRow, SplitSide};

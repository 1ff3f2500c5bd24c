//! Row-shape-consistent section scanning.
//!
//! LAMMPS section blocks carry no explicit end marker the codecs can rely on, so a
//! section is taken to extend for as long as its rows keep the token count of the
//! first row. The scan stops at the first row whose width differs, at a blank line,
//! or at end of input. A corrupted row that happens to keep the same width is not
//! detected here; it surfaces later, if at all, when its tokens are decoded.

use crate::core::io::lines::strip_comment;
use std::io;

/// One row of a section block, tokenized after comment stripping.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    /// 1-based line number of the row in the input.
    pub line: usize,
    pub tokens: Vec<String>,
}

impl RawRow {
    pub fn width(&self) -> usize {
        self.tokens.len()
    }
}

/// Collects the rows of one section from `lines`, which must start at the first row.
///
/// Lines after the terminating one are left unread when `lines` is lazy.
pub fn scan_rows<I>(lines: I) -> io::Result<Vec<RawRow>>
where
    I: IntoIterator<Item = io::Result<(usize, String)>>,
{
    let mut rows = Vec::new();
    let mut width = None;

    for item in lines {
        let (line, text) = item?;
        let tokens: Vec<String> = strip_comment(&text)
            .split_whitespace()
            .map(str::to_string)
            .collect();

        if tokens.is_empty() {
            break;
        }
        match width {
            None => width = Some(tokens.len()),
            Some(w) if w != tokens.len() => break,
            Some(_) => {}
        }

        rows.push(RawRow { line, tokens });
    }

    Ok(rows)
}

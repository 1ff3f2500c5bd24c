use std::io::{self, BufRead};

/// Iterates over the lines of a reader together with their 1-based line numbers.
///
/// Line terminators (`\n` or `\r\n`) are removed. The current line number stays
/// available after iteration ends, which lets truncation errors point at the last
/// line that was actually read.
pub(crate) struct NumberedLines<'a, R: BufRead + ?Sized> {
    reader: &'a mut R,
    line: usize,
}

impl<'a, R: BufRead + ?Sized> NumberedLines<'a, R> {
    pub(crate) fn new(reader: &'a mut R) -> Self {
        Self { reader, line: 0 }
    }

    /// Number of the last line returned (0 before the first read).
    pub(crate) fn line_number(&self) -> usize {
        self.line
    }
}

impl<R: BufRead + ?Sized> Iterator for NumberedLines<'_, R> {
    type Item = io::Result<(usize, String)>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut buf = String::new();
        match self.reader.read_line(&mut buf) {
            Ok(0) => None,
            Ok(_) => {
                if buf.ends_with('\n') {
                    buf.pop();
                    if buf.ends_with('\r') {
                        buf.pop();
                    }
                }
                self.line += 1;
                Some(Ok((self.line, buf)))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

/// Removes everything from the first `#` onward. A line without `#` is returned whole.
pub(crate) fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn numbered_lines_strips_terminators_and_counts() {
        let mut cursor = Cursor::new("first\r\nsecond\nthird");
        let mut lines = NumberedLines::new(&mut cursor);

        let collected: Vec<_> = lines.by_ref().map(Result::unwrap).collect();
        assert_eq!(
            collected,
            [
                (1, "first".to_string()),
                (2, "second".to_string()),
                (3, "third".to_string())
            ]
        );
        assert_eq!(lines.line_number(), 3);
    }

    #[test]
    fn strip_comment_keeps_comment_free_line_whole() {
        assert_eq!(strip_comment("1 2 3 4"), "1 2 3 4");
    }

    #[test]
    fn strip_comment_drops_trailing_comment() {
        assert_eq!(strip_comment("1 12.011 # C"), "1 12.011 ");
        assert_eq!(strip_comment("Atoms # full"), "Atoms ");
        assert_eq!(strip_comment("# only a comment"), "");
    }
}

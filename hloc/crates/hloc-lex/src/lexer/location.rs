//! Line/column lookup.
//!
//! Locations are byte positions into the lexer's buffer. Lines are 1-based.
//! A column is the byte distance from the last newline before the position,
//! so the first byte of every line after the first is column 1. The first
//! line has no preceding newline and its columns are plain buffer offsets,
//! starting at 0.
//!
//! Parsers usually ask for locations in increasing order, so the lexer
//! remembers the last position it resolved and resumes the newline count
//! from there when the next query lies at or after it.

use hloc_util::{BufferError, BufferPos, BufferResult, TypeNameResolver};

use crate::Lexer;

/// Returned by [`Lexer::line`] for positions outside the buffer.
pub const LINE_OUT_OF_RANGE: &str = "LINE OUT OF RANGE";

/// Memo of the last resolved location.
#[derive(Clone, Debug, Default)]
pub(crate) struct LineNoCache {
    pub(crate) last_query: Option<BufferPos>,
    pub(crate) line_no_of_query: usize,
}

impl<R: TypeNameResolver> Lexer<R> {
    /// Returns the `(line, column)` of `location`.
    ///
    /// Columns on the first line start at 0, on later lines at 1. The
    /// one-past-the-end position is accepted so the location of an `Eof`
    /// token can be reported.
    ///
    /// # Errors
    ///
    /// [`BufferError::CrossBuffer`] if `location` belongs to another buffer,
    /// [`BufferError::OutOfRange`] if it lies past the end of this one.
    ///
    /// # Example
    ///
    /// ```
    /// use hloc_lex::{Lexer, TokKind};
    ///
    /// let mut lexer = Lexer::new("HloModule m\nENTRY %e");
    /// while lexer.lex() != TokKind::KwEntry {}
    /// let loc = lexer.loc();
    /// assert_eq!(lexer.line_and_column(&loc), Ok((2, 1)));
    ///
    /// let start = lexer.source().begin();
    /// assert_eq!(lexer.line_and_column(&start), Ok((1, 0)));
    /// ```
    pub fn line_and_column(&mut self, location: &BufferPos) -> BufferResult<(usize, usize)> {
        if !location.same_buffer(&self.cursor) {
            return Err(BufferError::CrossBuffer);
        }
        let target = location.offset();
        let bytes = self.buf.as_bytes();
        if target > bytes.len() {
            return Err(BufferError::OutOfRange {
                offset: target,
                len: bytes.len(),
            });
        }

        let (from, line_base) = match &self.line_cache.last_query {
            Some(last) if last.can_deref() && last.offset() <= target => {
                (last.offset(), self.line_cache.line_no_of_query)
            },
            _ => (0, 1),
        };
        let line_no = line_base + count_newlines(&bytes[from..target]);

        let column = bytes[..target]
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(target, |nl| target - nl);

        self.line_cache = LineNoCache {
            last_query: Some(location.unbounded()),
            line_no_of_query: line_no,
        };

        Ok((line_no, column))
    }

    /// Returns the whole line containing `location`, without its newline.
    ///
    /// A position on a `\n` belongs to the line that newline ends. Positions
    /// that do not point at a byte of this buffer yield
    /// [`LINE_OUT_OF_RANGE`].
    pub fn line(&self, location: &BufferPos) -> &str {
        if !location.same_buffer(&self.cursor) || !location.can_deref() {
            return LINE_OUT_OF_RANGE;
        }
        let text = self.buf.as_str();
        let bytes = text.as_bytes();
        let target = location.offset();

        let start = bytes[..target]
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |nl| nl + 1);
        let end = bytes[target..]
            .iter()
            .position(|&b| b == b'\n')
            .map_or(bytes.len(), |nl| target + nl);

        text.get(start..end).unwrap_or(LINE_OUT_OF_RANGE)
    }
}

#[inline]
fn count_newlines(bytes: &[u8]) -> usize {
    bytes.iter().filter(|&&b| b == b'\n').count()
}

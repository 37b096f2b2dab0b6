//! Comment skipping.
//!
//! Both skippers are entered with the cursor on the second character of
//! the opener (`*` or `/`) and return `false` when the comment turns the
//! current token into an error.

use hloc_util::TypeNameResolver;

use super::core::Peeked;
use crate::Lexer;

impl<R: TypeNameResolver> Lexer<R> {
    /// Skips a `/* ... */` comment. Block comments do not nest.
    ///
    /// On an unterminated comment the cursor is moved back to the `*` of
    /// the opener, so a caller stuck on the error sees it there.
    pub(super) fn skip_block_comment(&mut self) -> bool {
        let comment_start = self.cursor.offset();
        self.cursor.advance(1);

        loop {
            match self.get_next_char() {
                Peeked::Char(b'*') if self.peek_is(b'/') => {
                    self.cursor.advance(1);
                    return true;
                },
                Peeked::Char(_) => {},
                Peeked::Eof => {
                    tracing::debug!(offset = comment_start - 1, "unterminated block comment");
                    self.cursor.set_offset(comment_start);
                    return false;
                },
                Peeked::Invalid => return false,
            }
        }
    }

    /// Skips a `//` comment up to, not including, the end of the line.
    ///
    /// The line terminator stays in the buffer and is skipped as
    /// whitespace, which keeps `\n` and `\r\n` endings alike.
    pub(super) fn skip_line_comment(&mut self) -> bool {
        loop {
            match self.peek_current_char() {
                Peeked::Eof | Peeked::Char(b'\n' | b'\r') => return true,
                Peeked::Invalid => return false,
                Peeked::Char(_) => self.cursor.advance(1),
            }
        }
    }
}

//! One-token lookahead.

use hloc_util::TypeNameResolver;

use crate::token::TokKind;
use crate::Lexer;

impl<R: TypeNameResolver> Lexer<R> {
    /// Returns the kind of the token after the current one without
    /// consuming it.
    ///
    /// The current token, the cursor and the line cache are left as they
    /// were. After an `Eof` or `Error` token nothing follows, so that kind is
    /// returned again.
    ///
    /// # Example
    ///
    /// ```
    /// use hloc_lex::{Lexer, TokKind};
    ///
    /// let mut lexer = Lexer::new("ROOT %c");
    /// assert_eq!(lexer.lex(), TokKind::KwRoot);
    /// assert_eq!(lexer.look_ahead(), TokKind::Name);
    /// assert_eq!(lexer.kind(), TokKind::KwRoot);
    /// assert_eq!(lexer.lex(), TokKind::Name);
    /// ```
    pub fn look_ahead(&mut self) -> TokKind {
        if self.started && self.kind().is_terminal() {
            return self.kind();
        }
        let saved = self.cursor.clone();
        let kind = self.lex_token().kind();
        self.cursor = saved;
        kind
    }
}

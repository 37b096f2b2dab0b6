//! Locate command implementation.
//!
//! Maps a byte offset to its line and column, and shows the line with a
//! caret and the token that covers the offset.

use std::io::Write;
use std::path::PathBuf;

use hloc_lex::{Lexer, TokKind};

use crate::commands::common::{caret_line, index_in_line, read_source};
use crate::error::Result;

/// Arguments for the locate command.
#[derive(Debug, Clone, Default)]
pub struct LocateArgs {
    /// Enable verbose output.
    pub verbose: bool,
    /// Input file, `-` for standard input.
    pub input: PathBuf,
    /// Byte offset to look up.
    pub offset: usize,
}

/// What a byte offset points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// 1-based line
    pub line: usize,
    /// Column as reported by the lexer; first-line columns start at 0
    pub column: usize,
    /// Byte index of the offset within `text`
    pub index: usize,
    /// Full text of the line, without its newline
    pub text: String,
    /// Kind and lexeme of the token spanning the offset, if any
    pub token: Option<(TokKind, String)>,
}

/// Resolves `offset` inside `source`.
pub fn locate(source: &str, offset: usize) -> Result<Location> {
    let mut lexer = Lexer::new(source);
    let pos = lexer.source().pos(offset);
    let (line, column) = lexer.line_and_column(&pos)?;
    let text = lexer.line(&pos).to_string();

    let mut token = None;
    while !lexer.lex().is_terminal() {
        let tok = lexer.token();
        if tok.start().offset() > offset {
            break;
        }
        if offset < tok.end_offset() {
            token = Some((tok.kind(), tok.lexeme().to_string()));
            break;
        }
    }

    Ok(Location {
        line,
        column,
        index: index_in_line(source, offset),
        text,
        token,
    })
}

/// Writes a location report to `out`.
pub fn write_location<W: Write>(out: &mut W, location: &Location) -> Result<()> {
    writeln!(out, "{}:{}", location.line, location.column)?;
    writeln!(out, "  {}", location.text)?;
    writeln!(out, "  {}", caret_line(&location.text, location.index))?;
    if let Some((kind, lexeme)) = &location.token {
        writeln!(out, "token\t{}\t{:?}", kind, lexeme)?;
    }
    Ok(())
}

/// Locate command handler.
pub struct LocateCommand {
    args: LocateArgs,
}

impl LocateCommand {
    /// Create a new LocateCommand.
    pub fn new(args: LocateArgs) -> Self {
        Self { args }
    }

    /// Execute the command.
    pub fn run(&self) -> Result<()> {
        let source = read_source(&self.args.input)?;
        let location = locate(&source, self.args.offset)?;
        if self.args.verbose {
            tracing::info!(
                offset = self.args.offset,
                line = location.line,
                column = location.column,
                "resolved offset"
            );
        }

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        write_location(&mut out, &location)?;
        out.flush()?;
        Ok(())
    }
}

/// Run the locate command with the given arguments.
pub fn run_locate(args: LocateArgs) -> Result<()> {
    LocateCommand::new(args).run()
}

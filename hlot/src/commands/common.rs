//! Common types and utilities for hlot commands.
//!
//! This module provides shared types and helpers used by the command
//! implementations: the output format, input reading and diagnostics.

use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use crate::error::{HlotError, Result};

// ============================================================================
// Output Format
// ============================================================================

/// Supported output formats for token dumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One human-readable line per token
    Text,
    /// One JSON object per line
    Json,
}

impl FromStr for OutputFormat {
    type Err = HlotError;

    /// Parses a format name, case-insensitive.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" | "jsonl" => Ok(Self::Json),
            other => Err(HlotError::Validation(format!(
                "Unknown output format: {} (expected text or json)",
                other
            ))),
        }
    }
}

// ============================================================================
// Input
// ============================================================================

/// Path argument that selects standard input.
pub const STDIN_PATH: &str = "-";

/// Reads the whole input, from standard input when `path` is `-`.
pub fn read_source(path: &Path) -> Result<String> {
    if path.as_os_str() == STDIN_PATH {
        let mut source = String::new();
        std::io::stdin().read_to_string(&mut source)?;
        return Ok(source);
    }

    if !path.is_file() {
        return Err(HlotError::Validation(format!(
            "Input path is not a file: {}",
            path.display()
        )));
    }
    Ok(std::fs::read_to_string(path)?)
}

// ============================================================================
// Diagnostics
// ============================================================================

/// Byte index of `offset` within its line, counted from the byte after the
/// previous newline. Offsets past the end are clamped to the end.
pub fn index_in_line(source: &str, offset: usize) -> usize {
    let offset = offset.min(source.len());
    let line_start = source.as_bytes()[..offset]
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |nl| nl + 1);
    offset - line_start
}

/// Builds the marker line that puts a `^` under byte `index` of `line`.
///
/// An index inside a multi-byte character moves back to the start of that
/// character. Tabs before the caret are kept so it lines up in a terminal.
pub fn caret_line(line: &str, index: usize) -> String {
    let mut marker: String = line
        .char_indices()
        .take_while(|&(at, c)| at + c.len_utf8() <= index)
        .map(|(_, c)| if c == '\t' { '\t' } else { ' ' })
        .collect();
    marker.push('^');
    marker
}

/// Formats an error report pointing at `line_no:column`, with the caret
/// under byte `index` of `line`.
pub fn render_diagnostic(
    message: &str,
    line_no: usize,
    column: usize,
    line: &str,
    index: usize,
) -> String {
    format!(
        "error: {} at {}:{}\n  {}\n  {}",
        message,
        line_no,
        column,
        line,
        caret_line(line, index)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parse() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!(matches!(
            "xml".parse::<OutputFormat>(),
            Err(HlotError::Validation(_))
        ));
    }

    #[test]
    fn test_caret_line() {
        assert_eq!(caret_line("abc", 0), "^");
        assert_eq!(caret_line("abc", 2), "  ^");
        assert_eq!(caret_line("\tx = y", 3), "\t  ^");
    }

    #[test]
    fn test_caret_line_with_multibyte_prefix() {
        // Byte 3 is the "x" after "é " (3 bytes, two characters wide).
        assert_eq!(caret_line("é x", 3), "  ^");
    }

    #[test]
    fn test_caret_line_inside_multibyte_char() {
        // Byte 1 is the second byte of "é"; the caret goes under "é".
        assert_eq!(caret_line("é x", 1), "^");
        assert_eq!(caret_line("aé x", 2), " ^");
    }

    #[test]
    fn test_caret_line_past_end() {
        assert_eq!(caret_line("ab", 7), "  ^");
    }

    #[test]
    fn test_index_in_line() {
        let source = "HloModule m\n  ROOT";
        assert_eq!(index_in_line(source, 0), 0);
        assert_eq!(index_in_line(source, 10), 10);
        assert_eq!(index_in_line(source, 12), 0);
        assert_eq!(index_in_line(source, 14), 2);
        assert_eq!(index_in_line(source, 99), 6);
    }

    #[test]
    fn test_render_diagnostic() {
        let report = render_diagnostic("invalid token", 2, 3, "  /* abc", 2);
        assert_eq!(report, "error: invalid token at 2:3\n    /* abc\n    ^");
    }

    #[test]
    fn test_render_diagnostic_first_line() {
        // First-line columns are offsets, so column 4 is byte 4.
        let report = render_diagnostic("invalid token", 1, 4, "a = $", 4);
        assert_eq!(report, "error: invalid token at 1:4\n  a = $\n      ^");
    }

    #[test]
    fn test_read_missing_file() {
        let result = read_source(Path::new("/nonexistent/input.hlo"));
        assert!(matches!(result, Err(HlotError::Validation(_))));
    }
}

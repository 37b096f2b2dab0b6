//! Tokens command implementation.
//!
//! Lexes an HLO text file and prints one record per token, either as
//! tab-separated text or as JSON lines. The final `eof` token is printed
//! too. An error token stops the dump with a diagnostic unless errors are
//! allowed, in which case it is printed like any other token.

use std::io::Write;
use std::path::PathBuf;

use hloc_lex::{Lexer, TokKind, Token, TokenValue, NAN_PAYLOAD_MASK};
use serde::Serialize;

use crate::commands::common::{index_in_line, read_source, render_diagnostic, OutputFormat};
use crate::config::TokensConfig;
use crate::error::{HlotError, Result};

/// Arguments for the tokens command.
#[derive(Debug, Clone, Default)]
pub struct TokensArgs {
    /// Enable verbose output.
    pub verbose: bool,
    /// Input file, `-` for standard input.
    pub input: PathBuf,
    /// Output format override.
    pub format: Option<String>,
    /// Print locations even if the config does not ask for them.
    pub locations: bool,
    /// Print error tokens instead of failing on them.
    pub allow_errors: bool,
}

/// Where lexing stopped on an error token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorSite {
    /// 1-based line
    pub line: usize,
    /// Column as reported by the lexer
    pub column: usize,
    /// Byte index of the token within `text`
    pub index: usize,
    /// Full text of the line
    pub text: String,
}

/// Outcome of a token dump.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSummary {
    /// Number of records written
    pub count: usize,
    /// Set when the dump stopped on an error token
    pub error: Option<ErrorSite>,
}

/// One token as written in JSON output.
#[derive(Debug, Serialize)]
struct TokenRecord<'a> {
    kind: &'static str,
    lexeme: &'a str,
    offset: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    column: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<serde_json::Value>,
}

/// Tokens command handler.
pub struct TokensCommand {
    args: TokensArgs,
    config: TokensConfig,
}

impl TokensCommand {
    /// Create a new TokensCommand.
    pub fn new(args: TokensArgs, config: TokensConfig) -> Self {
        Self { args, config }
    }

    /// Execute the command.
    pub fn run(&self) -> Result<()> {
        let source = read_source(&self.args.input)?;
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        let summary = self.write_tokens(&source, &mut out)?;
        out.flush()?;

        if self.args.verbose {
            tracing::info!(tokens = summary.count, input = %self.args.input.display(), "lexed input");
        }

        match summary.error {
            Some(site) => {
                eprintln!(
                    "{}",
                    render_diagnostic(
                        "invalid token",
                        site.line,
                        site.column,
                        &site.text,
                        site.index,
                    )
                );
                Err(HlotError::Lex {
                    line: site.line,
                    column: site.column,
                })
            },
            None => Ok(()),
        }
    }

    /// Get the effective tokens configuration; flags win over the config file.
    pub fn effective_config(&self) -> TokensConfig {
        let mut config = self.config.clone();
        if let Some(ref format) = self.args.format {
            config.format = format.clone();
        }
        if self.args.locations {
            config.show_locations = true;
        }
        if self.args.allow_errors {
            config.stop_on_error = false;
        }
        config
    }

    /// Lexes `source` and writes one record per token to `out`.
    pub fn write_tokens<W: Write>(&self, source: &str, out: &mut W) -> Result<TokenSummary> {
        let config = self.effective_config();
        let format: OutputFormat = config.format.parse()?;
        let mut lexer = Lexer::new(source);
        let mut summary = TokenSummary::default();

        loop {
            let kind = lexer.lex();
            let loc = lexer.loc();

            if kind == TokKind::Error && config.stop_on_error {
                let (line, column) = lexer.line_and_column(&loc)?;
                tracing::debug!(offset = loc.offset(), line, column, "error token");
                summary.error = Some(ErrorSite {
                    line,
                    column,
                    index: index_in_line(source, loc.offset()),
                    text: lexer.line(&loc).to_string(),
                });
                return Ok(summary);
            }

            let position = if config.show_locations {
                Some(lexer.line_and_column(&loc)?)
            } else {
                None
            };
            match format {
                OutputFormat::Text => write_text(out, lexer.token(), position)?,
                OutputFormat::Json => write_json(out, lexer.token(), position)?,
            }
            summary.count += 1;

            if kind.is_terminal() {
                return Ok(summary);
            }
        }
    }
}

/// Run the tokens command with the given arguments.
pub fn run_tokens(args: TokensArgs, config: TokensConfig) -> Result<()> {
    TokensCommand::new(args, config).run()
}

/// Renders a float payload; NaNs keep their sign and payload.
fn format_decimal(value: f64) -> String {
    if value.is_nan() {
        let sign = if value.is_sign_negative() { "-" } else { "" };
        format!("{}nan(0x{:x})", sign, value.to_bits() & NAN_PAYLOAD_MASK)
    } else {
        format!("{:?}", value)
    }
}

fn text_value(value: &TokenValue) -> Option<String> {
    match value {
        TokenValue::None => None,
        TokenValue::Str(s) => Some(format!("{:?}", s)),
        TokenValue::Int(v) => Some(v.to_string()),
        TokenValue::Decimal(v) => Some(format_decimal(*v)),
        TokenValue::PrimitiveType(ty) => Some(ty.name().to_string()),
    }
}

fn json_value(value: &TokenValue) -> Option<serde_json::Value> {
    match value {
        TokenValue::None => None,
        TokenValue::Str(s) => Some(s.clone().into()),
        TokenValue::Int(v) => Some((*v).into()),
        TokenValue::Decimal(v) if v.is_finite() => Some((*v).into()),
        TokenValue::Decimal(v) => Some(format_decimal(*v).into()),
        TokenValue::PrimitiveType(ty) => Some(ty.name().into()),
    }
}

fn write_text<W: Write>(out: &mut W, token: &Token, position: Option<(usize, usize)>) -> Result<()> {
    if let Some((line, column)) = position {
        write!(out, "{}:{}\t", line, column)?;
    }
    write!(out, "{}\t{:?}", token.kind(), token.lexeme())?;
    if let Some(value) = text_value(token.value()) {
        write!(out, "\t{}", value)?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_json<W: Write>(out: &mut W, token: &Token, position: Option<(usize, usize)>) -> Result<()> {
    let record = TokenRecord {
        kind: token.kind().name(),
        lexeme: token.lexeme(),
        offset: token.start().offset(),
        line: position.map(|(line, _)| line),
        column: position.map(|(_, column)| column),
        value: json_value(token.value()),
    };
    serde_json::to_writer(&mut *out, &record)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dump(source: &str, args: TokensArgs, config: TokensConfig) -> (String, TokenSummary) {
        let command = TokensCommand::new(args, config);
        let mut out = Vec::new();
        let summary = command.write_tokens(source, &mut out).unwrap();
        (String::from_utf8(out).unwrap(), summary)
    }

    #[test]
    fn test_text_output() {
        let (out, summary) = dump("%c = f32[]", TokensArgs::default(), TokensConfig::default());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            vec![
                "name\t\"%c\"\t\"c\"",
                "=\t\"=\"",
                "primitive_type\t\"f32\"\tf32",
                "[\t\"[\"",
                "]\t\"]\"",
                "eof\t\"\"",
            ]
        );
        assert_eq!(summary.count, 6);
        assert_eq!(summary.error, None);
    }

    #[test]
    fn test_text_output_with_locations() {
        let args = TokensArgs {
            locations: true,
            ..TokensArgs::default()
        };
        let (out, _) = dump("ENTRY\n  42", args, TokensConfig::default());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "1:0\tENTRY\t\"ENTRY\"");
        assert_eq!(lines[1], "2:3\tint\t\"42\"\t42");
    }

    #[test]
    fn test_json_output() {
        let args = TokensArgs {
            format: Some("json".to_string()),
            ..TokensArgs::default()
        };
        let (out, _) = dump("nan -nan(0x2) 1.5", args, TokensConfig::default());
        let records: Vec<serde_json::Value> = out
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(records.len(), 4);
        assert_eq!(records[0]["kind"], "decimal");
        assert_eq!(records[0]["value"], "nan(0x8000000000000)");
        assert_eq!(records[1]["value"], "-nan(0x2)");
        assert_eq!(records[2]["value"], 1.5);
        assert_eq!(records[2]["offset"], 14);
        assert!(records[2].get("line").is_none());
        assert_eq!(records[3]["kind"], "eof");
    }

    #[test]
    fn test_config_format_is_used() {
        let config = TokensConfig {
            format: "json".to_string(),
            show_locations: true,
            ..TokensConfig::default()
        };
        let (out, _) = dump("x", TokensArgs::default(), config);
        let first: serde_json::Value = serde_json::from_str(out.lines().next().unwrap()).unwrap();
        assert_eq!(first["kind"], "ident");
        assert_eq!(first["line"], 1);
        assert_eq!(first["column"], 0);
    }

    #[test]
    fn test_unknown_format() {
        let args = TokensArgs {
            format: Some("yaml".to_string()),
            ..TokensArgs::default()
        };
        let command = TokensCommand::new(args, TokensConfig::default());
        let result = command.write_tokens("x", &mut Vec::new());
        assert!(matches!(result, Err(HlotError::Validation(_))));
    }

    #[test]
    fn test_error_stops_dump() {
        let (out, summary) = dump("a\n  /* open", TokensArgs::default(), TokensConfig::default());
        assert_eq!(out.lines().count(), 1);
        assert_eq!(
            summary.error,
            Some(ErrorSite {
                line: 2,
                column: 3,
                index: 2,
                text: "  /* open".to_string(),
            })
        );
    }

    #[test]
    fn test_error_on_first_line() {
        let (_, summary) = dump("a = $", TokensArgs::default(), TokensConfig::default());
        assert_eq!(
            summary.error,
            Some(ErrorSite {
                line: 1,
                column: 4,
                index: 4,
                text: "a = $".to_string(),
            })
        );
    }

    #[test]
    fn test_first_line_locations_are_offsets() {
        let args = TokensArgs {
            locations: true,
            ..TokensArgs::default()
        };
        let (out, _) = dump("HloModule m\nENTRY %e", args, TokensConfig::default());
        let positions: Vec<&str> = out
            .lines()
            .map(|line| line.split('\t').next().unwrap())
            .collect();
        assert_eq!(positions, vec!["1:0", "1:10", "2:1", "2:7", "2:9"]);
    }

    #[test]
    fn test_allow_errors_prints_error_token() {
        let args = TokensArgs {
            allow_errors: true,
            ..TokensArgs::default()
        };
        let (out, summary) = dump("a <", args, TokensConfig::default());
        assert_eq!(summary.error, None);
        assert_eq!(out.lines().last(), Some("error\t\"<\""));
    }

    #[test]
    fn test_format_decimal() {
        assert_eq!(format_decimal(4.2), "4.2");
        assert_eq!(format_decimal(f64::INFINITY), "inf");
        assert_eq!(format_decimal(hloc_lex::nan_with_sign_and_payload(true, 5)), "-nan(0x5)");
    }
}

//! Edge case tests for hloc-lex

#[cfg(test)]
mod tests {
    use crate::{Lexer, TokKind, Token};

    fn lex_all(source: &str) -> Vec<Token> {
        Lexer::new(source).collect()
    }

    fn snapshot(token: &Token) -> (TokKind, usize, usize, String) {
        (token.kind(), token.start().offset(), token.end_offset(), token.str_val().to_string())
    }

    fn kinds(source: &str) -> Vec<TokKind> {
        lex_all(source).iter().map(|t| t.kind()).collect()
    }

    // ==================== EDGE CASES ====================

    #[test]
    fn test_edge_nul_is_sticky_error() {
        let mut lexer = Lexer::new("\0abc");
        assert_eq!(lexer.lex(), TokKind::Error);
        assert_eq!(lexer.position(), 0);
        assert_eq!(lexer.lex(), TokKind::Error);
        assert_eq!(lexer.position(), 0);
    }

    #[test]
    fn test_edge_nul_after_tokens() {
        assert_eq!(kinds("a \0"), vec![TokKind::Ident, TokKind::Error]);
    }

    #[test]
    fn test_edge_long_identifier() {
        let name = "a".repeat(10000);
        let t = lex_all(&format!("%{} = f32[] parameter(0)", name));
        assert_eq!(t[0].kind(), TokKind::Name);
        assert_eq!(t[0].str_val(), name);
    }

    #[test]
    fn test_edge_keywords_are_case_sensitive() {
        assert_eq!(kinds("entry ENTRY"), vec![TokKind::Ident, TokKind::KwEntry, TokKind::Eof]);
        assert_eq!(kinds("Root"), vec![TokKind::Ident, TokKind::Eof]);
    }

    #[test]
    fn test_edge_negative_pad() {
        let t = lex_all("-1_2_1");
        assert_eq!(t[0].kind(), TokKind::Pad);
        assert_eq!(t[0].str_val(), "-1_2_1");
    }

    #[test]
    fn test_edge_incomplete_exponent() {
        let t = lex_all("1e");
        assert_eq!(t[0].kind(), TokKind::Int);
        assert_eq!(t[0].int64_val(), 1);
        assert_eq!(t[1].kind(), TokKind::Ident);
        assert_eq!(t[1].str_val(), "e");
    }

    #[test]
    fn test_edge_float_beats_int() {
        let t = lex_all("2.0 2 .5");
        assert_eq!(t[0].kind(), TokKind::Decimal);
        assert_eq!(t[1].kind(), TokKind::Int);
        // A leading '.' is not a number start.
        assert_eq!(t[2].kind(), TokKind::Error);
    }

    #[test]
    fn test_edge_four_dots() {
        assert_eq!(kinds("...."), vec![TokKind::Dots, TokKind::Error]);
    }

    #[test]
    fn test_edge_arrow_without_spaces() {
        assert_eq!(
            kinds("(f32[])->f32[]"),
            vec![
                TokKind::Lparen,
                TokKind::PrimitiveType,
                TokKind::Lsquare,
                TokKind::Rsquare,
                TokKind::Rparen,
                TokKind::Arrow,
                TokKind::PrimitiveType,
                TokKind::Lsquare,
                TokKind::Rsquare,
                TokKind::Eof,
            ]
        );
    }

    #[test]
    fn test_edge_leq_in_compare() {
        assert_eq!(kinds("a<=b"), vec![TokKind::Ident, TokKind::Leq, TokKind::Ident, TokKind::Eof]);
    }

    #[test]
    fn test_edge_dashes_in_names() {
        let t = lex_all("%get-tuple-element.1");
        assert_eq!(t[0].kind(), TokKind::Name);
        assert_eq!(t[0].str_val(), "get-tuple-element.1");
    }

    #[test]
    fn test_edge_crlf_locations() {
        let mut lexer = Lexer::new("a\r\nb");
        lexer.lex();
        lexer.lex();
        let loc = lexer.loc();
        assert_eq!(lexer.line_and_column(&loc), Ok((2, 1)));
        assert_eq!(lexer.line(&loc), "b");
    }

    #[test]
    fn test_edge_error_location_points_at_comment() {
        let mut lexer = Lexer::new("ENTRY\n  /* abc");
        lexer.lex();
        assert_eq!(lexer.lex(), TokKind::Error);
        let loc = lexer.loc();
        assert_eq!(lexer.line_and_column(&loc), Ok((2, 3)));
        assert_eq!(lexer.line(&loc), "  /* abc");
    }

    #[test]
    fn test_edge_non_ascii_outside_strings() {
        assert_eq!(kinds("a ∑ b"), vec![TokKind::Ident, TokKind::Error]);
    }

    // ==================== PROPERTIES ====================

    #[test]
    fn test_property_lexing_terminates() {
        use proptest::prelude::*;

        proptest!(|(input in "[ -~\t\n\r]{0,200}")| {
            let tokens: Vec<Token> = Lexer::new(input.as_str()).take(input.len() + 2).collect();
            // Every token but the last consumes at least one byte.
            prop_assert!(tokens.len() <= input.len() + 1);
            let last = tokens.last().map(|t| t.kind());
            prop_assert!(last.map_or(false, TokKind::is_terminal));
        });
    }

    #[test]
    fn test_property_lexing_terminates_on_unicode() {
        use proptest::prelude::*;

        proptest!(|(input in "\\PC{0,64}")| {
            let tokens: Vec<Token> = Lexer::new(input.as_str()).take(input.len() + 2).collect();
            prop_assert!(tokens.len() <= input.len() + 1);
            for token in &tokens {
                // Tokens always start and end on character boundaries.
                prop_assert!(input.is_char_boundary(token.start().offset()));
                prop_assert!(input.is_char_boundary(token.end_offset()));
            }
        });
    }

    #[test]
    fn test_property_look_ahead_is_pure() {
        use proptest::prelude::*;

        proptest!(|(input in "[a-z0-9%=,:*{}()\\[\\] ._\"/-]{0,80}")| {
            let mut lexer = Lexer::new(input.as_str());
            for _ in 0..=input.len() {
                // Compare by span: a NaN payload never equals itself.
                let before = snapshot(lexer.token());
                let position = lexer.position();
                let peeked = lexer.look_ahead();
                prop_assert_eq!(snapshot(lexer.token()), before);
                prop_assert_eq!(lexer.position(), position);
                let kind = lexer.lex();
                prop_assert_eq!(peeked, kind);
                if kind.is_terminal() {
                    break;
                }
            }
        });
    }

    #[test]
    fn test_property_dxd() {
        use proptest::prelude::*;

        proptest!(|(dims in proptest::collection::vec(0u32..1000, 2..6))| {
            let text = dims.iter().map(|d| d.to_string()).collect::<Vec<_>>().join("x");
            let tokens = lex_all(&text);
            prop_assert_eq!(tokens[0].kind(), TokKind::DxD);
            prop_assert_eq!(tokens[0].str_val(), text.as_str());
        });
    }

    #[test]
    fn test_property_int_values() {
        use proptest::prelude::*;

        proptest!(|(value in any::<i64>())| {
            let tokens = lex_all(&value.to_string());
            prop_assert_eq!(tokens[0].kind(), TokKind::Int);
            prop_assert_eq!(tokens[0].int64_val(), value);
        });
    }
}

#[cfg(test)]
mod scanner_tests {
    use ds_interpreter as ds;

    use ds::diagnostics::Diagnostics;
    use ds::scanner::*;
    use ds::token::*;

    fn assert_token_sequence(source: &str, expected: &[(TokenType, &str)]) {
        let scanner = Scanner::new(source);
        let tokens: Vec<_> = scanner.filter_map(Result::ok).collect();

        assert_eq!(tokens.len(), expected.len());

        for (actual, (expected_type, expected_lexeme)) in tokens.iter().zip(expected.iter()) {
            assert_eq!(actual.token_type, *expected_type);
            assert_eq!(actual.lexeme, *expected_lexeme);
        }
    }

    #[test]
    fn test_scanner_01_symbols() {
        assert_token_sequence(
            "({*.,+*})",
            &[
                (TokenType::LEFT_PAREN, "("),
                (TokenType::LEFT_BRACE, "{"),
                (TokenType::STAR, "*"),
                (TokenType::DOT, "."),
                (TokenType::COMMA, ","),
                (TokenType::PLUS, "+"),
                (TokenType::STAR, "*"),
                (TokenType::RIGHT_BRACE, "}"),
                (TokenType::RIGHT_PAREN, ")"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_02_two_char_operators() {
        assert_token_sequence(
            "! != = == < <= > >= /",
            &[
                (TokenType::BANG, "!"),
                (TokenType::BANG_EQUAL, "!="),
                (TokenType::EQUAL, "="),
                (TokenType::EQUAL_EQUAL, "=="),
                (TokenType::LESS, "<"),
                (TokenType::LESS_EQUAL, "<="),
                (TokenType::GREATER, ">"),
                (TokenType::GREATER_EQUAL, ">="),
                (TokenType::SLASH, "/"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_03_keywords_and_identifiers() {
        assert_token_sequence(
            "mut const break null print _tmp mutable x1",
            &[
                (TokenType::MUT, "mut"),
                (TokenType::CONST, "const"),
                (TokenType::BREAK, "break"),
                (TokenType::NULL, "null"),
                (TokenType::PRINT, "print"),
                (TokenType::IDENTIFIER, "_tmp"),
                (TokenType::IDENTIFIER, "mutable"),
                (TokenType::IDENTIFIER, "x1"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_04_comments_are_skipped() {
        assert_token_sequence(
            "1 // everything here is ignored ( { \"\n2",
            &[
                (TokenType::NUMBER, "1"),
                (TokenType::NUMBER, "2"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_number_literals() {
        let mut diagnostics = Diagnostics::quiet();
        let tokens = scan("12 3.5 7.", &mut diagnostics);

        assert!(!diagnostics.had_error());
        assert_eq!(tokens[0].literal, Some(Literal::Number(12.0)));
        assert_eq!(tokens[1].literal, Some(Literal::Number(3.5)));

        // A trailing dot is not part of the number.
        assert_eq!(tokens[2].lexeme, "7");
        assert_eq!(tokens[2].literal, Some(Literal::Number(7.0)));
        assert_eq!(tokens[3].token_type, TokenType::DOT);
        assert_eq!(tokens[4].token_type, TokenType::EOF);
    }

    #[test]
    fn test_string_literal_spans_lines() {
        let mut diagnostics = Diagnostics::quiet();
        let tokens = scan("\"one\ntwo\" x", &mut diagnostics);

        assert_eq!(tokens[0].token_type, TokenType::STRING);
        assert_eq!(tokens[0].lexeme, "\"one\ntwo\"");
        assert_eq!(tokens[0].literal, Some(Literal::Str("one\ntwo".into())));
        assert_eq!(tokens[1].line, 2);
        assert_eq!(tokens[2].token_type, TokenType::EOF);
        assert_eq!(tokens[2].line, 2);
    }

    #[test]
    fn test_unterminated_string() {
        let mut diagnostics = Diagnostics::quiet();
        let tokens = scan("x = \"never\nclosed", &mut diagnostics);

        assert!(diagnostics.had_error());
        assert_eq!(
            diagnostics.messages(),
            ["[line 2] Error: Unterminated string.".to_string()]
        );

        let kinds: Vec<TokenType> = tokens.iter().map(|t| t.token_type).collect();
        assert_eq!(
            kinds,
            [TokenType::IDENTIFIER, TokenType::EQUAL, TokenType::EOF]
        );
    }

    #[test]
    fn test_eof_carries_final_line() {
        let mut diagnostics = Diagnostics::quiet();
        let tokens = scan("a\nb\n\n", &mut diagnostics);

        let eof = tokens.last().expect("EOF token");
        assert_eq!(eof.token_type, TokenType::EOF);
        assert_eq!(eof.line, 4);
        assert_eq!(tokens.iter().filter(|t| t.is(TokenType::EOF)).count(), 1);
    }

    #[test]
    fn test_token_display() {
        let mut diagnostics = Diagnostics::quiet();
        let tokens = scan("foo 3 2.5 \"hi\"", &mut diagnostics);

        let printed: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
        assert_eq!(
            printed,
            [
                "IDENTIFIER foo null",
                "NUMBER 3 3.0",
                "NUMBER 2.5 2.5",
                "STRING \"hi\" hi",
                "EOF  null",
            ]
        );
    }

    #[test]
    fn test_unexpected_chars_token_sequence() {
        let source = ",.$(#";
        let scanner = Scanner::new(source);

        let results: Vec<_> = scanner.collect();

        // 0: COMMA ','
        // 1: DOT '.'
        // 2: Error for '$'
        // 3: LEFT_PAREN '('
        // 4: Error for '#'
        // 5: EOF
        assert_eq!(results.len(), 6, "Expected 6 items in result");

        assert_token_matches(&results[0], TokenType::COMMA, ",");
        assert_token_matches(&results[1], TokenType::DOT, ".");
        assert_token_matches(&results[3], TokenType::LEFT_PAREN, "(");
        assert_token_matches(&results[5], TokenType::EOF, "");

        let error_count = results.iter().filter(|r| r.is_err()).count();
        assert_eq!(error_count, 2, "Expected 2 error messages");

        for err in results.iter().filter_map(|r| r.as_ref().err()) {
            assert!(
                err.to_string().contains("Unexpected character"),
                "Error message should contain 'Unexpected character', got: {}",
                err
            );
        }

        fn assert_token_matches(
            result: &Result<Token, ds::error::LexError>,
            expected_type: TokenType,
            expected_lexeme: &str,
        ) {
            match result {
                Ok(token) => {
                    assert_eq!(
                        token.token_type, expected_type,
                        "Expected token type {:?}, got {:?}",
                        expected_type, token.token_type
                    );
                    assert_eq!(
                        token.lexeme, expected_lexeme,
                        "Expected lexeme '{}', got '{}'",
                        expected_lexeme, token.lexeme
                    );
                }
                Err(e) => panic!("Expected token but got error: {}", e),
            }
        }
    }

    #[test]
    fn test_unexpected_multibyte_char_reported_once() {
        let mut diagnostics = Diagnostics::quiet();
        let tokens = scan("a é b", &mut diagnostics);

        assert_eq!(
            diagnostics.messages(),
            ["[line 1] Error: Unexpected character: é".to_string()]
        );
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1].lexeme, "b");
    }
}

use minigo::lexer::{Lexer, TokenKind};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]
    #[test]
    fn never_panics_and_progresses(s in ".*") {
        let mut lexer = Lexer::new(&s);
        let mut last_end = 0usize;
        let mut last_line = 1usize;
        let max_steps = s.len() + 2;

        for _ in 0..max_steps {
            let token = match lexer.next_token() {
                Ok(token) => token,
                Err(err) => {
                    // Errors point into the input
                    prop_assert!(err.span().start <= s.len(), "error out of bounds: {err:?} input={s:?}");
                    return Ok(());
                }
            };

            prop_assert!(token.span.start <= token.span.end, "inverted span {:?} input={s:?}", token.span);
            prop_assert!(token.span.end <= s.len(), "span out of bounds {:?} len={} input={s:?}", token.span, s.len());
            prop_assert!(token.span.start >= last_end, "token moved backwards {:?} input={s:?}", token.span);
            prop_assert!(token.pos.line >= last_line, "line regressed at {:?} input={s:?}", token.span);
            last_end = token.span.end;
            last_line = token.pos.line;

            if token.kind == TokenKind::Eof {
                prop_assert_eq!(token.span.start, s.len());
                return Ok(());
            }
        }
        prop_assert!(false, "no end of file after {max_steps} tokens: input={s:?}");
    }

    #[test]
    fn identifiers_round_trip(name in "[a-zA-Z_][a-zA-Z0-9_]{0,12}") {
        let tokens = Lexer::new(&name).tokenize_all().unwrap();
        prop_assert_eq!(tokens.len(), 2);
        if let TokenKind::Identifier(text) = &tokens[0].kind {
            prop_assert_eq!(text, &name);
        } else {
            prop_assert!(tokens[0].kind.is_keyword(), "{:?} is neither identifier nor keyword", tokens[0].kind);
        }
    }

    #[test]
    fn plain_strings_decode_verbatim(body in "[a-zA-Z0-9 _.,!?]{0,16}") {
        let source = format!("\"{}\"", body);
        let tokens = Lexer::new(&source).tokenize_all().unwrap();
        prop_assert_eq!(&tokens[0].kind, &TokenKind::StringLiteral(body));
        prop_assert_eq!(tokens[0].span.end, source.len());
    }
}

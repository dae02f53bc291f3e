use super::*;

fn lex(input: &str) -> Vec<Spanned<Token<'_>>> {
    let mut lexer = Lexer::new(input);
    let mut out = Vec::new();
    while let Some(tok) = lexer
        .next_token()
        .unwrap_or_else(|e| panic!("lex failed for {input:?}: {e}"))
    {
        out.push(tok);
    }
    out
}

fn tokens(input: &str) -> Vec<Token<'_>> {
    lex(input).into_iter().map(Spanned::take).collect()
}

fn lex_err(input: &str) -> Error {
    let mut lexer = Lexer::new(input);
    loop {
        match lexer.next_token() {
            Ok(Some(_)) => {}
            Ok(None) => panic!("expected a lex error for {input:?}"),
            Err(e) => return e,
        }
    }
}

#[test]
fn punctuation_and_keys() {
    assert_eq!(
        tokens("[a.b]\nc = 1"),
        [
            Token::LeftBracket,
            Token::Key("a"),
            Token::Period,
            Token::Key("b"),
            Token::RightBracket,
            Token::Newline,
            Token::Key("c"),
            Token::Equals,
            Token::Integer(1),
        ]
    );
    assert_eq!(
        tokens("x = [1, 2,]"),
        [
            Token::Key("x"),
            Token::Equals,
            Token::LeftBracket,
            Token::Integer(1),
            Token::Comma,
            Token::Integer(2),
            Token::Comma,
            Token::RightBracket,
        ]
    );
    assert!(tokens("").is_empty());
    assert!(tokens("  \t ").is_empty());
    assert_eq!(tokens("server_port-2"), [Token::Key("server_port-2")]);
}

#[test]
fn comments_and_line_endings() {
    assert_eq!(
        tokens("# only a comment\na = true # trailing\r\n\n"),
        [
            Token::Newline,
            Token::Key("a"),
            Token::Equals,
            Token::Boolean(true),
            Token::Newline,
            Token::Newline,
        ]
    );

    let err = lex_err("a = 1\r b");
    assert_eq!(err.kind, ErrorKind::Unexpected('\r'));
    assert_eq!(err.location, Location::new(1, 6));
}

#[test]
fn locations_track_lines_and_columns() {
    let toks = lex("a = 1\n  bb = \"x\"\n");
    let locs: Vec<_> = toks.iter().map(|t| (t.location.line, t.location.column)).collect();
    assert_eq!(
        locs,
        [(1, 1), (1, 3), (1, 5), (1, 6), (2, 3), (2, 6), (2, 8), (2, 11)]
    );

    let spans: Vec<_> = toks.iter().map(|t| (t.span.start, t.span.end)).collect();
    assert_eq!(spans[4], (8, 10));
    // the string span covers both quotes
    assert_eq!(spans[6], (13, 16));
}

#[test]
fn integers() {
    let cases = [
        ("0", 0),
        ("42", 42),
        ("-17", -17),
        ("+99", 99),
        ("1_000_000", 1_000_000),
        ("0xDEAD_beef", 0xDEAD_BEEF),
        ("0o755", 0o755),
        ("0b1010", 0b1010),
        ("9223372036854775807", i64::MAX),
        ("-9223372036854775808", i64::MIN),
    ];
    for (input, expected) in cases {
        assert_eq!(tokens(input), [Token::Integer(expected)], "input: {input}");
    }

    let invalid = [
        "01",
        "1__0",
        "1_",
        "0x",
        "-0x10",
        "+0b1",
        "12abc",
        "--1",
        "-",
        "9223372036854775808",
    ];
    for input in invalid {
        let err = lex_err(input);
        assert_eq!(err.kind, ErrorKind::InvalidNumber, "input: {input}");
        assert_eq!(err.span.start, 0, "input: {input}");
    }

    // a lone plus is not a number
    assert_eq!(lex_err("+ 1").kind, ErrorKind::Unexpected('+'));
}

#[test]
fn booleans_are_not_keys() {
    assert_eq!(
        tokens("true false truey"),
        [
            Token::Boolean(true),
            Token::Boolean(false),
            Token::Key("truey")
        ]
    );
}

#[test]
fn strings() {
    let toks = tokens(r#""plain" "" "tab\tquote\"slash\\" "ünï""#);
    assert_eq!(
        toks,
        [
            Token::String(Cow::Borrowed("plain")),
            Token::String(Cow::Borrowed("")),
            Token::String(Cow::Owned("tab\tquote\"slash\\".into())),
            Token::String(Cow::Borrowed("ünï")),
        ]
    );
    assert!(matches!(&toks[0], Token::String(Cow::Borrowed(_))));
    assert!(matches!(&toks[2], Token::String(Cow::Owned(_))));

    let all = tokens(r#""\b\f\n\r""#);
    assert_eq!(all, [Token::String("\u{8}\u{c}\n\r".into())]);
}

#[test]
fn string_errors() {
    let err = lex_err("a = \"open");
    assert_eq!(err.kind, ErrorKind::UnterminatedString);
    assert_eq!(err.span.start, 4);

    let err = lex_err("a = \"line\nbreak\"");
    assert_eq!(err.kind, ErrorKind::InvalidCharInString('\n'));
    assert_eq!(err.location, Location::new(1, 10));

    let err = lex_err(r#"a = "\u0041""#);
    assert_eq!(err.kind, ErrorKind::InvalidEscape('u'));
    assert_eq!(err.span, Span::new(5, 7));

    let err = lex_err("a = \"trailing\\");
    assert_eq!(err.kind, ErrorKind::UnterminatedString);

    let err = lex_err("a = \"nul\u{0}\"");
    assert_eq!(err.kind, ErrorKind::InvalidCharInString('\0'));
}

#[test]
fn unexpected_characters() {
    let err = lex_err("a = {");
    assert_eq!(err.kind, ErrorKind::Unexpected('{'));
    assert_eq!(err.location, Location::new(1, 5));

    let err = lex_err("key = 'literal'");
    assert_eq!(err.kind, ErrorKind::Unexpected('\''));

    let err = lex_err("é = 1");
    assert_eq!(err.kind, ErrorKind::Unexpected('é'));
    assert_eq!(err.span, Span::new(0, 2));
}

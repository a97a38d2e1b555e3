use super::*;

fn parse_single(src: &str) -> Literal {
    let bindings = parse_script(src).unwrap();
    assert_eq!(bindings.len(), 1);
    bindings.into_iter().next().unwrap().value
}

mod literals {
    use super::*;

    #[test]
    fn test_nested_arrays() {
        let value = parse_single("var searchData=\n[\n  ['a',['A',['u',1,'s']]]\n];\n");
        let expected = Literal::Array(vec![Literal::Array(vec![
            Literal::Str("a".into()),
            Literal::Array(vec![
                Literal::Str("A".into()),
                Literal::Array(vec![
                    Literal::Str("u".into()),
                    Literal::Int(1),
                    Literal::Str("s".into()),
                ]),
            ]),
        ])]);
        assert_eq!(value, expected);
    }

    #[test]
    fn test_double_quoted_and_escapes() {
        let value = parse_single(r#"var x = ["it\'s", 'a\\b', "é\x41", "😀"];"#);
        let items: Vec<&str> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|l| l.as_str().unwrap())
            .collect();
        assert_eq!(items, ["it's", "a\\b", "éA", "😀"]);
    }

    #[test]
    fn test_trailing_comma_and_comments() {
        let value = parse_single("// generated\nvar x = [ /* one */ 1, -2, true, ];");
        assert_eq!(
            value,
            Literal::Array(vec![Literal::Int(1), Literal::Int(-2), Literal::Bool(true)])
        );
    }

    #[test]
    fn test_object_with_numeric_keys() {
        let value = parse_single("var names =\n{\n  0: \"all\",\n  1: \"classes\"\n};");
        assert_eq!(
            value,
            Literal::Object(vec![
                ("0".into(), Literal::Str("all".into())),
                ("1".into(), Literal::Str("classes".into())),
            ])
        );
    }

    #[test]
    fn test_flags() {
        assert_eq!(Literal::Int(1).as_flag(), Some(true));
        assert_eq!(Literal::Int(0).as_flag(), Some(false));
        assert_eq!(Literal::Bool(true).as_flag(), Some(true));
        assert_eq!(Literal::Str("1".into()).as_flag(), None);
    }
}

mod bindings {
    use super::*;

    #[test]
    fn test_multiple_bindings() {
        let bindings = parse_script("var a = 1;\n\nvar b = [];\nc = 'x'").unwrap();
        let names: Vec<&str> = bindings.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
        assert_eq!(find_binding(&bindings, "c"), Some(&Literal::Str("x".into())));
        assert_eq!(find_binding(&bindings, "d"), None);
    }

    #[test]
    fn test_empty_script() {
        assert!(parse_script("  \n// nothing\n").unwrap().is_empty());
    }

    #[test]
    fn test_byte_order_mark() {
        let bindings = parse_script("\u{feff}var a = 1;").unwrap();
        assert_eq!(bindings[0].value, Literal::Int(1));
    }
}

mod errors {
    use super::*;

    #[test]
    fn test_unterminated_array_reports_position() {
        let err = parse_script("var x = [\n  'a',\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedEof);
        assert_eq!(err.line, 3);
    }

    #[test]
    fn test_missing_comma() {
        let err = parse_script("var x = ['a' 'b'];").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::Expected("',' or ']'"));
        assert_eq!((err.line, err.column), (1, 14));
    }

    #[test]
    fn test_unterminated_string() {
        let err = parse_script("var x = ['abc];\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_invalid_escape() {
        let err = parse_script(r"var x = '\u12';").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidEscape);
    }

    #[test]
    fn test_unterminated_comment() {
        let err = parse_script("/* open").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnterminatedComment);
    }

    #[test]
    fn test_code_is_rejected() {
        let err = parse_script("var x = foo();").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::Expected("literal"));
    }
}

mod quoting {
    use super::*;

    fn quoted(s: &str) -> String {
        let mut out = String::new();
        write_single_quoted(&mut out, s).unwrap();
        out
    }

    #[test]
    fn test_plain() {
        assert_eq!(quoted("../classripple_1_1TxQ.html"), "'../classripple_1_1TxQ.html'");
    }

    #[test]
    fn test_escapes_quote_and_backslash() {
        assert_eq!(quoted("it's a\\b"), r"'it\'s a\\b'");
    }

    #[test]
    fn test_quoted_text_parses_back() {
        let text = "line\nbreak 'q' \\ \u{1}";
        let value = parse_single(&format!("var x = {};", quoted(text)));
        assert_eq!(value.as_str(), Some(text));
    }
}

use gomathgen_parser::parse;

#[test]
fn missing_package_clause() {
    let err = parse("func F() {}\n").unwrap_err();
    assert!(err.message.contains("package"));
    assert_eq!(err.position, 0);
}

#[test]
fn unterminated_body_is_an_error() {
    let err = parse("package p\nfunc F() {\n\treturn\n").unwrap_err();
    assert!(err.message.contains("unterminated"));
}

#[test]
fn invalid_character_reports_position() {
    let src = "package p\nvar x = @\n";
    let err = parse(src).unwrap_err();
    assert_eq!(err.position, src.find('@').unwrap());
    assert_eq!(err.found_token.as_deref(), Some("@"));
}

#[test]
fn mixed_named_and_unnamed_parameters_rejected() {
    let err = parse("package p\nfunc F(x float64, int) float64\n").unwrap_err();
    assert!(err.message.contains("mixed"));
}

#[test]
fn stray_statement_at_top_level() {
    let err = parse("package p\nx := 1\n").unwrap_err();
    assert!(err.to_string().starts_with("Parse error at position"));
}

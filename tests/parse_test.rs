use basic::lang::{ast::*, parse, Class, ErrorCode};

fn parse_err(s: &str) -> basic::lang::Error {
    match parse(s) {
        Ok(program) => panic!("parsed {} lines", program.len()),
        Err(e) => e,
    }
}

#[test]
fn test_let_without_identifier() {
    let e = parse_err("10 LET = 5");
    assert!(e.is_code(ErrorCode::SyntaxError));
    assert_eq!(e.class(), Class::Syntactic);
    assert_eq!(e.line_number(), Some(10));
}

#[test]
fn test_missing_line_number() {
    let e = parse_err("LET A = 1");
    assert!(e.is_code(ErrorCode::SyntaxError));
    assert_eq!(e.line_number(), None);
}

#[test]
fn test_trailing_tokens() {
    let e = parse_err("10 EXIT 5");
    assert_eq!(e.to_string(), "SYNTAX ERROR IN 10 (8..9); EXPECTED END OF LINE");
}

#[test]
fn test_print_needs_operand() {
    let e = parse_err("10 PRINT 5");
    assert_eq!(
        e.to_string(),
        "SYNTAX ERROR IN 10 (9..10); EXPECTED STRING OR IDENTIFIER"
    );
}

#[test]
fn test_input_needs_prompt() {
    let e = parse_err("10 INPUT A");
    assert!(e.is_code(ErrorCode::SyntaxError));
    let e = parse_err("10 INPUT \"A\" A");
    assert!(e.is_code(ErrorCode::SyntaxError));
}

#[test]
fn test_goto_needs_line_number() {
    let e = parse_err("10 GOTO A");
    assert!(e.is_code(ErrorCode::SyntaxError));
    let e = parse_err("10 GOTO 99999999999");
    assert!(e.is_code(ErrorCode::Overflow));
}

#[test]
fn test_if_needs_comparison() {
    let e = parse_err("10 IF A + 1: EXIT");
    assert!(e.is_code(ErrorCode::SyntaxError));
    let e = parse_err("10 IF A = 1 EXIT");
    assert!(e.is_code(ErrorCode::SyntaxError));
}

#[test]
fn test_if_rejects_input_dim_and_if() {
    for trailer in &["INPUT \"X\", A", "DIM A = 0", "IF A = 1: EXIT"] {
        let e = parse_err(&format!("10 IF A = 1: {}", trailer));
        assert!(e.is_code(ErrorCode::IllegalStatement));
        assert_eq!(e.class(), Class::Semantic);
    }
}

#[test]
fn test_syntax_error_on_later_line() {
    let e = parse_err("10 LET A = 1\n20 LET B 2\n30 EXIT");
    assert_eq!(e.line_number(), Some(20));
}

#[test]
fn test_program_order() {
    let program = parse("30 EXIT\n10 GOTO 30\n20 LET A = \"s\"").unwrap();
    let numbers: Vec<_> = program.iter().map(|l| l.number).collect();
    assert_eq!(numbers, vec![30, 10, 20]);
    match &program.lines[2].statement {
        Statement::Let(_, ident, Value::String(_, s)) => {
            assert_eq!(ident.name, "A");
            assert_eq!(s, "s");
        }
        s => panic!("{:?}", s),
    }
}

#[test]
fn test_display_round_trip() {
    let program = parse("10 IF A>1: PRINT \"BIG\"").unwrap();
    assert_eq!(program.lines[0].to_string(), "10 IF A>1: PRINT \"BIG\"");
}

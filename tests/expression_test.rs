mod common;
use basic::mach::Payload;
use common::*;

fn folded(program: &str, name: &str) -> i64 {
    let t = translator(program);
    match t.variables().lookup(name) {
        Some(var) => var.folded(),
        None => panic!("{} not declared", name),
    }
}

#[test]
fn test_subtraction_is_left_associative() {
    assert_eq!(folded("10 LET A = 3 - 2 - 1", "A"), 0);
}

#[test]
fn test_division_truncates() {
    assert_eq!(folded("10 LET A = 6 / 4", "A"), 1);
    assert_eq!(folded("10 LET A = 7 / 2 * 2", "A"), 6);
}

#[test]
fn test_product_binds_tighter() {
    assert_eq!(folded("10 LET A = 2 + 3 * 4", "A"), 14);
    assert_eq!(folded("10 LET A = 2 * 3 + 4", "A"), 10);
}

#[test]
fn test_unspaced_subtraction() {
    assert_eq!(folded("10 LET A = 3-2", "A"), 1);
    assert_eq!(folded("10 LET A = 3+2", "A"), 5);
    assert_eq!(folded("10 LET A = -5", "A"), -5);
}

#[test]
fn test_unspaced_subtraction_matches_spaced() {
    let unspaced = translate("10 LET A = 10-6/4");
    assert_eq!(unspaced, translate("10 LET A = 10 - 6/4"));
    assert!(section(&unspaced, "data").contains(&"A dq 9"));
    let code = code(&unspaced);
    assert!(code.contains("    mov rax, 6\n"));
    assert!(code.contains("    sub rax, rbx\n"));
    assert!(!code.contains("-6"));
}

#[test]
fn test_variables_fold_to_recorded_value() {
    assert_eq!(folded("10 LET A = 5\n20 LET B = A * 2", "B"), 10);
    assert_eq!(folded("10 DIM N = 9\n20 LET M = N + 1", "M"), 1);
}

#[test]
fn test_division_by_zero() {
    assert_eq!(folded("10 LET A = 1 / 0", "A"), 0);
}

#[test]
fn test_multiply_sequence() {
    let asm = translate("10 LET A = 2 * 3");
    assert_eq!(
        code(&asm),
        "label_10:\n    mov rax, 2\n    push rax\n    mov rax, 3\n    mov rbx, rax\n    \
         pop rax\n    mul rbx\n    mov [A], rax\n"
    );
}

#[test]
fn test_divide_clears_rdx() {
    let asm = translate("10 LET A = 8 / 2");
    assert!(code(&asm).contains("    pop rax\n    xor rdx, rdx\n    div rbx\n"));
}

#[test]
fn test_variable_operands() {
    let asm = translate("10 LET S = \"hi\"\n20 LET N = 1\n30 LET X = N + S");
    let code = code(&asm);
    assert!(code.contains("    mov rax, [N]\n    push rax\n    lea rax, [S]\n"));
}

#[test]
fn test_string_literal_operand() {
    let asm = translate("10 LET A = \"x\" + 1");
    assert!(code(&asm).contains("    lea rax, [str_10]\n"));
    let t = translator("10 LET A = \"x\" + 1");
    assert_eq!(t.variables().lookup("A").unwrap().payload, Payload::Number(1));
}

#[test]
fn test_undefined_variable_in_expression() {
    let e = error("10 LET A = B + 1");
    assert_eq!(e.to_string(), "UNDEFINED VARIABLE IN 10 (11..12)");
}

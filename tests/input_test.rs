mod common;
use basic::lang::ErrorCode;
use common::*;

#[test]
fn test_input_number() {
    let asm = translate("10 DIM N = 0\n20 INPUT \"N? \", N");
    assert!(code(&asm).ends_with(
        "label_20:\n    mov rax, 0\n    mov rdi, ostring2\n    mov rsi, str_20\n    call printf\n    \
         mov rax, 0\n    mov rdi, inumber\n    mov rsi, N\n    call scanf\n"
    ));
    assert!(section(&asm, "data").contains(&"str_20 db \"N? \", 0"));
}

#[test]
fn test_input_string() {
    let asm = translate("10 DIM S = \"\"\n20 INPUT \"Name: \", S");
    assert!(code(&asm).contains("    mov rdi, istring\n    mov rsi, S\n    call scanf\n"));
}

#[test]
fn test_input_initialized_only_prompts() {
    let asm = translate("10 LET X = 5\n20 INPUT \"X? \", X");
    let code = code(&asm);
    assert!(code.contains("    call printf\n"));
    assert!(!code.contains("scanf"));
}

#[test]
fn test_input_undeclared() {
    let e = error("10 INPUT \"X? \", X");
    assert!(e.is_code(ErrorCode::UndefinedVariable));
    assert_eq!(e.to_string(), "UNDEFINED VARIABLE IN 10 (16..17)");
}

#[test]
fn test_input_target_declared_later() {
    let asm = translate("10 GOTO 40\n20 INPUT \"N? \", N\n30 EXIT\n40 DIM N = 0\n50 GOTO 20");
    assert!(code(&asm).contains("    mov rdi, inumber\n    mov rsi, N\n    call scanf\n"));
}

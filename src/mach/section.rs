use super::symbol::{Payload, StringPool, Variables};

/// Format strings and scratch storage the emitted code relies on.
const DATA_PRELUDE: &[&str] = &[
    "istring db \"%[^\", 10, \"]\", 0",
    "inumber db \"%ld\", 0",
    "ostring db \"%s\", 10, 13, 0",
    "ostring2 db \"%s\", 0",
    "onumber db \"%ld\", 10, 13, 0",
    "crlf db 10, 0",
    "newbuf dq 0",
];

const EXTERNS: &[&str] = &["strlen", "malloc", "strcpy", "strcat", "printf", "scanf", "free"];

/// Joins `rdi` and `rsi` into a fresh heap buffer kept in `newbuf`.
const STRING_CONCAT: &[&str] = &[
    "push rdi",
    "push rsi",
    "call strlen",
    "mov rbx, rax",
    "pop rsi",
    "call strlen",
    "add rbx, rax",
    "add rbx, 1",
    "mov rdi, rbx",
    "call malloc",
    "mov rdi, rax",
    "mov [newbuf], rax",
    "pop rsi",
    "call strcpy",
    "pop rsi",
    "call strcat",
    "ret",
];

/// Storage for variables that only `DIM` declared.
pub fn bss(vars: &Variables, out: &mut String) {
    out.push_str("section .bss\n");
    for var in vars.iter().filter(|v| v.declared_only) {
        match var.payload {
            Payload::Number(_) => out.push_str(&format!("{} resq 1\n", var.name)),
            Payload::String(_) => out.push_str(&format!("{} resb 256\n", var.name)),
        }
    }
}

/// Runtime constants, then every string literal, then initialized variables.
pub fn data(vars: &Variables, strings: &StringPool, out: &mut String) {
    out.push_str("\nsection .data\n");
    for line in DATA_PRELUDE {
        out.push_str(line);
        out.push('\n');
    }
    for entry in strings.iter() {
        out.push_str(&format!("{} db \"{}\", 0\n", entry.key, entry.text));
    }
    for var in vars.iter().filter(|v| !v.declared_only) {
        match &var.payload {
            Payload::Number(n) => out.push_str(&format!("{} dq {}\n", var.name, n)),
            Payload::String(s) => out.push_str(&format!("{} db \"{}\", 0\n", var.name, s)),
        }
    }
}

/// Everything in the text section ahead of the first line label.
pub fn text(out: &mut String) {
    out.push_str("\nsection .text\n");
    out.push_str("global _start\n\n");
    for name in EXTERNS {
        out.push_str(&format!("extern {}\n", name));
    }
    out.push_str("\nstring_concat:\n");
    for op in STRING_CONCAT {
        out.push_str(&format!("    {}\n", op));
    }
    out.push_str("\n_start:\n");
}

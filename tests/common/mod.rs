#![allow(dead_code)]

use basic::mach::{Options, Translator};

pub fn translate(s: &str) -> String {
    match basic::mach::translate(s) {
        Ok(asm) => asm,
        Err(e) => panic!("{}", e),
    }
}

pub fn translator(s: &str) -> Translator {
    let mut t = Translator::new(Options::default(), None);
    if let Err(e) = t.translate(s) {
        panic!("{}", e);
    }
    t
}

pub fn error(s: &str) -> basic::lang::Error {
    match basic::mach::translate(s) {
        Ok(asm) => panic!("translated:\n{}", asm),
        Err(e) => e,
    }
}

/// Instructions after the `_start` label.
pub fn code(asm: &str) -> &str {
    match asm.find("\n_start:\n") {
        Some(i) => &asm[i + "\n_start:\n".len()..],
        None => panic!("no _start in:\n{}", asm),
    }
}

/// Lines of one section, without its header.
pub fn section<'a>(asm: &'a str, name: &str) -> Vec<&'a str> {
    let header = format!("section .{}", name);
    asm.lines()
        .skip_while(|l| *l != header)
        .skip(1)
        .take_while(|l| !l.starts_with("section ."))
        .filter(|l| !l.is_empty())
        .collect()
}

pub fn labels(asm: &str) -> Vec<&str> {
    code(asm)
        .lines()
        .filter(|l| l.starts_with("label_") && l.ends_with(':'))
        .collect()
}

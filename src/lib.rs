//! # BASIC to NASM
//!
//! A translator from line-numbered BASIC to x86-64 assembly for NASM.
//!
//! Every line starts with a number and holds one statement:
//! `LET`, `DIM`, `PRINT`, `INPUT`, `GOTO`, `IF` or `EXIT`.
//! ```
//! let asm = basic::mach::translate("10 PRINT \"HELLO\"\n20 EXIT").unwrap();
//! assert!(asm.contains("str_10 db \"HELLO\", 0"));
//! assert!(asm.contains("label_20:"));
//! ```
//!
//! The output links against the C library for `printf` and `scanf`:
//! ```text
//! nasm -f elf64 hello.asm && ld hello.o -lc -dynamic-linker /lib64/ld-linux-x86-64.so.2
//! ```

pub mod lang;
pub mod mach;

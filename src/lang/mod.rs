/*!
# Rust Language Module

This Rust module provides lexical analysis and parsing of the BASIC language.

*/

#[macro_use]
mod error;
mod lex;
mod parse;

pub mod ast;
pub mod token;

pub use error::Class;
pub use error::Error;
pub use error::ErrorCode;
pub use lex::lex;
pub use lex::Lexer;
pub use parse::parse;

/// Byte range within the current source line.
pub type Column = std::ops::Range<usize>;

/// The mandatory leading number of every statement line.
pub type LineNumber = u32;

/// Longest identifier or string literal accepted by the lexer, in bytes.
pub const MAX_LEXEME: usize = 63;

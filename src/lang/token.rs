use super::LineNumber;
use std::collections::HashMap;

thread_local!(
    static STRING_TO_TOKEN: HashMap<std::string::String, Token> = Word::all()
        .iter()
        .cloned()
        .map(Token::Word)
        .chain(Operator::all().iter().cloned().map(Token::Operator))
        .chain(vec![Token::Comma, Token::Colon, Token::LParen, Token::RParen])
        .map(|d| (d.to_string(), d))
        .collect();
);

#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    LineNumber(LineNumber),
    Literal(Literal),
    Word(Word),
    Operator(Operator),
    Ident(String),
    LParen,
    RParen,
    Comma,
    Colon,
    Eol,
    Eof,
}

impl Token {
    /// Keywords, operators and punctuation. Keywords match case-insensitively.
    pub fn from_string(s: &str) -> Option<Token> {
        STRING_TO_TOKEN.with(|stt| stt.get(&s.to_ascii_uppercase()).cloned())
    }

    pub fn is_end_of_line(&self) -> bool {
        matches!(self, Token::Eol | Token::Eof)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Token::*;
        match self {
            LineNumber(n) => write!(f, "{}", n),
            Literal(s) => write!(f, "{}", s),
            Word(s) => write!(f, "{}", s),
            Operator(s) => write!(f, "{}", s),
            Ident(s) => write!(f, "{}", s),
            LParen => write!(f, "("),
            RParen => write!(f, ")"),
            Comma => write!(f, ","),
            Colon => write!(f, ":"),
            Eol => writeln!(f),
            Eof => Ok(()),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Literal {
    /// Unsigned integer.
    Integer(i64),
    /// Integer written with a leading `+` or `-`.
    Signed(i64),
    String(String),
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Literal::*;
        match self {
            Integer(n) => write!(f, "{}", n),
            Signed(n) => write!(f, "{:+}", n),
            String(s) => write!(f, "\"{}\"", s),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Word {
    Dim,
    Exit,
    Goto,
    If,
    Input,
    Let,
    Print,
}

impl Word {
    pub fn all() -> &'static [Word] {
        use Word::*;
        &[Dim, Exit, Goto, If, Input, Let, Print]
    }
}

impl std::fmt::Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Word::*;
        match self {
            Dim => write!(f, "DIM"),
            Exit => write!(f, "EXIT"),
            Goto => write!(f, "GOTO"),
            If => write!(f, "IF"),
            Input => write!(f, "INPUT"),
            Let => write!(f, "LET"),
            Print => write!(f, "PRINT"),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Operator {
    Multiply,
    Divide,
    Plus,
    Minus,
    Equal,
    Less,
    Greater,
}

impl Operator {
    pub fn all() -> &'static [Operator] {
        use Operator::*;
        &[Multiply, Divide, Plus, Minus, Equal, Less, Greater]
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Operator::*;
        match self {
            Multiply => write!(f, "*"),
            Divide => write!(f, "/"),
            Plus => write!(f, "+"),
            Minus => write!(f, "-"),
            Equal => write!(f, "="),
            Less => write!(f, "<"),
            Greater => write!(f, ">"),
        }
    }
}

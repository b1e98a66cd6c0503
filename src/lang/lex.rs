use super::{token::*, Column, Error, LineNumber, MAX_LEXEME};

type Result<T> = std::result::Result<T, Error>;

/// Lex a whole program, including the trailing `Eof`.
pub fn lex(s: &str) -> Result<Vec<(Column, Token)>> {
    let mut lexer = Lexer::new(s);
    let mut tokens = vec![];
    loop {
        let (col, token) = lexer.next_token()?;
        let eof = token == Token::Eof;
        tokens.push((col, token));
        if eof {
            return Ok(tokens);
        }
    }
}

fn is_basic_whitespace(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\r'
}

fn is_basic_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_basic_alphabetic(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// ## Line position aware lexer
///
/// A leading integer is a line number only at the start of a logical line.
/// Anywhere else it is a literal, optionally signed.
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    start_of_line: bool,
    line_offset: usize,
    line_number: Option<LineNumber>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Lexer<'a> {
        Lexer {
            source,
            chars: source.char_indices().peekable(),
            start_of_line: true,
            line_offset: 0,
            line_number: None,
        }
    }

    pub fn next_token(&mut self) -> Result<(Column, Token)> {
        while let Some((_, c)) = self.chars.peek() {
            if !is_basic_whitespace(*c) {
                break;
            }
            self.chars.next();
        }
        let start = self.offset();
        let pk = match self.chars.peek().map(|(_, c)| *c) {
            Some(c) => c,
            None => return Ok((self.column_from(start), Token::Eof)),
        };
        let start_of_line = std::mem::replace(&mut self.start_of_line, false);
        let token = if pk == '\n' {
            self.chars.next();
            self.start_of_line = true;
            Token::Eol
        } else if start_of_line && is_basic_digit(pk) {
            self.line(start)?
        } else if !start_of_line && self.at_number(pk) {
            self.number(start)?
        } else if pk == '"' {
            self.string(start)?
        } else if is_basic_alphabetic(pk) {
            self.alphabetic(start)?
        } else {
            self.minutia(start)?
        };
        let col = self.column_from(start);
        if token == Token::Eol {
            self.line_offset = self.offset();
        }
        Ok((col, token))
    }

    fn offset(&mut self) -> usize {
        match self.chars.peek() {
            Some((i, _)) => *i,
            None => self.source.len(),
        }
    }

    fn column_from(&mut self, start: usize) -> Column {
        (start - self.line_offset)..(self.offset() - self.line_offset)
    }

    fn fail(&mut self, start: usize, error: Error) -> Error {
        let error = error.in_column(&self.column_from(start));
        match self.line_number {
            Some(line) => error.in_line_number(line),
            None => error,
        }
    }

    fn at_number(&self, pk: char) -> bool {
        if is_basic_digit(pk) {
            return true;
        }
        if pk == '-' || pk == '+' {
            let mut ahead = self.chars.clone();
            ahead.next();
            if let Some((_, c)) = ahead.peek() {
                return is_basic_digit(*c);
            }
        }
        false
    }

    fn digits(&mut self, s: &mut String) {
        while let Some((_, c)) = self.chars.peek() {
            if !is_basic_digit(*c) {
                break;
            }
            s.push(*c);
            self.chars.next();
        }
    }

    fn line(&mut self, start: usize) -> Result<Token> {
        let mut s = String::new();
        self.digits(&mut s);
        match s.parse::<LineNumber>() {
            Ok(number) => {
                self.line_number = Some(number);
                Ok(Token::LineNumber(number))
            }
            Err(_) => Err(self.fail(start, error!(Overflow; "INVALID LINE NUMBER"))),
        }
    }

    fn number(&mut self, start: usize) -> Result<Token> {
        let mut s = String::new();
        let mut signed = false;
        if let Some((_, c)) = self.chars.peek() {
            if *c == '-' || *c == '+' {
                signed = true;
                s.push(*c);
                self.chars.next();
            }
        }
        self.digits(&mut s);
        match s.parse::<i64>() {
            Ok(n) if signed => Ok(Token::Literal(Literal::Signed(n))),
            Ok(n) => Ok(Token::Literal(Literal::Integer(n))),
            Err(_) => Err(self.fail(start, error!(Overflow; "NUMBER TOO LARGE"))),
        }
    }

    fn string(&mut self, start: usize) -> Result<Token> {
        self.chars.next();
        let mut s = String::new();
        loop {
            match self.chars.peek() {
                Some((_, '"')) => {
                    self.chars.next();
                    break;
                }
                Some((_, '\n')) | None => break,
                Some((_, c)) => {
                    s.push(*c);
                    self.chars.next();
                }
            }
        }
        if s.len() > MAX_LEXEME {
            return Err(self.fail(start, error!(StringTooLong)));
        }
        Ok(Token::Literal(Literal::String(s)))
    }

    fn alphabetic(&mut self, start: usize) -> Result<Token> {
        let mut s = String::new();
        while let Some((_, c)) = self.chars.peek() {
            if !is_basic_alphabetic(*c) {
                break;
            }
            s.push(*c);
            self.chars.next();
        }
        if let Some(token @ Token::Word(_)) = Token::from_string(&s) {
            return Ok(token);
        }
        if s.len() > MAX_LEXEME {
            return Err(self.fail(start, error!(StringTooLong; "IDENTIFIER TOO LONG")));
        }
        Ok(Token::Ident(s))
    }

    fn minutia(&mut self, start: usize) -> Result<Token> {
        let ch = match self.chars.next() {
            Some((_, ch)) => ch,
            None => return Ok(Token::Eof),
        };
        match Token::from_string(&ch.to_string()) {
            Some(token) => Ok(token),
            None => Err(self.fail(start, error!(IllegalCharacter))),
        }
    }
}

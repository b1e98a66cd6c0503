use super::{ast::*, token::*, Column, Error, Lexer, LineNumber};
use std::convert::TryFrom;

type Result<T> = std::result::Result<T, Error>;

/// Parse a whole program into its line list.
pub fn parse(source: &str) -> Result<Program> {
    Parser::parse(source)
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    peeked: Option<(Column, Token)>,
    line_number: Option<LineNumber>,
    col: Column,
}

impl<'a> Parser<'a> {
    fn parse(source: &'a str) -> Result<Program> {
        let mut parse = Parser {
            lexer: Lexer::new(source),
            peeked: None,
            line_number: None,
            col: 0..0,
        };
        let mut program = Program::default();
        loop {
            match parse.peek()? {
                Token::Eof => return Ok(program),
                Token::Eol => {
                    parse.next()?;
                    continue;
                }
                _ => {}
            }
            match parse.line() {
                Ok(line) => program.lines.push(line),
                Err(e) => return Err(parse.locate(e)),
            }
        }
    }

    fn locate(&self, error: Error) -> Error {
        let error = if *error.column() == (0..0) {
            error.in_column(&self.col)
        } else {
            error
        };
        match (error.line_number(), self.line_number) {
            (None, Some(line)) => error.in_line_number(line),
            _ => error,
        }
    }

    fn column(&self) -> Column {
        self.col.clone()
    }

    fn next(&mut self) -> Result<Token> {
        let (col, token) = match self.peeked.take() {
            Some(peeked) => peeked,
            None => self.lexer.next_token()?,
        };
        self.col = col;
        Ok(token)
    }

    fn peek(&mut self) -> Result<&Token> {
        let peeked = match self.peeked.take() {
            Some(peeked) => peeked,
            None => self.lexer.next_token()?,
        };
        Ok(&self.peeked.insert(peeked).1)
    }

    fn line(&mut self) -> Result<Line> {
        let number = match self.next()? {
            Token::LineNumber(number) => number,
            _ => return Err(error!(SyntaxError; "EXPECTED LINE NUMBER")),
        };
        self.line_number = Some(number);
        let column = self.column();
        let statement = self.statement()?;
        match self.next()? {
            t if t.is_end_of_line() => Ok(Line {
                number,
                column,
                statement,
            }),
            _ => Err(error!(SyntaxError; "EXPECTED END OF LINE")),
        }
    }

    fn statement(&mut self) -> Result<Statement> {
        match self.next()? {
            Token::Word(word) => Statement::for_word(self, word),
            _ => Err(error!(SyntaxError; "EXPECTED STATEMENT")),
        }
    }

    fn expression(&mut self) -> Result<Expression> {
        let mut lhs = self.product()?;
        loop {
            let (op, signed) = match self.peek()? {
                Token::Operator(op @ Operator::Plus) | Token::Operator(op @ Operator::Minus) => {
                    (*op, None)
                }
                // `3-2` lexes as 3 followed by -2
                Token::Literal(Literal::Signed(n)) if *n < 0 => {
                    (Operator::Minus, Some(n.wrapping_neg()))
                }
                Token::Literal(Literal::Signed(n)) => (Operator::Plus, Some(*n)),
                _ => return Ok(lhs),
            };
            self.next()?;
            let column = self.column();
            let rhs = match signed {
                None => self.product()?,
                Some(n) => {
                    let digits = (column.start + 1)..column.end;
                    self.product_from(Expression::Integer(digits, n))?
                }
            };
            let column = column.start..column.start + 1;
            lhs = Expression::for_binary_op(column, op, lhs, rhs);
        }
    }

    fn product(&mut self) -> Result<Expression> {
        let lhs = self.factor()?;
        self.product_from(lhs)
    }

    fn product_from(&mut self, mut lhs: Expression) -> Result<Expression> {
        loop {
            let op = match self.peek()? {
                Token::Operator(op @ Operator::Multiply)
                | Token::Operator(op @ Operator::Divide) => *op,
                _ => return Ok(lhs),
            };
            self.next()?;
            let column = self.column();
            let rhs = self.factor()?;
            lhs = Expression::for_binary_op(column, op, lhs, rhs);
        }
    }

    fn factor(&mut self) -> Result<Expression> {
        match self.next()? {
            Token::Literal(Literal::Integer(n)) | Token::Literal(Literal::Signed(n)) => {
                Ok(Expression::Integer(self.column(), n))
            }
            Token::Literal(Literal::String(s)) => Ok(Expression::String(self.column(), s)),
            Token::Ident(name) => Ok(Expression::Var(Ident::new(self.column(), &name))),
            _ => Err(error!(SyntaxError; "EXPECTED EXPRESSION")),
        }
    }

    fn value(&mut self) -> Result<Value> {
        match self.expression()? {
            Expression::String(col, s) => Ok(Value::String(col, s)),
            expr => Ok(Value::Expression(expr)),
        }
    }

    fn ident(&mut self) -> Result<Ident> {
        match self.next()? {
            Token::Ident(name) => Ok(Ident::new(self.column(), &name)),
            _ => Err(error!(SyntaxError; "EXPECTED IDENTIFIER")),
        }
    }

    fn expect(&mut self, token: Token) -> Result<()> {
        if self.next()? == token {
            return Ok(());
        }
        use Token::*;
        Err(error!(SyntaxError;
            match token {
                Operator(_) => "EXPECTED OPERATOR",
                Comma => "EXPECTED COMMA",
                Colon => "EXPECTED COLON",
                _ => "UNEXPECTED TOKEN",
            }
        ))
    }
}

impl Expression {
    fn for_binary_op(col: Column, op: Operator, lhs: Expression, rhs: Expression) -> Expression {
        use Operator::*;
        match op {
            Plus => Expression::Add(col, Box::new(lhs), Box::new(rhs)),
            Minus => Expression::Subtract(col, Box::new(lhs), Box::new(rhs)),
            Multiply => Expression::Multiply(col, Box::new(lhs), Box::new(rhs)),
            _ => Expression::Divide(col, Box::new(lhs), Box::new(rhs)),
        }
    }
}

impl Statement {
    fn for_word(parse: &mut Parser, word: Word) -> Result<Statement> {
        let column = parse.column();
        use Word::*;
        match word {
            Dim => Self::r#dim(parse, column),
            Exit => Ok(Statement::Exit(column)),
            Goto => Self::r#goto(parse, column),
            If => Self::r#if(parse, column),
            Input => Self::r#input(parse, column),
            Let => Self::r#let(parse, column),
            Print => Self::r#print(parse, column),
        }
    }

    fn r#dim(parse: &mut Parser, column: Column) -> Result<Statement> {
        let ident = parse.ident()?;
        parse.expect(Token::Operator(Operator::Equal))?;
        Ok(Statement::Dim(column, ident, parse.value()?))
    }

    fn r#goto(parse: &mut Parser, column: Column) -> Result<Statement> {
        match parse.next()? {
            Token::Literal(Literal::Integer(n)) => match LineNumber::try_from(n) {
                Ok(line) => Ok(Statement::Goto(column, parse.column(), line)),
                Err(_) => Err(error!(Overflow; "INVALID LINE NUMBER")),
            },
            _ => Err(error!(SyntaxError; "EXPECTED LINE NUMBER")),
        }
    }

    fn r#if(parse: &mut Parser, column: Column) -> Result<Statement> {
        let lhs = parse.expression()?;
        let comparison = match parse.next()? {
            Token::Operator(Operator::Equal) => Comparison::Equal,
            Token::Operator(Operator::Less) => Comparison::Less,
            Token::Operator(Operator::Greater) => Comparison::Greater,
            _ => return Err(error!(SyntaxError; "EXPECTED COMPARISON")),
        };
        let rhs = parse.expression()?;
        parse.expect(Token::Colon)?;
        let then = match parse.next()? {
            Token::Word(word @ Word::Print)
            | Token::Word(word @ Word::Let)
            | Token::Word(word @ Word::Goto)
            | Token::Word(word @ Word::Exit) => Statement::for_word(parse, word)?,
            Token::Word(_) => return Err(error!(IllegalStatement; "NOT ALLOWED AFTER IF")),
            _ => return Err(error!(SyntaxError; "EXPECTED STATEMENT")),
        };
        let condition = Condition {
            lhs,
            comparison,
            rhs,
        };
        Ok(Statement::If(column, condition, Box::new(then)))
    }

    fn r#input(parse: &mut Parser, column: Column) -> Result<Statement> {
        let prompt = match parse.next()? {
            Token::Literal(Literal::String(s)) => (parse.column(), s),
            _ => return Err(error!(SyntaxError; "EXPECTED STRING")),
        };
        parse.expect(Token::Comma)?;
        let ident = parse.ident()?;
        Ok(Statement::Input(column, prompt, ident))
    }

    fn r#let(parse: &mut Parser, column: Column) -> Result<Statement> {
        let ident = parse.ident()?;
        parse.expect(Token::Operator(Operator::Equal))?;
        Ok(Statement::Let(column, ident, parse.value()?))
    }

    fn r#print(parse: &mut Parser, column: Column) -> Result<Statement> {
        match parse.next()? {
            Token::Literal(Literal::String(s)) => {
                Ok(Statement::Print(column, Operand::String(parse.column(), s)))
            }
            Token::Ident(name) => Ok(Statement::Print(
                column,
                Operand::Var(Ident::new(parse.column(), &name)),
            )),
            _ => Err(error!(SyntaxError; "EXPECTED STRING OR IDENTIFIER")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_line(s: &str) -> Statement {
        match parse(s) {
            Ok(mut program) => {
                if program.lines.len() != 1 {
                    panic!();
                }
                program.lines.pop().unwrap().statement
            }
            Err(e) => panic!("{} : {:?}", e, e),
        }
    }

    #[test]
    fn test_let_foo_eq_bar() {
        let answer = Statement::Let(
            3..6,
            Ident::new(7..10, "FOO"),
            Value::Expression(Expression::Var(Ident::new(11..14, "bar"))),
        );
        assert_eq!(parse_line("10 let FOO=bar"), answer);
    }

    #[test]
    fn test_precedence() {
        let answer = Statement::Let(
            3..6,
            Ident::new(7..8, "A"),
            Value::Expression(Expression::Subtract(
                11..12,
                Box::new(Expression::Integer(9..10, 2)),
                Box::new(Expression::Multiply(
                    14..15,
                    Box::new(Expression::Integer(13..14, 3)),
                    Box::new(Expression::Integer(15..16, 4)),
                )),
            )),
        );
        assert_eq!(parse_line("10 LET A=2 - 3*4"), answer);
    }

    #[test]
    fn test_signed_literal_in_operator_position() {
        let answer = Statement::Let(
            3..6,
            Ident::new(7..8, "A"),
            Value::Expression(Expression::Subtract(
                10..11,
                Box::new(Expression::Integer(9..10, 3)),
                Box::new(Expression::Integer(11..12, 2)),
            )),
        );
        assert_eq!(parse_line("10 LET A=3-2"), answer);
    }

    #[test]
    fn test_if_trailer() {
        let answer = Statement::If(
            3..5,
            Condition {
                lhs: Expression::Var(Ident::new(6..7, "X")),
                comparison: Comparison::Less,
                rhs: Expression::Integer(8..9, 5),
            },
            Box::new(Statement::Goto(10..14, 15..17, 10)),
        );
        assert_eq!(parse_line("10 IF X<5:GOTO 10"), answer);
    }

    #[test]
    fn test_missing_identifier() {
        let e = parse("10 LET = 5").unwrap_err();
        assert_eq!(e.to_string(), "SYNTAX ERROR IN 10 (7..8); EXPECTED IDENTIFIER");
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let program = parse("\n10 EXIT\n\n\n20 EXIT\n").unwrap();
        assert_eq!(program.len(), 2);
        assert_eq!(program.lines[1].number, 20);
    }
}

use super::{Column, LineNumber};

/// A parsed program: one statement per numbered line, in source order.
#[derive(Debug, PartialEq, Default)]
pub struct Program {
    pub lines: Vec<Line>,
}

#[derive(Debug, PartialEq)]
pub struct Line {
    pub number: LineNumber,
    pub column: Column,
    pub statement: Statement,
}

#[derive(Debug, PartialEq)]
pub enum Statement {
    Dim(Column, Ident, Value),
    Exit(Column),
    Goto(Column, Column, LineNumber),
    If(Column, Condition, Box<Statement>),
    Input(Column, (Column, String), Ident),
    Let(Column, Ident, Value),
    Print(Column, Operand),
}

#[derive(Debug, PartialEq, Clone)]
pub struct Ident {
    pub column: Column,
    pub name: String,
}

/// Right hand side of `LET` and `DIM`.
#[derive(Debug, PartialEq)]
pub enum Value {
    String(Column, String),
    Expression(Expression),
}

/// What `PRINT` accepts.
#[derive(Debug, PartialEq)]
pub enum Operand {
    String(Column, String),
    Var(Ident),
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Comparison {
    Equal,
    Less,
    Greater,
}

#[derive(Debug, PartialEq)]
pub struct Condition {
    pub lhs: Expression,
    pub comparison: Comparison,
    pub rhs: Expression,
}

#[derive(Debug, PartialEq)]
pub enum Expression {
    Integer(Column, i64),
    String(Column, String),
    Var(Ident),
    Add(Column, Box<Expression>, Box<Expression>),
    Subtract(Column, Box<Expression>, Box<Expression>),
    Multiply(Column, Box<Expression>, Box<Expression>),
    Divide(Column, Box<Expression>, Box<Expression>),
}

impl Program {
    pub fn iter(&self) -> std::slice::Iter<'_, Line> {
        self.lines.iter()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Ident {
    pub fn new(column: Column, name: &str) -> Ident {
        Ident {
            column,
            name: name.to_string(),
        }
    }
}

impl Expression {
    pub fn column(&self) -> &Column {
        use Expression::*;
        match self {
            Integer(col, _) | String(col, _) => col,
            Var(ident) => &ident.column,
            Add(col, ..) | Subtract(col, ..) | Multiply(col, ..) | Divide(col, ..) => col,
        }
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} {}", self.number, self.statement)
    }
}

impl std::fmt::Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Statement::*;
        match self {
            Dim(_, ident, value) => write!(f, "DIM {}={}", ident, value),
            Exit(_) => write!(f, "EXIT"),
            Goto(_, _, line) => write!(f, "GOTO {}", line),
            If(_, cond, then) => write!(f, "IF {}: {}", cond, then),
            Input(_, (_, prompt), ident) => write!(f, "INPUT \"{}\", {}", prompt, ident),
            Let(_, ident, value) => write!(f, "LET {}={}", ident, value),
            Print(_, operand) => write!(f, "PRINT {}", operand),
        }
    }
}

impl std::fmt::Display for Ident {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Value::String(_, s) => write!(f, "\"{}\"", s),
            Value::Expression(expr) => write!(f, "{}", expr),
        }
    }
}

impl std::fmt::Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Operand::String(_, s) => write!(f, "\"{}\"", s),
            Operand::Var(ident) => write!(f, "{}", ident),
        }
    }
}

impl std::fmt::Display for Comparison {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Comparison::Equal => write!(f, "="),
            Comparison::Less => write!(f, "<"),
            Comparison::Greater => write!(f, ">"),
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}{}{}", self.lhs, self.comparison, self.rhs)
    }
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Expression::*;
        match self {
            Integer(_, n) => write!(f, "{}", n),
            String(_, s) => write!(f, "\"{}\"", s),
            Var(ident) => write!(f, "{}", ident),
            Add(_, lhs, rhs) => write!(f, "{}+{}", lhs, rhs),
            Subtract(_, lhs, rhs) => write!(f, "{}-{}", lhs, rhs),
            Multiply(_, lhs, rhs) => write!(f, "{}*{}", lhs, rhs),
            Divide(_, lhs, rhs) => write!(f, "{}/{}", lhs, rhs),
        }
    }
}

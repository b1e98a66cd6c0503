use super::{Column, LineNumber};

#[derive(Clone, PartialEq)]
pub struct Error {
    code: u16,
    line_number: Option<LineNumber>,
    column: Column,
    message: &'static str,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident, ..$col:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_column($col)
    };
    ($err:ident, $line:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_line_number($line)
    };
    ($err:ident; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message($msg)
    };
    ($err:ident, ..$col:expr;  $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_column($col)
            .message($msg)
    };
    ($err:ident, $line:expr, ..$col:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_line_number($line)
            .in_column($col)
    };
    ($err:ident, $line:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_line_number($line)
            .message($msg)
    };
    ($err:ident, $line:expr, ..$col:expr;  $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_line_number($line)
            .in_column($col)
            .message($msg)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code: code as u16,
            line_number: None,
            column: 0..0,
            message: "",
        }
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn line_number(&self) -> Option<LineNumber> {
        self.line_number
    }

    pub fn column(&self) -> &Column {
        &self.column
    }

    pub fn is_code(&self, code: ErrorCode) -> bool {
        self.code == code as u16
    }

    /// Which of the lexical, syntactic and semantic stages rejected the program.
    pub fn class(&self) -> Class {
        match self.code {
            c if c == ErrorCode::IllegalCharacter as u16 => Class::Lexical,
            c if c == ErrorCode::UndefinedVariable as u16 => Class::Semantic,
            c if c == ErrorCode::IllegalStatement as u16 => Class::Semantic,
            c if c == ErrorCode::OutOfMemory as u16 => Class::Capacity,
            _ => Class::Syntactic,
        }
    }

    pub fn in_line_number(&self, line: LineNumber) -> Error {
        debug_assert!(self.line_number.is_none());
        Error {
            code: self.code,
            line_number: Some(line),
            column: self.column.clone(),
            message: self.message,
        }
    }

    pub fn in_column(&self, column: &Column) -> Error {
        debug_assert_eq!(self.column, 0..0);
        Error {
            code: self.code,
            line_number: self.line_number,
            column: column.clone(),
            message: self.message,
        }
    }

    pub fn message(&self, message: &'static str) -> Error {
        debug_assert_eq!(self.message.len(), 0);
        Error {
            code: self.code,
            line_number: self.line_number,
            column: self.column.clone(),
            message,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Class {
    Lexical,
    Syntactic,
    Semantic,
    Capacity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    SyntaxError = 2,
    Overflow = 6,
    OutOfMemory = 7,
    StringTooLong = 15,
    IllegalCharacter = 24,
    UndefinedVariable = 25,
    IllegalStatement = 27,
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let code_str = match self.code {
            2 => "SYNTAX ERROR",
            6 => "OVERFLOW",
            7 => "OUT OF MEMORY",
            15 => "STRING TOO LONG",
            24 => "ILLEGAL CHARACTER",
            25 => "UNDEFINED VARIABLE",
            27 => "ILLEGAL STATEMENT",
            _ => "",
        };
        let mut location = String::new();
        if let Some(line_number) = self.line_number {
            location.push_str(&format!(" {}", line_number));
        }
        if (0..0) != self.column {
            location.push_str(&format!(" ({}..{})", self.column.start, self.column.end));
        }
        if code_str.is_empty() {
            write!(f, "PROGRAM ERROR {}", self.code)?;
        } else {
            write!(f, "{}", code_str)?;
        }
        if !location.is_empty() {
            write!(f, " IN{}", location)?;
        }
        if !self.message.is_empty() {
            write!(f, "; {}", self.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_everything() {
        let e = error!(SyntaxError, 10, ..&(7..8); "EXPECTED IDENTIFIER");
        assert_eq!(e.to_string(), "SYNTAX ERROR IN 10 (7..8); EXPECTED IDENTIFIER");
    }

    #[test]
    fn test_display_bare() {
        assert_eq!(error!(OutOfMemory).to_string(), "OUT OF MEMORY");
        assert_eq!(
            error!(UndefinedVariable, 30).to_string(),
            "UNDEFINED VARIABLE IN 30"
        );
    }

    #[test]
    fn test_class() {
        assert_eq!(error!(IllegalCharacter).class(), Class::Lexical);
        assert_eq!(error!(SyntaxError).class(), Class::Syntactic);
        assert_eq!(error!(StringTooLong).class(), Class::Syntactic);
        assert_eq!(error!(UndefinedVariable).class(), Class::Semantic);
        assert_eq!(error!(IllegalStatement).class(), Class::Semantic);
        assert_eq!(error!(OutOfMemory).class(), Class::Capacity);
    }
}

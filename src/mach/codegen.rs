use super::symbol::{Kind, StringKey, StringPool, Variables};
use crate::error;
use crate::lang::ast::*;
use crate::lang::{Error, LineNumber};
use slog::{debug, o, trace, warn, Logger};
use std::collections::{HashMap, HashSet};

type Result<T> = std::result::Result<T, Error>;

/// Both passes walk the same program with the same generator.
/// Only `Emit` produces text; both update the tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    Analyze,
    Emit,
}

impl Pass {
    pub fn as_str(self) -> &'static str {
        match self {
            Pass::Analyze => "analyze",
            Pass::Emit => "emit",
        }
    }
}

macro_rules! emit {
    ($gen:expr, $($arg:tt)*) => {
        if $gen.emitting() {
            $gen.text.push_str(&format!($($arg)*));
            $gen.text.push('\n');
        }
    };
}

/// Walk `program` once, returning the instruction text (empty for `Analyze`).
pub fn codegen(
    pass: Pass,
    program: &Program,
    vars: &mut Variables,
    strings: &mut StringPool,
    logger: &Logger,
) -> Result<String> {
    Generator::new(pass, vars, strings, logger).program(program)
}

struct Generator<'a> {
    pass: Pass,
    muted: bool,
    vars: &'a mut Variables,
    strings: &'a mut StringPool,
    text: String,
    line_number: LineNumber,
    skip_labels: HashMap<LineNumber, usize>,
    logger: Logger,
}

impl<'a> Generator<'a> {
    fn new(
        pass: Pass,
        vars: &'a mut Variables,
        strings: &'a mut StringPool,
        logger: &Logger,
    ) -> Generator<'a> {
        Generator {
            pass,
            muted: false,
            vars,
            strings,
            text: String::new(),
            line_number: 0,
            skip_labels: HashMap::new(),
            logger: logger.new(o!("pass" => pass.as_str())),
        }
    }

    fn emitting(&self) -> bool {
        self.pass == Pass::Emit && !self.muted
    }

    fn program(mut self, program: &Program) -> Result<String> {
        if self.pass == Pass::Analyze {
            self.check_line_numbers(program);
        }
        for line in program.iter() {
            self.line_number = line.number;
            trace!(self.logger, "line"; "source" => %line);
            emit!(self, "label_{}:", line.number);
            if let Err(error) = self.statement(&line.statement) {
                return Err(match error.line_number() {
                    Some(_) => error,
                    None => error.in_line_number(line.number),
                });
            }
        }
        debug!(self.logger, "pass complete";
            "variables" => self.vars.len(),
            "strings" => self.strings.len(),
            "bytes" => self.text.len());
        Ok(self.text)
    }

    fn check_line_numbers(&self, program: &Program) {
        let mut seen = HashSet::new();
        for line in program.iter() {
            if !seen.insert(line.number) {
                warn!(self.logger, "duplicate line number"; "line" => line.number);
            }
        }
        for line in program.iter() {
            let target = match &line.statement {
                Statement::Goto(_, _, target) => *target,
                Statement::If(_, _, then) => match then.as_ref() {
                    Statement::Goto(_, _, target) => *target,
                    _ => continue,
                },
                _ => continue,
            };
            if !seen.contains(&target) {
                warn!(self.logger, "jump to missing line";
                    "line" => line.number, "target" => target);
            }
        }
    }

    fn record_string(&mut self, s: &str) -> Result<StringKey> {
        self.strings.record(self.line_number, s)
    }

    fn statement(&mut self, statement: &Statement) -> Result<()> {
        use Statement::*;
        match statement {
            Dim(_, ident, value) => self.r#dim(ident, value),
            Exit(_) => self.r#exit(),
            Goto(_, _, line) => self.r#goto(*line),
            If(_, condition, then) => self.r#if(condition, then),
            Input(_, (_, prompt), ident) => self.r#input(prompt, ident),
            Let(_, ident, value) => self.r#let(ident, value),
            Print(_, operand) => self.r#print(operand),
        }
    }

    fn r#dim(&mut self, ident: &Ident, value: &Value) -> Result<()> {
        match value {
            Value::String(..) => {
                self.vars
                    .declare_string(self.line_number, &ident.name, "", true)?;
            }
            Value::Expression(expr) => {
                self.muted = true;
                let folded = self.expression(expr);
                self.muted = false;
                folded?;
                self.vars
                    .declare_number(self.line_number, &ident.name, 0, true)?;
            }
        }
        Ok(())
    }

    fn r#exit(&mut self) -> Result<()> {
        emit!(self, "    mov rax, 60");
        emit!(self, "    xor rdi, rdi");
        emit!(self, "    syscall");
        Ok(())
    }

    fn r#goto(&mut self, line: LineNumber) -> Result<()> {
        emit!(self, "    jmp label_{}", line);
        Ok(())
    }

    fn r#if(&mut self, condition: &Condition, then: &Statement) -> Result<()> {
        let ordinal = *self.skip_labels.entry(self.line_number).or_insert(0);
        let label = format!("label_{}_{}", self.line_number, ordinal);
        self.expression(&condition.lhs)?;
        emit!(self, "    push rax");
        self.expression(&condition.rhs)?;
        emit!(self, "    pop rbx");
        emit!(self, "    cmp rbx, rax");
        let jump = match condition.comparison {
            Comparison::Equal => "jne",
            Comparison::Greater => "jng",
            Comparison::Less => "jnl",
        };
        emit!(self, "    {} {}", jump, label);
        self.statement(then)?;
        emit!(self, "{}:", label);
        if let Some(n) = self.skip_labels.get_mut(&self.line_number) {
            *n += 1;
        }
        Ok(())
    }

    fn r#input(&mut self, prompt: &str, ident: &Ident) -> Result<()> {
        let key = self.record_string(prompt)?;
        // Targets resolve against the table the analyze pass completed.
        if self.pass == Pass::Analyze {
            return Ok(());
        }
        let (name, kind, declared_only) = match self.vars.lookup(&ident.name) {
            Some(var) => (var.name.clone(), var.kind(), var.declared_only),
            None => return Err(error!(UndefinedVariable, ..&ident.column)),
        };
        emit!(self, "    mov rax, 0");
        emit!(self, "    mov rdi, ostring2");
        emit!(self, "    mov rsi, {}", key);
        emit!(self, "    call printf");
        if declared_only {
            let format = match kind {
                Kind::String => "istring",
                Kind::Number => "inumber",
            };
            emit!(self, "    mov rax, 0");
            emit!(self, "    mov rdi, {}", format);
            emit!(self, "    mov rsi, {}", name);
            emit!(self, "    call scanf");
        }
        Ok(())
    }

    fn r#let(&mut self, ident: &Ident, value: &Value) -> Result<()> {
        match value {
            Value::String(_, s) => {
                self.vars
                    .declare_string(self.line_number, &ident.name, s, false)?;
            }
            Value::Expression(expr) => {
                let folded = self.expression(expr)?;
                let name = match self.vars.lookup(&ident.name) {
                    Some(var) => var.name.clone(),
                    None => ident.name.clone(),
                };
                emit!(self, "    mov [{}], rax", name);
                self.vars
                    .declare_number(self.line_number, &ident.name, folded, false)?;
            }
        }
        Ok(())
    }

    fn r#print(&mut self, operand: &Operand) -> Result<()> {
        match operand {
            Operand::String(_, s) => {
                let key = self.record_string(s)?;
                emit!(self, "    mov rax, 0");
                emit!(self, "    mov rdi, ostring");
                emit!(self, "    mov rsi, {}", key);
                emit!(self, "    call printf");
            }
            Operand::Var(_) if self.pass == Pass::Analyze => {}
            Operand::Var(ident) => {
                let (name, kind) = match self.vars.lookup(&ident.name) {
                    Some(var) => (var.name.clone(), var.kind()),
                    None => return Err(error!(UndefinedVariable, ..&ident.column)),
                };
                emit!(self, "    mov rax, 0");
                match kind {
                    Kind::String => {
                        emit!(self, "    mov rdi, ostring");
                        emit!(self, "    mov rsi, {}", name);
                    }
                    Kind::Number => {
                        emit!(self, "    mov rdi, onumber");
                        emit!(self, "    mov rsi, [{}]", name);
                    }
                }
                emit!(self, "    call printf");
            }
        }
        Ok(())
    }

    /// Leaves the runtime value in `rax` and returns the folded value.
    fn expression(&mut self, expr: &Expression) -> Result<i64> {
        use Expression::*;
        match expr {
            Integer(_, n) => {
                emit!(self, "    mov rax, {}", n);
                Ok(*n)
            }
            String(_, s) => {
                let key = self.record_string(s)?;
                emit!(self, "    lea rax, [{}]", key);
                Ok(0)
            }
            Var(ident) => {
                let (name, kind, folded) = match self.vars.lookup(&ident.name) {
                    Some(var) => (var.name.clone(), var.kind(), var.folded()),
                    None => return Err(error!(UndefinedVariable, ..&ident.column)),
                };
                match kind {
                    Kind::Number => emit!(self, "    mov rax, [{}]", name),
                    Kind::String => emit!(self, "    lea rax, [{}]", name),
                }
                Ok(folded)
            }
            Add(_, lhs, rhs) => {
                let (a, b) = self.operands(lhs, rhs)?;
                emit!(self, "    add rax, rbx");
                Ok(a.wrapping_add(b))
            }
            Subtract(_, lhs, rhs) => {
                let (a, b) = self.operands(lhs, rhs)?;
                emit!(self, "    sub rax, rbx");
                Ok(a.wrapping_sub(b))
            }
            Multiply(_, lhs, rhs) => {
                let (a, b) = self.operands(lhs, rhs)?;
                emit!(self, "    mul rbx");
                Ok(a.wrapping_mul(b))
            }
            Divide(col, lhs, rhs) => {
                let (a, b) = self.operands(lhs, rhs)?;
                emit!(self, "    xor rdx, rdx");
                emit!(self, "    div rbx");
                if b == 0 {
                    if self.pass == Pass::Analyze {
                        warn!(self.logger, "division by zero folds to 0";
                            "line" => self.line_number, "column" => ?col);
                    }
                    return Ok(0);
                }
                Ok(a.wrapping_div(b))
            }
        }
    }

    /// Left operand in `rax`, right operand in `rbx`.
    fn operands(&mut self, lhs: &Expression, rhs: &Expression) -> Result<(i64, i64)> {
        let a = self.expression(lhs)?;
        emit!(self, "    push rax");
        let b = self.expression(rhs)?;
        emit!(self, "    mov rbx, rax");
        emit!(self, "    pop rax");
        Ok((a, b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::parse;
    use slog::Discard;

    fn run(source: &str) -> (String, Variables, StringPool) {
        let logger = Logger::root(Discard, o!());
        let program = parse(source).unwrap();
        let mut vars = Variables::new(64);
        let mut strings = StringPool::new(64);
        let analyzed =
            codegen(Pass::Analyze, &program, &mut vars, &mut strings, &logger).unwrap();
        assert!(analyzed.is_empty());
        let mut emitted = StringPool::new(64);
        let text = codegen(Pass::Emit, &program, &mut vars, &mut emitted, &logger).unwrap();
        assert_eq!(strings, emitted);
        (text, vars, strings)
    }

    #[test]
    fn test_left_to_right_folding() {
        let (_, vars, _) = run("10 LET A = 3 - 2 - 1\n20 LET B = 6 / 4\n30 LET C = 2 + 3 * 4");
        assert_eq!(vars.lookup("A").unwrap().folded(), 0);
        assert_eq!(vars.lookup("B").unwrap().folded(), 1);
        assert_eq!(vars.lookup("C").unwrap().folded(), 14);
    }

    #[test]
    fn test_division_by_zero_folds_to_zero() {
        let (text, vars, _) = run("10 LET A = 5 / 0");
        assert_eq!(vars.lookup("A").unwrap().folded(), 0);
        assert!(text.contains("    div rbx\n"));
    }

    #[test]
    fn test_binary_sequence() {
        let (text, ..) = run("10 LET A = 1 + 2");
        let expected = "label_10:\n    mov rax, 1\n    push rax\n    mov rax, 2\n    \
                        mov rbx, rax\n    pop rax\n    add rax, rbx\n    mov [A], rax\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_dim_expression_is_silent() {
        let (text, vars, _) = run("10 DIM N = 5");
        assert_eq!(text, "label_10:\n");
        let n = vars.lookup("N").unwrap();
        assert!(n.declared_only);
        assert_eq!(n.folded(), 0);
    }

    #[test]
    fn test_undefined_variable_has_location() {
        let logger = Logger::root(Discard, o!());
        let program = parse("10 LET A = 1\n20 LET C = B").unwrap();
        let mut vars = Variables::new(64);
        let mut strings = StringPool::new(64);
        let e = codegen(Pass::Analyze, &program, &mut vars, &mut strings, &logger).unwrap_err();
        assert_eq!(e.to_string(), "UNDEFINED VARIABLE IN 20 (11..12)");
    }

    #[test]
    fn test_print_and_input_resolve_after_analysis() {
        let (text, vars, _) = run("10 GOTO 40\n20 INPUT \"N? \", N\n30 PRINT N\n40 DIM N = 0");
        assert!(vars.lookup("N").unwrap().declared_only);
        assert!(text.contains("    mov rsi, N\n    call scanf\n"));
        assert!(text.contains("    mov rsi, [N]\n"));
    }
}

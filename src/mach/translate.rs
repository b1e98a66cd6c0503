use super::codegen::{codegen, Pass};
use super::section;
use super::symbol::{StringPool, Variables};
use crate::lang::{parse, Error};
use slog::{debug, info, o, Discard, Logger};

type Result<T> = std::result::Result<T, Error>;

/// Capacity limits for a translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub max_variables: usize,
    pub max_strings: usize,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            max_variables: 1024,
            max_strings: 1024,
        }
    }
}

/// Translate with default options and no logging.
pub fn translate(source: &str) -> Result<String> {
    Translator::default().translate(source)
}

/// ## Translation context
///
/// Owns the variable table and string pool. After a successful
/// `translate` they describe the program that was just translated.

pub struct Translator {
    options: Options,
    vars: Variables,
    strings: StringPool,
    logger: Logger,
}

impl Default for Translator {
    fn default() -> Translator {
        Translator::new(Options::default(), None)
    }
}

impl Translator {
    pub fn new<L: Into<Option<Logger>>>(options: Options, logger: L) -> Translator {
        let logger = logger
            .into()
            .unwrap_or_else(|| Logger::root(Discard, o!()));
        Translator {
            vars: Variables::new(options.max_variables),
            strings: StringPool::new(options.max_strings),
            options,
            logger,
        }
    }

    pub fn variables(&self) -> &Variables {
        &self.vars
    }

    pub fn strings(&self) -> &StringPool {
        &self.strings
    }

    pub fn translate(&mut self, source: &str) -> Result<String> {
        self.vars.clear();
        self.strings.clear();
        let program = parse(source)?;
        debug!(self.logger, "parsed"; "lines" => program.len());

        codegen(
            Pass::Analyze,
            &program,
            &mut self.vars,
            &mut self.strings,
            &self.logger,
        )?;

        let mut out = String::new();
        section::bss(&self.vars, &mut out);
        section::data(&self.vars, &self.strings, &mut out);
        section::text(&mut out);

        let mut emitted = StringPool::new(self.options.max_strings);
        let text = codegen(
            Pass::Emit,
            &program,
            &mut self.vars,
            &mut emitted,
            &self.logger,
        )?;
        debug_assert_eq!(self.strings, emitted);
        out.push_str(&text);

        info!(self.logger, "translated";
            "lines" => program.len(),
            "variables" => self.vars.len(),
            "strings" => self.strings.len());
        Ok(out)
    }
}

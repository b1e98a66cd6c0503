use crate::error;
use crate::lang::{Error, LineNumber};
use indexmap::IndexMap;
use std::collections::HashMap;

type Result<T> = std::result::Result<T, Error>;

/// Longest string a textual variable may hold, in bytes.
pub const MAX_STRING: usize = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Number,
    String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Number(i64),
    String(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub line_number: LineNumber,
    /// Reserved by `DIM`: uninitialized storage, no recorded value.
    pub declared_only: bool,
    pub payload: Payload,
}

impl Variable {
    pub fn kind(&self) -> Kind {
        match self.payload {
            Payload::Number(_) => Kind::Number,
            Payload::String(_) => Kind::String,
        }
    }

    /// The value constant folding sees for this variable.
    pub fn folded(&self) -> i64 {
        match self.payload {
            Payload::Number(n) if !self.declared_only => n,
            _ => 0,
        }
    }
}

/// ## Variable table
///
/// Keyed case-insensitively and kept in declaration order.
/// The first declaration of a name wins; later ones are ignored.

#[derive(Debug, Clone, PartialEq)]
pub struct Variables {
    capacity: usize,
    vars: IndexMap<String, Variable>,
}

impl Variables {
    pub fn new(capacity: usize) -> Variables {
        Variables {
            capacity,
            vars: IndexMap::new(),
        }
    }

    pub fn clear(&mut self) {
        self.vars.clear();
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.vars.values()
    }

    pub fn lookup(&self, name: &str) -> Option<&Variable> {
        self.vars.get(&name.to_ascii_uppercase())
    }

    pub fn declare_number(
        &mut self,
        line_number: LineNumber,
        name: &str,
        value: i64,
        declared_only: bool,
    ) -> Result<bool> {
        self.declare(line_number, name, Payload::Number(value), declared_only)
    }

    pub fn declare_string(
        &mut self,
        line_number: LineNumber,
        name: &str,
        value: &str,
        declared_only: bool,
    ) -> Result<bool> {
        let value = truncate(value, MAX_STRING).to_string();
        self.declare(line_number, name, Payload::String(value), declared_only)
    }

    /// Returns false when the name already existed.
    fn declare(
        &mut self,
        line_number: LineNumber,
        name: &str,
        payload: Payload,
        declared_only: bool,
    ) -> Result<bool> {
        let key = name.to_ascii_uppercase();
        if self.vars.contains_key(&key) {
            return Ok(false);
        }
        if self.vars.len() >= self.capacity {
            return Err(error!(OutOfMemory; "TOO MANY VARIABLES"));
        }
        let var = Variable {
            name: name.to_string(),
            line_number,
            declared_only,
            payload,
        };
        self.vars.insert(key, var);
        Ok(true)
    }
}

fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Data section name of a string constant.
///
/// The first literal of a line is `str_10`, later ones on the
/// same line number are `str_10_1`, `str_10_2` and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StringKey {
    pub line_number: LineNumber,
    pub ordinal: usize,
}

impl std::fmt::Display for StringKey {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.ordinal == 0 {
            write!(f, "str_{}", self.line_number)
        } else {
            write!(f, "str_{}_{}", self.line_number, self.ordinal)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StringEntry {
    pub key: StringKey,
    pub text: String,
}

/// ## String literal pool
///
/// Every occurrence is recorded, identical text included.

#[derive(Debug, Clone, PartialEq)]
pub struct StringPool {
    capacity: usize,
    entries: Vec<StringEntry>,
    per_line: HashMap<LineNumber, usize>,
}

impl StringPool {
    pub fn new(capacity: usize) -> StringPool {
        StringPool {
            capacity,
            entries: vec![],
            per_line: HashMap::new(),
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.per_line.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StringEntry> {
        self.entries.iter()
    }

    pub fn record(&mut self, line_number: LineNumber, text: &str) -> Result<StringKey> {
        if self.entries.len() >= self.capacity {
            return Err(error!(OutOfMemory; "TOO MANY STRINGS"));
        }
        let ordinal = self.per_line.entry(line_number).or_insert(0);
        let key = StringKey {
            line_number,
            ordinal: *ordinal,
        };
        *ordinal += 1;
        self.entries.push(StringEntry {
            key,
            text: text.to_string(),
        });
        Ok(key)
    }
}

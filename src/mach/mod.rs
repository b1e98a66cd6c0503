/*!
## Rust Machine Module

This Rust module turns a parsed BASIC program into NASM x86-64 assembly.

The program is walked twice. The analyze pass fills the variable table
and string pool without producing text. The data sections are written
from those tables, then the emit pass produces the instructions.

*/

mod codegen;
mod section;
mod symbol;
mod translate;

pub use codegen::Pass;
pub use symbol::Kind;
pub use symbol::Payload;
pub use symbol::StringEntry;
pub use symbol::StringKey;
pub use symbol::StringPool;
pub use symbol::Variable;
pub use symbol::Variables;
pub use symbol::MAX_STRING;
pub use translate::translate;
pub use translate::Options;
pub use translate::Translator;

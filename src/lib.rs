//! Language core for Gradus, a leveled beginners' language that compiles
//! to Python. The pipeline is:
//!
//!   source text + level
//!     -> parser      (level rule set, line-oriented)
//!     -> analyzer    (symbol table, bare-text classification)
//!     -> codegen     (escape normalization, list lowering, Python text)
//!
//! A failed parse makes one bounded repair attempt whose result is
//! attached to the diagnostic as a suggestion; it never changes the
//! authoritative outcome. Every compilation is self-contained: no state
//! survives a call, so distinct programs can be compiled from as many
//! threads as the host likes.

pub mod analyzer;
pub mod codegen;
pub mod errors;
pub mod grammar;
pub mod keywords;
pub mod lexer;
pub mod parser;

pub use codegen::CompiledProgram;
pub use errors::{CompileError, ErrorKind};
pub use grammar::{GrammarRules, MAX_LEVEL, MIN_LEVEL};
pub use keywords::{Command, KeywordSet};

use analyzer::Analyzer;
use codegen::CodeGenerator;
use parser::{repair, Parser};

/// Compile a program with the default English keyword table.
///
/// Levels outside `MIN_LEVEL..=MAX_LEVEL` are a caller contract
/// violation and panic; everything a student can get wrong comes back as
/// a [`CompileError`].
pub fn compile(source: &str, level: u8) -> Result<CompiledProgram, CompileError> {
    compile_with_keywords(source, level, &KeywordSet::english())
}

/// Compile a program against an already-resolved keyword table. Keyword
/// resolution (translations, classroom overrides) belongs to the caller;
/// the table is read-only here.
pub fn compile_with_keywords(
    source: &str,
    level: u8,
    keywords: &KeywordSet,
) -> Result<CompiledProgram, CompileError> {
    let grammar = GrammarRules::for_level(level);

    let program = match Parser::new(&grammar, keywords).parse(source) {
        Ok(program) => program,
        Err(CompileError::Parse {
            line,
            column,
            fixed_code: _,
        }) => {
            let fixed_code = repair::repair(source, &grammar, keywords, line, column);
            return Err(CompileError::Parse {
                line,
                column,
                fixed_code,
            });
        }
        Err(other) => return Err(other),
    };

    let (_table, program) = Analyzer::new().analyze(program)?;

    Ok(CodeGenerator::new().generate(&program))
}

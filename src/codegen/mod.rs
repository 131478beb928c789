//! Emits the final Python source: one chunk per statement, in source
//! order, with the source's blank-line structure reproduced between
//! chunks. Output is deterministic and byte-exact for a given input and
//! level.

pub mod escape;

use crate::keywords::Command;
use crate::parser::ast::{Arg, Fragment, Literal, Program, Statement};
use escape::{normalize, string_literal};

/// The generated target source plus the commands used, in source order,
/// for downstream feature-usage tracking.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledProgram {
    pub source: String,
    pub commands: Vec<Command>,
}

pub struct CodeGenerator;

impl CodeGenerator {
    pub fn new() -> Self {
        CodeGenerator
    }

    pub fn generate(&self, program: &Program) -> CompiledProgram {
        let mut source = String::new();
        let mut commands = Vec::with_capacity(program.statements.len());
        let mut prev_line = 0usize;

        for stmt in &program.statements {
            if prev_line > 0 {
                // A gap of k source lines yields k newlines, so blank
                // source lines stay blank output lines.
                for _ in 0..stmt.line() - prev_line {
                    source.push('\n');
                }
            }
            source.push_str(&self.gen_statement(stmt));
            commands.push(stmt.command());
            prev_line = stmt.line();
        }

        CompiledProgram { source, commands }
    }

    fn gen_statement(&self, stmt: &Statement) -> String {
        match stmt {
            Statement::Print { parts, .. } => {
                format!("print(f'{}')", self.gen_parts(parts))
            }
            Statement::Ask { target, parts, .. } => {
                format!("{} = input(f'{}')", target, self.gen_parts(parts))
            }
            Statement::Assign { target, value, .. } => {
                format!("{} = {}", target, string_literal(value))
            }
            Statement::AssignList {
                target, elements, ..
            } => {
                let rendered: Vec<String> = elements.iter().map(string_literal).collect();
                format!("{} = [{}]", target, rendered.join(", "))
            }
            Statement::AddToList { item, list, .. } => {
                format!("{}.append({})", list, self.gen_item(item))
            }
            Statement::RemoveFromList { item, list, .. } => {
                format!(
                    "try:\n  {}.remove({})\nexcept:\n  pass",
                    list,
                    self.gen_item(item)
                )
            }
            Statement::Forward { value, .. } => match value {
                None => "t.forward(50)".to_string(),
                Some(Arg::Number(n)) => format!("t.forward({n})"),
                Some(Arg::Name(name)) => format!(
                    "__trtl = {name}\n\
                     try:\n  \
                       __trtl = int(__trtl)\n\
                     except ValueError:\n  \
                       raise Exception(f'forward needs a number, got {{__trtl}}')\n\
                     t.forward(__trtl)"
                ),
            },
            Statement::Sleep { value, .. } => match value {
                None => "time.sleep(1)".to_string(),
                Some(Arg::Number(n)) => format!("time.sleep({n})"),
                Some(Arg::Name(name)) => format!(
                    "try:\n  \
                       time.sleep(int({name}))\n\
                     except ValueError:\n  \
                       raise Exception(f'sleep needs a number, got {{{name}}}')"
                ),
            },
            // Clears extension state and resets the canvas, tolerating a
            // drawing surface that was never created.
            Statement::Clear { .. } => "extensions.clear()\n\
                 try:\n    \
                   # If turtle is being used, reset canvas\n    \
                   t.hideturtle()\n    \
                   turtle.resetscreen()\n    \
                   t.left(90)\n    \
                   t.showturtle()\n\
                 except NameError:\n    \
                   pass"
                .to_string(),
        }
    }

    fn gen_parts(&self, parts: &[Fragment]) -> String {
        let mut out = String::new();
        for part in parts {
            match part {
                Fragment::Literal { text, .. } => out.push_str(&normalize(text)),
                Fragment::Var(name) => {
                    out.push('{');
                    out.push_str(name);
                    out.push('}');
                }
                Fragment::RandomAccess { list } => {
                    out.push_str(&format!("{{random.choice({list})}}"));
                }
                Fragment::IndexAccess { list, index } => {
                    // 1-based in source, 0-based in Python; the
                    // conversion happens here and nowhere else.
                    out.push_str(&format!("{{{list}[{index}-1]}}"));
                }
                Fragment::TextRun { .. } => {
                    unreachable!("text runs are resolved by the analyzer")
                }
            }
        }
        out
    }

    fn gen_item(&self, item: &Fragment) -> String {
        match item {
            Fragment::Literal { text, quote } => string_literal(&Literal::Quoted {
                text: text.clone(),
                quote: *quote,
            }),
            Fragment::Var(name) => name.clone(),
            other => unreachable!("list items are literals or references, got {other:?}"),
        }
    }
}

impl Default for CodeGenerator {
    fn default() -> Self {
        CodeGenerator::new()
    }
}

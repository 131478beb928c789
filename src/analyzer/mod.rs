//! Walks the parse tree in source order, binding assignment targets and
//! classifying every bare word run as variable references, text missing
//! its quotes, or a near-miss of a known variable. Statements only ever
//! see bindings created on earlier lines.

use std::collections::HashMap;

use crate::errors::{closest_variable, CompileError};
use crate::parser::ast::{Arg, Fragment, Literal, Program, Statement};

/// The stored value and kind for one variable name. The kind never
/// changes after binding; a rebind replaces the whole binding.
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    Scalar(String),
    QuotedString { text: String, quote: char },
    List(Vec<Binding>),
}

impl Binding {
    fn from_literal(literal: &Literal) -> Binding {
        match literal {
            Literal::Quoted { text, quote } => Binding::QuotedString {
                text: text.clone(),
                quote: *quote,
            },
            Literal::Bare(text) => Binding::Scalar(text.clone()),
        }
    }
}

#[derive(Debug, Default)]
pub struct SymbolTable {
    bindings: HashMap<String, Binding>,
}

impl SymbolTable {
    pub fn bind(&mut self, name: &str, binding: Binding) {
        // Last write wins; rebinding is not an error.
        self.bindings.insert(name.to_string(), binding);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(|k| k.as_str())
    }
}

pub struct Analyzer {
    table: SymbolTable,
}

impl Analyzer {
    pub fn new() -> Self {
        Analyzer {
            table: SymbolTable::default(),
        }
    }

    /// Resolve every text run and check every reference, rewriting the
    /// program so that no `TextRun` survives. Consumed fresh per
    /// compilation; no state crosses invocations.
    pub fn analyze(mut self, program: Program) -> Result<(SymbolTable, Program), CompileError> {
        let mut statements = Vec::with_capacity(program.statements.len());

        for stmt in program.statements {
            let resolved = match stmt {
                Statement::Print { parts, line } => Statement::Print {
                    parts: self.resolve_parts(parts, line)?,
                    line,
                },
                Statement::Ask {
                    target,
                    parts,
                    line,
                } => {
                    let parts = self.resolve_parts(parts, line)?;
                    // ask binds its target to whatever the student types:
                    // a scalar as far as the compiler is concerned.
                    self.table.bind(&target, Binding::Scalar(String::new()));
                    Statement::Ask {
                        target,
                        parts,
                        line,
                    }
                }
                Statement::Assign {
                    target,
                    value,
                    line,
                } => {
                    self.table.bind(&target, Binding::from_literal(&value));
                    Statement::Assign {
                        target,
                        value,
                        line,
                    }
                }
                Statement::AssignList {
                    target,
                    elements,
                    line,
                } => {
                    let bound = elements.iter().map(Binding::from_literal).collect();
                    self.table.bind(&target, Binding::List(bound));
                    Statement::AssignList {
                        target,
                        elements,
                        line,
                    }
                }
                Statement::AddToList { item, list, line } => {
                    self.check_list_target(&list, line)?;
                    let item = self.resolve_item(item, line)?;
                    Statement::AddToList { item, list, line }
                }
                Statement::RemoveFromList { item, list, line } => {
                    self.check_list_target(&list, line)?;
                    let item = self.resolve_item(item, line)?;
                    Statement::RemoveFromList { item, list, line }
                }
                Statement::Forward { value, line } => {
                    self.check_value_arg(&value, line)?;
                    Statement::Forward { value, line }
                }
                Statement::Sleep { value, line } => {
                    self.check_value_arg(&value, line)?;
                    Statement::Sleep { value, line }
                }
                Statement::Clear { line } => Statement::Clear { line },
            };
            statements.push(resolved);
        }

        Ok((self.table, Program::new(statements)))
    }

    fn resolve_parts(
        &self,
        parts: Vec<Fragment>,
        line: usize,
    ) -> Result<Vec<Fragment>, CompileError> {
        let mut resolved = Vec::with_capacity(parts.len());
        for part in parts {
            match part {
                Fragment::TextRun { words } => {
                    resolved.extend(self.resolve_run(&words, line)?);
                }
                Fragment::RandomAccess { list } => {
                    self.check_list_target(&list, line)?;
                    resolved.push(Fragment::RandomAccess { list });
                }
                Fragment::IndexAccess { list, index } => {
                    self.check_list_target(&list, line)?;
                    if !index.chars().all(|c| c.is_ascii_digit()) {
                        self.check_reference(&index, line)?;
                    }
                    resolved.push(Fragment::IndexAccess { list, index });
                }
                other => resolved.push(other),
            }
        }
        Ok(resolved)
    }

    /// The decision procedure for a run of bare words, applied to the run
    /// as a whole:
    ///
    /// 1. no token resembles any bound variable -> the author most likely
    ///    forgot quotes,
    /// 2. every token is an exact binding -> a chain of references,
    /// 3. anything in between -> an undefined-variable diagnostic naming
    ///    the best-matching token (longest exact match, leftmost on ties;
    ///    failing that, the best fuzzy near-miss).
    fn resolve_run(&self, words: &[String], line: usize) -> Result<Vec<Fragment>, CompileError> {
        if words.iter().all(|w| self.table.contains(w)) {
            return Ok(words.iter().cloned().map(Fragment::Var).collect());
        }

        let mut best_exact: Option<&String> = None;
        for word in words {
            if self.table.contains(word) {
                match best_exact {
                    Some(b) if word.chars().count() <= b.chars().count() => {}
                    _ => best_exact = Some(word),
                }
            }
        }
        if let Some(word) = best_exact {
            return Err(CompileError::UndefinedVar {
                name: word.clone(),
                line,
            });
        }

        let mut best_fuzzy: Option<(&String, usize)> = None;
        for word in words {
            if let Some((_, distance)) = closest_variable(word, self.table.names()) {
                match best_fuzzy {
                    Some((_, d)) if distance >= d => {}
                    _ => best_fuzzy = Some((word, distance)),
                }
            }
        }
        match best_fuzzy {
            Some((word, _)) => Err(CompileError::UndefinedVar {
                name: word.clone(),
                line,
            }),
            None => Err(CompileError::UnquotedText { line }),
        }
    }

    fn resolve_item(&self, item: Fragment, line: usize) -> Result<Fragment, CompileError> {
        match item {
            Fragment::TextRun { words } => {
                let mut resolved = self.resolve_run(&words, line)?;
                debug_assert_eq!(resolved.len(), 1, "item runs are single words");
                Ok(resolved.remove(0))
            }
            other => Ok(other),
        }
    }

    /// The target of a list access or mutation must be bound. Its kind is
    /// not checked; using a scalar as a list is a runtime concern.
    fn check_list_target(&self, list: &str, line: usize) -> Result<(), CompileError> {
        self.check_reference(list, line)
    }

    fn check_value_arg(&self, value: &Option<Arg>, line: usize) -> Result<(), CompileError> {
        if let Some(Arg::Name(name)) = value {
            self.check_reference(name, line)?;
        }
        Ok(())
    }

    /// A position that can only hold a variable reference: unbound names
    /// here are always undefined, however plausible they look.
    fn check_reference(&self, name: &str, line: usize) -> Result<(), CompileError> {
        if self.table.contains(name) {
            Ok(())
        } else {
            Err(CompileError::UndefinedVar {
                name: name.to_string(),
                line,
            })
        }
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Analyzer::new()
    }
}

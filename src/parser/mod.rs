pub mod ast;
pub mod repair;

use crate::errors::CompileError;
use crate::grammar::GrammarRules;
use crate::keywords::{Command, KeywordSet};
use crate::lexer::{self, ScanFault, Token, TokenInfo};
use ast::*;

pub struct Parser<'a> {
    grammar: &'a GrammarRules,
    keywords: &'a KeywordSet,
}

impl<'a> Parser<'a> {
    pub fn new(grammar: &'a GrammarRules, keywords: &'a KeywordSet) -> Self {
        Parser { grammar, keywords }
    }

    /// Parse a whole program. Blank lines are no-ops but keep their line
    /// numbers, so downstream stages can reproduce the source's blank-line
    /// structure.
    pub fn parse(&self, source: &str) -> Result<Program, CompileError> {
        let mut statements = Vec::new();

        for (idx, raw_line) in source.lines().enumerate() {
            let line = idx + 1;
            let stripped = lexer::strip_comment(raw_line);
            if stripped.trim().is_empty() {
                continue;
            }

            // Authoring placeholders outrank every other fault on the line.
            if lexer::find_placeholder(stripped).is_some() {
                return Err(CompileError::CodePlaceholdersPresent { line });
            }

            if lexer::leading_indent(stripped) > 0 && self.shaped_like_command(stripped) {
                return Err(CompileError::InvalidSpace { line });
            }

            let tokens = lexer::scan_line(stripped).map_err(
                |ScanFault::UnterminatedQuote { .. }| CompileError::UnquotedText { line },
            )?;

            statements.push(self.parse_line(&tokens, stripped, line)?);
        }

        Ok(Program::new(statements))
    }

    /// Does the trimmed line start like a statement? Used only to decide
    /// whether leading whitespace gets the dedicated indentation
    /// diagnostic instead of whatever error the line would otherwise get.
    fn shaped_like_command(&self, stripped: &str) -> bool {
        let mut words = stripped.split_whitespace();
        let first = match words.next() {
            Some(w) => w,
            None => return false,
        };
        let first = first
            .split(|c| c == '\'' || c == '"' || c == ',')
            .next()
            .unwrap_or(first);
        self.keywords.command_of(first).is_some() || words.next() == Some(self.keywords.is.as_str())
    }

    fn parse_line(
        &self,
        tokens: &[TokenInfo],
        stripped: &str,
        line: usize,
    ) -> Result<Statement, CompileError> {
        let first = &tokens[0];
        let word = match &first.token {
            Token::Quoted { .. } => return Err(CompileError::LonelyText { line }),
            Token::Comma => {
                return Err(self.parse_error(line, first.column));
            }
            Token::Word(w) => w.as_str(),
        };

        let command = self
            .keywords
            .command_of(word)
            .filter(|c| self.grammar.allows(*c));
        if let Some(command) = command {
            return match command {
                Command::Print => {
                    let parts = self.fragments(&tokens[1..], line)?;
                    if parts.is_empty() {
                        return Err(self.parse_error(line, end_column(tokens)));
                    }
                    Ok(Statement::Print { parts, line })
                }
                Command::AddToList => self.parse_list_mutation(tokens, line, true),
                Command::RemoveFromList => self.parse_list_mutation(tokens, line, false),
                Command::Forward => {
                    let value = self.parse_value_arg(tokens, line)?;
                    Ok(Statement::Forward { value, line })
                }
                Command::Sleep => {
                    let value = self.parse_value_arg(tokens, line)?;
                    Ok(Statement::Sleep { value, line })
                }
                Command::Clear => {
                    if tokens.len() > 1 {
                        return Err(self.parse_error(line, tokens[1].column));
                    }
                    Ok(Statement::Clear { line })
                }
                _ => unreachable!("command_of only returns line-starter commands"),
            };
        }

        if self.grammar.allows(Command::Assign)
            && matches!(tokens.get(1), Some(t) if t.token == Token::Word(self.keywords.is.clone()))
        {
            return self.parse_assignment(tokens, stripped, line);
        }

        // No statement shape matched. A line that mentions reserved words
        // is a malformed statement; a line that mentions none is simply
        // not a command at this level.
        if self.mentions_keyword(tokens) {
            return Err(self.parse_error(line, first.column));
        }
        Err(CompileError::MissingCommand {
            line,
            level: self.grammar.level,
        })
    }

    /// `<target> is ask <parts>`, `<target> is <list literal>` or
    /// `<target> is <scalar>`. The value of a plain assignment is the raw
    /// text after the `is` keyword: leading whitespace trimmed, trailing
    /// kept, because comment stripping can leave a significant trailing
    /// space in the stored value.
    fn parse_assignment(
        &self,
        tokens: &[TokenInfo],
        stripped: &str,
        line: usize,
    ) -> Result<Statement, CompileError> {
        let target = match &tokens[0].token {
            Token::Word(w) => w.clone(),
            _ => unreachable!("assignment shape requires a leading word"),
        };
        if self.grammar.is_reserved(&target, self.keywords) {
            return Err(self.parse_error(line, tokens[0].column));
        }

        if tokens.len() < 3 {
            return Err(self.parse_error(line, end_column(tokens)));
        }

        if tokens[2].token == Token::Word(self.keywords.ask.clone()) {
            let parts = self.fragments(&tokens[3..], line)?;
            if parts.is_empty() {
                return Err(self.parse_error(line, end_column(tokens)));
            }
            return Ok(Statement::Ask {
                target,
                parts,
                line,
            });
        }

        let is_token = &tokens[1];
        let tail: String = stripped
            .chars()
            .skip(is_token.column - 1 + is_token.width())
            .collect();
        let value_raw = tail.trim_start();

        // Any comma makes it a list literal, even a comma inside quotes:
        // the elements are the plain comma-split spans, each trimmed and
        // quote-classified on its own.
        if value_raw.contains(',') {
            let elements = value_raw
                .split(',')
                .map(|e| Literal::classify(e.trim()))
                .collect();
            return Ok(Statement::AssignList {
                target,
                elements,
                line,
            });
        }

        Ok(Statement::Assign {
            target,
            value: Literal::classify(value_raw),
            line,
        })
    }

    /// `add <item> to <list>` / `remove <item> from <list>`.
    fn parse_list_mutation(
        &self,
        tokens: &[TokenInfo],
        line: usize,
        adding: bool,
    ) -> Result<Statement, CompileError> {
        if tokens.len() != 4 {
            let column = tokens
                .get(4)
                .map(|t| t.column)
                .unwrap_or_else(|| end_column(tokens));
            return Err(self.parse_error(line, column));
        }

        let item = match &tokens[1].token {
            Token::Quoted { text, quote } => Fragment::Literal {
                text: text.clone(),
                quote: *quote,
            },
            Token::Word(w) => {
                if self.grammar.is_reserved(w, self.keywords) {
                    return Err(self.parse_error(line, tokens[1].column));
                }
                Fragment::TextRun {
                    words: vec![w.clone()],
                }
            }
            Token::Comma => return Err(self.parse_error(line, tokens[1].column)),
        };

        let connector = if adding {
            &self.keywords.to
        } else {
            &self.keywords.from
        };
        if tokens[2].token != Token::Word(connector.clone()) {
            return Err(self.parse_error(line, tokens[2].column));
        }

        let list = match &tokens[3].token {
            Token::Word(w) if !self.grammar.is_reserved(w, self.keywords) => w.clone(),
            _ => return Err(self.parse_error(line, tokens[3].column)),
        };

        Ok(if adding {
            Statement::AddToList { item, list, line }
        } else {
            Statement::RemoveFromList { item, list, line }
        })
    }

    /// The optional single argument of forward/sleep: a number literal or
    /// a variable name.
    fn parse_value_arg(
        &self,
        tokens: &[TokenInfo],
        line: usize,
    ) -> Result<Option<Arg>, CompileError> {
        match tokens.len() {
            1 => Ok(None),
            2 => match &tokens[1].token {
                Token::Word(w) => {
                    if w.chars().all(|c| c.is_ascii_digit()) {
                        Ok(Some(Arg::Number(w.clone())))
                    } else if self.grammar.is_reserved(w, self.keywords) {
                        Err(self.parse_error(line, tokens[1].column))
                    } else {
                        Ok(Some(Arg::Name(w.clone())))
                    }
                }
                _ => Err(self.parse_error(line, tokens[1].column)),
            },
            _ => Err(self.parse_error(line, tokens[2].column)),
        }
    }

    /// Group argument tokens into ordered fragments: quoted literals, list
    /// accesses, and runs of adjacent bare words for the analyzer.
    fn fragments(
        &self,
        tokens: &[TokenInfo],
        line: usize,
    ) -> Result<Vec<Fragment>, CompileError> {
        let mut parts = Vec::new();
        let mut run: Vec<String> = Vec::new();
        let mut i = 0;

        while i < tokens.len() {
            match &tokens[i].token {
                Token::Quoted { text, quote } => {
                    flush_run(&mut parts, &mut run);
                    parts.push(Fragment::Literal {
                        text: text.clone(),
                        quote: *quote,
                    });
                    i += 1;
                }
                Token::Comma => {
                    return Err(self.parse_error(line, tokens[i].column));
                }
                Token::Word(w) => {
                    if w == &self.keywords.at {
                        // `at` only occurs inside a list access, which is
                        // recognized from its list name below.
                        return Err(self.parse_error(line, tokens[i].column));
                    }
                    let at_next = matches!(
                        tokens.get(i + 1),
                        Some(t) if t.token == Token::Word(self.keywords.at.clone())
                    );
                    if at_next {
                        let index = match tokens.get(i + 2) {
                            Some(TokenInfo {
                                token: Token::Word(x),
                                ..
                            }) => x.clone(),
                            _ => {
                                return Err(self.parse_error(line, end_column(tokens)));
                            }
                        };
                        flush_run(&mut parts, &mut run);
                        if index == self.keywords.random {
                            parts.push(Fragment::RandomAccess { list: w.clone() });
                        } else {
                            parts.push(Fragment::IndexAccess {
                                list: w.clone(),
                                index,
                            });
                        }
                        i += 3;
                    } else {
                        run.push(w.clone());
                        i += 1;
                    }
                }
            }
        }

        flush_run(&mut parts, &mut run);
        Ok(parts)
    }

    fn mentions_keyword(&self, tokens: &[TokenInfo]) -> bool {
        tokens.iter().any(|t| match &t.token {
            Token::Word(w) => self.grammar.is_reserved(w, self.keywords),
            _ => false,
        })
    }

    fn parse_error(&self, line: usize, column: usize) -> CompileError {
        CompileError::Parse {
            line,
            column,
            fixed_code: None,
        }
    }
}

fn flush_run(parts: &mut Vec<Fragment>, run: &mut Vec<String>) {
    if !run.is_empty() {
        parts.push(Fragment::TextRun {
            words: std::mem::take(run),
        });
    }
}

fn end_column(tokens: &[TokenInfo]) -> usize {
    tokens
        .last()
        .map(|t| t.column + t.width())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    fn parse(source: &str) -> Result<Program, CompileError> {
        let keywords = KeywordSet::english();
        let grammar = GrammarRules::for_level(4);
        Parser::new(&grammar, &keywords).parse(source)
    }

    #[test]
    fn test_print_fragments_keep_order() {
        let program = parse("print 'we bakken een ' taart at random").unwrap();
        match &program.statements[0] {
            Statement::Print { parts, .. } => {
                assert_eq!(parts.len(), 2);
                assert!(matches!(&parts[0], Fragment::Literal { text, .. } if text == "we bakken een "));
                assert!(matches!(&parts[1], Fragment::RandomAccess { list } if list == "taart"));
            }
            other => panic!("expected print, got {:?}", other),
        }
    }

    #[test]
    fn test_assign_keeps_trailing_space_before_comment() {
        let program = parse("test is \"Welkom bij Hedy\" # This is a comment").unwrap();
        match &program.statements[0] {
            Statement::Assign { value, .. } => {
                assert_eq!(value, &Literal::Bare("\"Welkom bij Hedy\" ".to_string()));
            }
            other => panic!("expected assign, got {:?}", other),
        }
    }

    #[test]
    fn test_comma_in_quoted_assign_still_makes_a_list() {
        let program = parse("taart is 'appeltaart, choladetaart, kwarktaart'").unwrap();
        match &program.statements[0] {
            Statement::AssignList { elements, .. } => {
                assert_eq!(elements[0], Literal::Bare("'appeltaart".to_string()));
                assert_eq!(elements[1], Literal::Bare("choladetaart".to_string()));
                assert_eq!(elements[2], Literal::Bare("kwarktaart'".to_string()));
            }
            other => panic!("expected list assign, got {:?}", other),
        }
    }

    #[test]
    fn test_lonely_text() {
        assert_eq!(
            parse("'Hello'").unwrap_err().kind(),
            ErrorKind::LonelyText
        );
    }

    #[test]
    fn test_missing_command_vs_parse_error() {
        // No keyword anywhere: not a command at this level.
        assert_eq!(
            parse("competitie die gaan we winnen").unwrap_err().kind(),
            ErrorKind::MissingCommand
        );
        // A keyword in a shape that matches nothing is a parse failure,
        // reported at the start of the line.
        let err = parse("is Foobar\nprint welcome").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert_eq!(err.line_number(), 1);
        assert_eq!(err.column(), Some(1));
    }

    #[test]
    fn test_keywords_cannot_be_shadowed() {
        assert_eq!(
            parse("random is 'x'").unwrap_err().kind(),
            ErrorKind::Parse
        );
        assert_eq!(
            parse("add 'x' to print").unwrap_err().kind(),
            ErrorKind::Parse
        );
    }

    #[test]
    fn test_invalid_space() {
        let err = parse(" print 'Hallo welkom bij Hedy!'").unwrap_err();
        assert_eq!(err, CompileError::InvalidSpace { line: 1 });
    }

    #[test]
    fn test_placeholder_wins_over_unquoted_text() {
        let err = parse("print _Escape from the haunted house!_").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CodePlaceholdersPresent);
    }

    #[test]
    fn test_blank_lines_keep_numbering() {
        let program = parse("print 'a'\n\nprint 'b'").unwrap();
        assert_eq!(program.statements[0].line(), 1);
        assert_eq!(program.statements[1].line(), 3);
    }
}

//! Bounded local repair after a parse failure. The advisor tries a small
//! fixed set of single-character deletions on the failing line and
//! re-parses each candidate once. A suggestion is produced only when
//! exactly one distinct candidate parses; the compilation itself still
//! fails, the repair is advisory.

use super::Parser;
use crate::grammar::GrammarRules;
use crate::keywords::KeywordSet;

const SEPARATORS: [char; 4] = [',', '.', ':', ';'];

pub fn repair(
    source: &str,
    grammar: &GrammarRules,
    keywords: &KeywordSet,
    line: usize,
    column: usize,
) -> Option<String> {
    let lines: Vec<&str> = source.lines().collect();
    let bad = *lines.get(line.checked_sub(1)?)?;

    let mut candidates: Vec<String> = Vec::new();
    let mut push = |edit: Option<String>| {
        if let Some(edit) = edit {
            if !candidates.contains(&edit) {
                candidates.push(edit);
            }
        }
    };
    push(delete_separator_at(bad, column));
    push(delete_separator_after_command(bad, keywords));

    let parser = Parser::new(grammar, keywords);
    let mut repaired: Vec<String> = Vec::new();
    for candidate in candidates {
        let mut full: Vec<&str> = lines.clone();
        full[line - 1] = &candidate;
        let suggestion = full.join("\n");
        if parser.parse(&suggestion).is_ok() && !repaired.contains(&suggestion) {
            repaired.push(suggestion);
        }
    }

    if repaired.len() == 1 {
        repaired.pop()
    } else {
        None
    }
}

/// Delete the character at the failure column, if it is a stray separator.
fn delete_separator_at(line: &str, column: usize) -> Option<String> {
    let chars: Vec<char> = line.chars().collect();
    let idx = column.checked_sub(1)?;
    if SEPARATORS.contains(chars.get(idx)?) {
        Some(without_char(&chars, idx))
    } else {
        None
    }
}

/// Delete the first separator sitting right after the leading command
/// keyword, spaces permitting.
fn delete_separator_after_command(line: &str, keywords: &KeywordSet) -> Option<String> {
    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;
    while i < chars.len() && chars[i].is_whitespace() {
        i += 1;
    }
    let start = i;
    while i < chars.len()
        && !chars[i].is_whitespace()
        && !matches!(chars[i], ',' | '\'' | '"')
    {
        i += 1;
    }
    let word: String = chars[start..i].iter().collect();
    keywords.command_of(&word)?;

    while i < chars.len() && chars[i].is_whitespace() {
        i += 1;
    }
    if i < chars.len() && SEPARATORS.contains(&chars[i]) {
        Some(without_char(&chars, i))
    } else {
        None
    }
}

fn without_char(chars: &[char], idx: usize) -> String {
    chars
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != idx)
        .map(|(_, c)| c)
        .collect()
}

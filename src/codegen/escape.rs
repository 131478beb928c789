//! Canonicalizes literal text for embedding in generated Python source.
//! Generated string literals are always single-quoted, so a single quote
//! or a backslash in the payload must be escaped. Normalization happens
//! exactly once, at the boundary between the analyzed program and the
//! generator, and is idempotent: a `\` already followed by `\` or `'` is
//! an escape pair and is copied through unchanged. Idempotence wins over
//! doubling every backslash: a source literal that spells out `a\'b`
//! keeps its single backslash, it is not re-escaped to `a\\\'b`.

use crate::parser::ast::Literal;

pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\\' => match chars.peek() {
                Some('\\') | Some('\'') => {
                    out.push('\\');
                    out.push(chars.next().unwrap());
                }
                // Includes a backslash right before the closing quote:
                // doubled, so it cannot escape the generated delimiter.
                _ => out.push_str("\\\\"),
            },
            '\'' => out.push_str("\\'"),
            _ => out.push(ch),
        }
    }

    out
}

/// Render a stored value as a single-quoted Python string literal. Quoted
/// source values keep their quote characters as payload content; bare
/// values are wrapped verbatim.
pub fn string_literal(literal: &Literal) -> String {
    let payload = match literal {
        Literal::Quoted { text, quote } => format!("{quote}{text}{quote}"),
        Literal::Bare(text) => text.clone(),
    };
    format!("'{}'", normalize(&payload))
}

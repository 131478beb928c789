//! Line-oriented scanner. Statements never span lines, so each line is
//! tokenized independently; the parser supplies line numbers.

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A bare word: any run of characters that is not whitespace, a quote
    /// character, or a comma. Words may be keywords, variable names,
    /// numbers, or plain text; the parser and analyzer decide which.
    Word(String),
    /// A quote-delimited literal with the delimiters stripped. The literal
    /// closes at the next occurrence of the *same* quote character; the
    /// opposite quote character inside is content.
    Quoted { text: String, quote: char },
    Comma,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TokenInfo {
    pub token: Token,
    /// 1-based column (in characters) where the token starts.
    pub column: usize,
}

impl TokenInfo {
    /// Length of the token in characters, delimiters included.
    pub fn width(&self) -> usize {
        match &self.token {
            Token::Word(w) => w.chars().count(),
            Token::Quoted { text, .. } => text.chars().count() + 2,
            Token::Comma => 1,
        }
    }
}

/// The one fault the scanner detects on its own, before any grammar is
/// consulted. Placeholder detection runs on the raw line, ahead of
/// tokenization, and is not a scanner concern.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanFault {
    /// A quote opened at `column` and never closed on the line.
    UnterminatedQuote { column: usize },
}

/// Strip a comment: an unescaped `#` outside any open quote starts a
/// comment running to end of line. Content before the `#` is returned
/// verbatim, trailing whitespace included.
pub fn strip_comment(line: &str) -> &str {
    let mut open_quote: Option<char> = None;
    let mut prev: Option<char> = None;
    for (i, ch) in line.char_indices() {
        match open_quote {
            Some(q) => {
                if ch == q {
                    open_quote = None;
                }
            }
            None => {
                if ch == '\'' || ch == '"' {
                    open_quote = Some(ch);
                } else if ch == '#' && prev != Some('\\') {
                    return &line[..i];
                }
            }
        }
        prev = Some(ch);
    }
    line
}

/// Detect an authoring placeholder outside quotes: a whitespace-separated
/// token starting with `_` followed (on the same line, possibly in the
/// same token) by a token ending with `_`. Underscores inside names like
/// `voor_naam` do not trigger this.
pub fn find_placeholder(line: &str) -> Option<usize> {
    let mut open_quote: Option<char> = None;
    let mut opened: Option<usize> = None;
    let mut word_start = true;
    let mut prev: Option<char> = None;
    let mut prev_col = 0usize;

    for (col, ch) in line.chars().enumerate().map(|(i, c)| (i + 1, c)) {
        match open_quote {
            Some(q) => {
                if ch == q {
                    open_quote = None;
                }
            }
            None => {
                if ch == '\'' || ch == '"' {
                    open_quote = Some(ch);
                } else if ch.is_whitespace() {
                    // A word just ended; did it end with `_`?
                    if opened.is_some() && prev == Some('_') && Some(prev_col) != opened {
                        return opened;
                    }
                    word_start = true;
                } else {
                    if ch == '_' && word_start && opened.is_none() {
                        opened = Some(col);
                    }
                    word_start = false;
                }
            }
        }
        prev = Some(ch);
        prev_col = col;
    }
    if opened.is_some() && prev == Some('_') && Some(prev_col) != opened {
        return opened;
    }
    None
}

/// Number of leading whitespace characters on the line.
pub fn leading_indent(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

/// Tokenize one comment-stripped line.
pub fn scan_line(line: &str) -> Result<Vec<TokenInfo>, ScanFault> {
    let chars: Vec<char> = line.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0usize;

    while i < chars.len() {
        let ch = chars[i];
        if ch.is_whitespace() {
            i += 1;
        } else if ch == ',' {
            tokens.push(TokenInfo {
                token: Token::Comma,
                column: i + 1,
            });
            i += 1;
        } else if ch == '\'' || ch == '"' {
            let open_column = i + 1;
            // Scan for the same quote character; the opposite one is
            // literal content, however many of them appear.
            let mut j = i + 1;
            while j < chars.len() && chars[j] != ch {
                j += 1;
            }
            if j >= chars.len() {
                return Err(ScanFault::UnterminatedQuote {
                    column: open_column,
                });
            }
            tokens.push(TokenInfo {
                token: Token::Quoted {
                    text: chars[i + 1..j].iter().collect(),
                    quote: ch,
                },
                column: open_column,
            });
            i = j + 1;
        } else {
            let start = i;
            while i < chars.len()
                && !chars[i].is_whitespace()
                && chars[i] != ','
                && chars[i] != '\''
                && chars[i] != '"'
            {
                i += 1;
            }
            tokens.push(TokenInfo {
                token: Token::Word(chars[start..i].iter().collect()),
                column: start + 1,
            });
        }
    }

    Ok(tokens)
}

use thiserror::Error;

/// The error taxonomy surfaced to callers. Each variant carries the
/// structured detail for that kind; pedagogical wording lives in the
/// `Display` messages so front ends can show them to students as-is.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    #[error("line {line}: don't start a line with a space, the computer gets confused")]
    InvalidSpace { line: usize },

    #[error("line {line}: text needs quotation marks around it")]
    UnquotedText { line: usize },

    #[error("line {line}: the _ blanks from the example code are still there, fill them in first")]
    CodePlaceholdersPresent { line: usize },

    #[error("line {line}: quoted text needs a command in front of it, like print")]
    LonelyText { line: usize },

    #[error("line {line}: that is not a command I know at level {level}")]
    MissingCommand { line: usize, level: u8 },

    #[error("line {line}: the variable `{name}` is used before it is set")]
    UndefinedVar { name: String, line: usize },

    #[error("line {line}, column {column}: I could not read this line")]
    Parse {
        line: usize,
        column: usize,
        fixed_code: Option<String>,
    },
}

/// Kind tags for the taxonomy, for callers that dispatch without
/// destructuring the variant payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidSpace,
    UnquotedText,
    CodePlaceholdersPresent,
    LonelyText,
    MissingCommand,
    UndefinedVar,
    Parse,
}

impl CompileError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CompileError::InvalidSpace { .. } => ErrorKind::InvalidSpace,
            CompileError::UnquotedText { .. } => ErrorKind::UnquotedText,
            CompileError::CodePlaceholdersPresent { .. } => ErrorKind::CodePlaceholdersPresent,
            CompileError::LonelyText { .. } => ErrorKind::LonelyText,
            CompileError::MissingCommand { .. } => ErrorKind::MissingCommand,
            CompileError::UndefinedVar { .. } => ErrorKind::UndefinedVar,
            CompileError::Parse { .. } => ErrorKind::Parse,
        }
    }

    /// 1-based source line the diagnostic points at.
    pub fn line_number(&self) -> usize {
        match self {
            CompileError::InvalidSpace { line }
            | CompileError::UnquotedText { line }
            | CompileError::CodePlaceholdersPresent { line }
            | CompileError::LonelyText { line }
            | CompileError::MissingCommand { line, .. }
            | CompileError::UndefinedVar { line, .. }
            | CompileError::Parse { line, .. } => *line,
        }
    }

    /// 1-based column, where the kind records one.
    pub fn column(&self) -> Option<usize> {
        match self {
            CompileError::Parse { column, .. } => Some(*column),
            _ => None,
        }
    }

    /// The repair advisor's suggested source, for parse failures where a
    /// single unambiguous repair was found.
    pub fn fixed_code(&self) -> Option<&str> {
        match self {
            CompileError::Parse { fixed_code, .. } => fixed_code.as_deref(),
            _ => None,
        }
    }
}

pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.to_lowercase().chars().collect();
    let b_chars: Vec<char> = b.to_lowercase().chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0usize; b_chars.len() + 1];

    for (i, &ac) in a_chars.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_chars.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}

/// Find the bound variable a word most plausibly is a typo of.
///
/// Returns the best candidate and its distance. Exact matches are the
/// caller's business and return None here. Words of 1-2 characters are
/// never matched; short names like x and n are usually intentional.
pub fn closest_variable<'a, I>(word: &str, names: I) -> Option<(&'a str, usize)>
where
    I: IntoIterator<Item = &'a str>,
{
    let word_len = word.chars().count();
    if word_len <= 2 {
        return None;
    }
    let max_distance = if word_len >= 4 { 2 } else { 1 };

    let mut best: Option<(&'a str, usize)> = None;
    for name in names {
        let name_len = name.chars().count();
        // Skip wildly different lengths to avoid nonsense suggestions.
        if word_len.abs_diff(name_len) > 2 {
            continue;
        }
        let distance = levenshtein_distance(word, name);
        if distance == 0 {
            return None;
        }
        if distance <= max_distance {
            match best {
                Some((_, d)) if distance >= d => {}
                _ => best = Some((name, distance)),
            }
        }
    }
    best
}

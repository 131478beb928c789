use crate::keywords::Command;

/// One literal value as written in source. Whether the student quoted it
/// controls output escaping later, so the classification is kept.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Fully quoted value; `text` excludes the delimiters.
    Quoted { text: String, quote: char },
    /// Bare text, stored verbatim without reinterpreting escapes. This
    /// includes half-quoted scraps like `'appeltaart` produced by
    /// comma-splitting a quoted list source.
    Bare(String),
}

impl Literal {
    /// Classify a raw span: a value that starts and ends with the same
    /// quote character is quoted, anything else is bare.
    pub fn classify(raw: &str) -> Literal {
        let chars: Vec<char> = raw.chars().collect();
        if chars.len() >= 2 {
            let first = chars[0];
            if (first == '\'' || first == '"') && chars[chars.len() - 1] == first {
                return Literal::Quoted {
                    text: chars[1..chars.len() - 1].iter().collect(),
                    quote: first,
                };
            }
        }
        Literal::Bare(raw.to_string())
    }
}

/// One ordered segment of a print/ask argument list. Order is significant
/// and preserved verbatim in output.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    /// Quote-delimited literal text, delimiters stripped.
    Literal { text: String, quote: char },
    /// A run of adjacent bare words. The analyzer classifies each run as
    /// variable references, missing quotes, or a near-miss of a known
    /// variable; no run survives analysis.
    TextRun { words: Vec<String> },
    /// A resolved variable reference (produced by the analyzer).
    Var(String),
    /// `<list> at random`
    RandomAccess { list: String },
    /// `<list> at <index>`, 1-based in source. `index` is a number literal
    /// or a variable name; the analyzer checks which.
    IndexAccess { list: String, index: String },
}

/// A forward/sleep argument: a number literal or a variable name.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Number(String),
    Name(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Print {
        parts: Vec<Fragment>,
        line: usize,
    },
    Ask {
        target: String,
        parts: Vec<Fragment>,
        line: usize,
    },
    Assign {
        target: String,
        value: Literal,
        line: usize,
    },
    AssignList {
        target: String,
        elements: Vec<Literal>,
        line: usize,
    },
    AddToList {
        item: Fragment,
        list: String,
        line: usize,
    },
    RemoveFromList {
        item: Fragment,
        list: String,
        line: usize,
    },
    Forward {
        value: Option<Arg>,
        line: usize,
    },
    Sleep {
        value: Option<Arg>,
        line: usize,
    },
    Clear {
        line: usize,
    },
}

impl Statement {
    pub fn line(&self) -> usize {
        match self {
            Statement::Print { line, .. }
            | Statement::Ask { line, .. }
            | Statement::Assign { line, .. }
            | Statement::AssignList { line, .. }
            | Statement::AddToList { line, .. }
            | Statement::RemoveFromList { line, .. }
            | Statement::Forward { line, .. }
            | Statement::Sleep { line, .. }
            | Statement::Clear { line } => *line,
        }
    }

    pub fn command(&self) -> Command {
        match self {
            Statement::Print { .. } => Command::Print,
            Statement::Ask { .. } => Command::Ask,
            Statement::Assign { .. } => Command::Assign,
            Statement::AssignList { .. } => Command::AssignList,
            Statement::AddToList { .. } => Command::AddToList,
            Statement::RemoveFromList { .. } => Command::RemoveFromList,
            Statement::Forward { .. } => Command::Forward,
            Statement::Sleep { .. } => Command::Sleep,
            Statement::Clear { .. } => Command::Clear,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Program {
    pub fn new(statements: Vec<Statement>) -> Self {
        Program { statements }
    }
}

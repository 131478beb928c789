/// Canonical commands of the language, used both for statement dispatch
/// and for the commands-used report handed to downstream tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Print,
    Ask,
    Assign,
    AssignList,
    AddToList,
    RemoveFromList,
    Forward,
    Sleep,
    Clear,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Print => "print",
            Command::Ask => "ask",
            Command::Assign => "is",
            Command::AssignList => "is list",
            Command::AddToList => "add",
            Command::RemoveFromList => "remove",
            Command::Forward => "forward",
            Command::Sleep => "sleep",
            Command::Clear => "clear",
        }
    }
}

/// An already-resolved, immutable keyword table.
///
/// Translation files and per-classroom keyword languages are an external
/// collaborator's concern; the core only ever sees the resolved surface
/// words. All lookups are exact and case-sensitive.
#[derive(Debug, Clone)]
pub struct KeywordSet {
    pub print: String,
    pub ask: String,
    pub is: String,
    pub at: String,
    pub random: String,
    pub add: String,
    pub to: String,
    pub remove: String,
    pub from: String,
    pub forward: String,
    pub sleep: String,
    pub clear: String,
}

impl KeywordSet {
    pub fn english() -> Self {
        KeywordSet {
            print: "print".to_string(),
            ask: "ask".to_string(),
            is: "is".to_string(),
            at: "at".to_string(),
            random: "random".to_string(),
            add: "add".to_string(),
            to: "to".to_string(),
            remove: "remove".to_string(),
            from: "from".to_string(),
            forward: "forward".to_string(),
            sleep: "sleep".to_string(),
            clear: "clear".to_string(),
        }
    }

    /// The command a line may start with when `word` is its first token.
    /// Assignment and ask are recognized by shape, not by first word, so
    /// they are absent here.
    pub fn command_of(&self, word: &str) -> Option<Command> {
        if word == self.print {
            Some(Command::Print)
        } else if word == self.add {
            Some(Command::AddToList)
        } else if word == self.remove {
            Some(Command::RemoveFromList)
        } else if word == self.forward {
            Some(Command::Forward)
        } else if word == self.sleep {
            Some(Command::Sleep)
        } else if word == self.clear {
            Some(Command::Clear)
        } else {
            None
        }
    }

    /// Whether a word is reserved by the keyword table. Reserved words can
    /// never be variable names at parse time.
    pub fn is_keyword(&self, word: &str) -> bool {
        word == self.print
            || word == self.ask
            || word == self.is
            || word == self.at
            || word == self.random
            || word == self.add
            || word == self.to
            || word == self.remove
            || word == self.from
            || word == self.forward
            || word == self.sleep
            || word == self.clear
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_dispatch() {
        let kw = KeywordSet::english();
        assert_eq!(kw.command_of("print"), Some(Command::Print));
        assert_eq!(kw.command_of("ask"), None);
        assert_eq!(kw.command_of("naam"), None);
        assert!(kw.is_keyword("at"));
        assert!(!kw.is_keyword("At"));
    }
}

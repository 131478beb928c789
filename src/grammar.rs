use crate::keywords::{Command, KeywordSet};

pub const MIN_LEVEL: u8 = 4;
pub const MAX_LEVEL: u8 = 7;

/// The rule set for one level, assembled from the base table plus the
/// ordered per-level overlays. Each level's behavior is auditable from
/// this one value; there is no runtime inheritance between levels.
#[derive(Debug, Clone)]
pub struct GrammarRules {
    pub level: u8,
    pub statements: Vec<Command>,
    /// Words reserved by this level beyond the command table itself.
    /// They are not compiled here, but they cannot be shadowed by
    /// variable names either.
    pub reserved: Vec<String>,
}

/// Statement forms available at the base level, in match precedence order.
fn base_statements() -> Vec<Command> {
    vec![
        Command::Print,
        Command::Ask,
        Command::Assign,
        Command::AssignList,
        Command::AddToList,
        Command::RemoveFromList,
        Command::Forward,
        Command::Sleep,
        Command::Clear,
    ]
}

struct Overlay {
    level: u8,
    reserved: &'static [&'static str],
}

/// Per-level additions, applied in order on top of the base table. The
/// studied statement set is syntactically unchanged across the supported
/// range; higher levels only claim more reserved words.
const OVERLAYS: &[Overlay] = &[
    Overlay {
        level: 5,
        reserved: &["if", "else", "in", "pressed"],
    },
    Overlay {
        level: 6,
        reserved: &["+", "-", "*", "/", "="],
    },
    Overlay {
        level: 7,
        reserved: &["repeat", "times"],
    },
];

impl GrammarRules {
    /// Build the rule set for a level. Levels outside the supported range
    /// are a caller contract violation, not a diagnostic.
    pub fn for_level(level: u8) -> Self {
        assert!(
            (MIN_LEVEL..=MAX_LEVEL).contains(&level),
            "level {} is outside the supported range {}..={}",
            level,
            MIN_LEVEL,
            MAX_LEVEL
        );

        let mut rules = GrammarRules {
            level,
            statements: base_statements(),
            reserved: Vec::new(),
        };
        for overlay in OVERLAYS.iter().filter(|o| o.level <= level) {
            rules
                .reserved
                .extend(overlay.reserved.iter().map(|s| s.to_string()));
        }
        rules
    }

    /// Whether this level's statement table includes the command. The
    /// parser dispatches through this, so a level without a statement
    /// simply does not parse it.
    pub fn allows(&self, command: Command) -> bool {
        self.statements.contains(&command)
    }

    /// A word the student cannot use as a variable name at this level.
    pub fn is_reserved(&self, word: &str, keywords: &KeywordSet) -> bool {
        keywords.is_keyword(word) || self.reserved.iter().any(|r| r == word)
    }
}

//! Vote command parsing.
//!
//! Input lines look like `{voter} pick {alternative}` or
//! `{voter} delegate {voter}`. Parsing is case sensitive and never fails:
//! lines that yield no voter or no action are reported as invalid commands
//! and skipped by the caller.

use std::fmt;
use std::str::FromStr;

/// What a voter does with their ballot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Pick,
    Delegate,
}

impl FromStr for Action {
    type Err = ();

    /// The third-person `s` is accepted ("picks", "delegates").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pick" | "picks" => Ok(Action::Pick),
            "delegate" | "delegates" => Ok(Action::Delegate),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Pick => write!(f, "pick"),
            Action::Delegate => write!(f, "delegate"),
        }
    }
}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub voter: Option<String>,
    pub action: Option<Action>,
    /// The picked alternative or the delegate. May be absent on a valid
    /// command; the vote is then simply invalid.
    pub choice: Option<String>,
}

impl Command {
    /// A command is usable when both a voter and an action are present.
    pub fn is_valid(&self) -> bool {
        self.voter.is_some() && self.action.is_some()
    }
}

/// Parse one input line into a command.
///
/// The action is the first `pick`/`delegate` verb that appears as a
/// whitespace-delimited token after the start of the line; a verb in first
/// position is a voter name, not an action. The voter is everything before
/// the action and the choice everything after it, both trimmed. Without an
/// action verb, the first token of the line is taken as the voter.
pub fn parse_line(line: &str) -> Command {
    let mut offset = 0;
    for token in line.split_whitespace() {
        // Tokens come in order, so searching from the end of the previous
        // one finds this token's own position.
        let idx = match line[offset..].find(token) {
            Some(rel) => offset + rel,
            None => break,
        };
        offset = idx + token.len();

        if idx == 0 {
            continue; // a leading verb is a voter name
        }
        if let Ok(action) = token.parse::<Action>() {
            return Command {
                voter: non_empty(&line[..idx]),
                action: Some(action),
                choice: non_empty(&line[offset..]),
            };
        }
    }

    Command {
        voter: line.split_whitespace().next().map(str::to_string),
        action: None,
        choice: None,
    }
}

fn non_empty(part: &str) -> Option<String> {
    let part = part.trim();
    (!part.is_empty()).then(|| part.to_string())
}

//! Liquid democracy election state.
//!
//! Voters either pick an alternative directly or delegate their vote to
//! another voter. Delegation is transitive. Unlike a strict delegation
//! graph that rejects cycles up front, an election accepts every vote as
//! cast and resolves cycle participants (including self-delegators) to an
//! invalid outcome at tally time, so the invalid count can be reported.

use std::collections::{HashMap, HashSet};

use tracing::{debug, trace};

use crate::error::ElectionError;
use crate::tally::Tally;

/// A voter's latest recorded act. Only the last one counts.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Choice {
    /// Direct pick of an alternative.
    Alternative(String),
    /// Delegation to another voter.
    Delegate(String),
}

/// Resolved outcome for a single voter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The alternative this voter's ballot (possibly indirectly) supports.
    Alternative(String),
    /// No usable choice: never voted properly, or delegated into a cycle.
    Invalid,
}

impl Outcome {
    /// The supported alternative name, if the outcome is valid.
    pub fn alternative(&self) -> Option<&str> {
        match self {
            Outcome::Alternative(name) => Some(name),
            Outcome::Invalid => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Outcome::Alternative(_))
    }
}

/// Per-voter record.
#[derive(Debug, Clone, Default)]
struct Voter {
    /// `None` means registered but without a usable vote.
    choice: Option<Choice>,
}

/// Election state managing voters, alternatives and delegations.
///
/// Voter names and alternative names are separate namespaces: a voter
/// `Dave` and an alternative `Dave` may coexist. All names are
/// case-sensitive.
#[derive(Debug, Default)]
pub struct Election {
    /// Every name that ever cast a vote or received a delegation.
    voters: HashMap<String, Voter>,
    /// Every alternative ever picked. Never shrinks.
    alternatives: HashSet<String>,
    /// delegate -> direct delegators (reverse lookup)
    delegators: HashMap<String, Vec<String>>,
    /// Memoized resolution, cleared by any mutating operation.
    resolved: Option<HashMap<String, Outcome>>,
}

impl Election {
    /// Create an empty election.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a direct pick.
    ///
    /// The voter is registered either way. A missing alternative is not an
    /// error: the vote is simply invalid, like an empty ballot.
    ///
    /// # Errors
    /// Returns an error if the voter name is empty or whitespace-only.
    pub fn pick(&mut self, voter: &str, alternative: Option<&str>) -> Result<(), ElectionError> {
        let voter = validate_name(voter)?;
        self.register_voter(voter);

        let Some(alternative) = normalize(alternative) else {
            trace!(voter, "pick without alternative, vote stays invalid");
            return Ok(());
        };

        self.alternatives.insert(alternative.to_string());
        self.set_choice(voter, Choice::Alternative(alternative.to_string()));
        Ok(())
    }

    /// Record a delegation.
    ///
    /// Both voters are registered. Self-delegation and cycle-forming
    /// delegations are accepted; they resolve to [`Outcome::Invalid`].
    ///
    /// # Errors
    /// Returns an error if the delegating voter's name is empty or
    /// whitespace-only.
    pub fn delegate(&mut self, voter: &str, delegate: Option<&str>) -> Result<(), ElectionError> {
        let voter = validate_name(voter)?;
        self.register_voter(voter);

        let Some(delegate) = normalize(delegate) else {
            trace!(voter, "delegation without delegate, vote stays invalid");
            return Ok(());
        };

        self.register_voter(delegate);
        self.set_choice(voter, Choice::Delegate(delegate.to_string()));
        Ok(())
    }

    /// Number of registered voters.
    pub fn voter_count(&self) -> usize {
        self.voters.len()
    }

    /// Names of all registered voters.
    pub fn voter_names(&self) -> Vec<String> {
        self.voters.keys().cloned().collect()
    }

    /// Number of registered alternatives.
    pub fn alternative_count(&self) -> usize {
        self.alternatives.len()
    }

    /// Names of all registered alternatives.
    pub fn alternative_names(&self) -> Vec<String> {
        self.alternatives.iter().cloned().collect()
    }

    /// Voters currently delegating directly to `delegate`.
    pub fn direct_delegators(&self, delegate: &str) -> Vec<String> {
        self.delegators.get(delegate).cloned().unwrap_or_default()
    }

    /// All voters whose ballot currently flows through `delegate`,
    /// including indirect ones.
    pub fn transitive_delegators(&self, delegate: &str) -> Vec<String> {
        let mut result = Vec::new();
        let mut to_process = vec![delegate.to_string()];
        let mut visited = HashSet::new();
        visited.insert(delegate.to_string());

        while let Some(current) = to_process.pop() {
            for delegator in self.direct_delegators(&current) {
                if visited.insert(delegator.clone()) {
                    result.push(delegator.clone());
                    to_process.push(delegator);
                }
            }
        }

        result
    }

    /// Resolve every voter to their (possibly indirect) outcome.
    ///
    /// The resolution is memoized until the next mutating operation. The
    /// walk is iterative: delegation chains can be arbitrarily long and a
    /// recursive resolution would not terminate on cycles.
    pub fn outcomes(&mut self) -> &HashMap<String, Outcome> {
        if self.resolved.is_none() {
            let resolved = self.resolve();
            self.resolved = Some(resolved);
        }
        self.resolved.get_or_insert_with(HashMap::new)
    }

    /// Count the resolved votes.
    pub fn tally(&mut self) -> Tally {
        let voters = self.voters.len();
        let outcomes = self.outcomes();

        let mut choices: HashMap<String, u64> = HashMap::new();
        let mut invalid_votes = 0u64;
        for outcome in outcomes.values() {
            match outcome {
                Outcome::Alternative(name) => *choices.entry(name.clone()).or_default() += 1,
                Outcome::Invalid => invalid_votes += 1,
            }
        }

        debug!(voters, invalid_votes, alternatives = choices.len(), "tallied election");
        Tally::new(choices, invalid_votes)
    }

    fn register_voter(&mut self, name: &str) {
        if !self.voters.contains_key(name) {
            self.voters.insert(name.to_string(), Voter::default());
            self.resolved = None;
        }
    }

    /// Overwrite a voter's choice, keeping the reverse lookup consistent.
    fn set_choice(&mut self, voter: &str, choice: Choice) {
        let previous = self
            .voters
            .get_mut(voter)
            .map(|v| v.choice.replace(choice.clone()))
            .unwrap_or_default();

        if let Some(Choice::Delegate(old)) = previous {
            if let Some(delegators) = self.delegators.get_mut(&old) {
                delegators.retain(|d| d != voter);
            }
        }

        if let Choice::Delegate(delegate) = &choice {
            let entry = self.delegators.entry(delegate.clone()).or_default();
            if !entry.iter().any(|d| d == voter) {
                entry.push(voter.to_string());
            }
        }

        self.resolved = None;
    }

    /// Walk each unresolved voter's delegation chain until it ends in an
    /// alternative, an already-resolved voter, a voter without a choice, or
    /// a cycle. The whole walked path shares the terminal outcome.
    fn resolve(&self) -> HashMap<String, Outcome> {
        let mut outcomes: HashMap<String, Outcome> = HashMap::with_capacity(self.voters.len());

        for start in self.voters.keys() {
            if outcomes.contains_key(start) {
                continue;
            }

            let mut current = start.as_str();
            let mut path: Vec<&str> = vec![current];
            let mut on_path: HashSet<&str> = HashSet::new();
            on_path.insert(current);

            let outcome = loop {
                match self.voters.get(current).and_then(|v| v.choice.as_ref()) {
                    None => break Outcome::Invalid,
                    Some(Choice::Alternative(name)) => {
                        break Outcome::Alternative(name.clone());
                    }
                    Some(Choice::Delegate(next)) => {
                        if let Some(known) = outcomes.get(next.as_str()) {
                            break known.clone();
                        }
                        if on_path.contains(next.as_str()) {
                            trace!(voter = current, delegate = %next, "delegation cycle");
                            break Outcome::Invalid;
                        }
                        current = next.as_str();
                        on_path.insert(current);
                        path.push(current);
                    }
                }
            };

            for name in path {
                outcomes.insert(name.to_string(), outcome.clone());
            }
        }

        debug!(resolved = outcomes.len(), "resolved delegation chains");
        outcomes
    }
}

/// Reject unusable voter names. Names keep inner whitespace as-is.
fn validate_name(name: &str) -> Result<&str, ElectionError> {
    if name.is_empty() {
        return Err(ElectionError::EmptyVoterName);
    }
    if name.trim().is_empty() {
        return Err(ElectionError::InvalidVoterName(name.to_string()));
    }
    Ok(name)
}

/// Treat absent and empty strings alike: no choice.
fn normalize(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

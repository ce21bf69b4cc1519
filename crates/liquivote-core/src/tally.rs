//! Vote counting and ranking.

use std::collections::HashMap;

use itertools::Itertools;
use serde::Serialize;

/// Counted election result.
///
/// A tally is a detached snapshot: votes recorded after it was produced
/// never change it. Alternatives without a single resolved vote do not
/// appear in `choices`. The invalid counter is kept apart so a real
/// alternative named `Invalid` stays distinguishable from spoiled ballots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tally {
    choices: HashMap<String, u64>,
    invalid_votes: u64,
}

impl Tally {
    pub(crate) fn new(choices: HashMap<String, u64>, invalid_votes: u64) -> Self {
        Self { choices, invalid_votes }
    }

    /// Votes received by an alternative, if it received any.
    pub fn votes_for(&self, alternative: &str) -> Option<u64> {
        self.choices.get(alternative).copied()
    }

    /// Per-alternative counts, unordered.
    pub fn choices(&self) -> &HashMap<String, u64> {
        &self.choices
    }

    /// Number of ballots that resolved to no alternative.
    pub fn invalid_votes(&self) -> u64 {
        self.invalid_votes
    }

    /// Total number of counted ballots, invalid ones included.
    pub fn total_votes(&self) -> u64 {
        self.choices.values().sum::<u64>() + self.invalid_votes
    }

    /// Alternatives ranked by votes, descending; ties break on the
    /// alternative name, ascending, so the order is deterministic.
    pub fn ranked(&self) -> Vec<(String, u64)> {
        self.choices
            .iter()
            .map(|(name, votes)| (name.clone(), *votes))
            .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tally(entries: &[(&str, u64)], invalid: u64) -> Tally {
        let choices = entries.iter().map(|(n, v)| (n.to_string(), *v)).collect();
        Tally::new(choices, invalid)
    }

    #[test]
    fn test_ranked_orders_by_votes_then_name() {
        let tally = tally(&[("Salad", 2), ("Pizza", 2), ("Vegan Burger", 1)], 3);

        let ranked = tally.ranked();
        assert_eq!(
            ranked,
            vec![
                ("Pizza".to_string(), 2),
                ("Salad".to_string(), 2),
                ("Vegan Burger".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_ranked_is_case_sensitive() {
        let tally = tally(&[("apple", 2), ("Apple", 2)], 0);

        // Byte order: uppercase sorts before lowercase.
        let ranked = tally.ranked();
        assert_eq!(ranked[0].0, "Apple");
        assert_eq!(ranked[1].0, "apple");
    }

    #[test]
    fn test_totals() {
        let tally = tally(&[("Salad", 2), ("Pizza", 1)], 3);
        assert_eq!(tally.total_votes(), 6);
        assert_eq!(tally.invalid_votes(), 3);
        assert_eq!(tally.votes_for("Salad"), Some(2));
        assert_eq!(tally.votes_for("Never"), None);
    }
}

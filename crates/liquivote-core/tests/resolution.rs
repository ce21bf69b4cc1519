//! Property tests for delegation resolution.

use liquivote_core::{Election, Outcome};
use proptest::prelude::*;

/// A recorded act for one voter, as indices into a small name pool so the
/// generated elections contain shared chains, re-votes and cycles.
#[derive(Debug, Clone)]
enum Act {
    Pick { voter: usize, alternative: usize },
    Delegate { voter: usize, delegate: usize },
    EmptyBallot { voter: usize },
}

fn act_strategy() -> impl Strategy<Value = Act> {
    prop_oneof![
        (0..12usize, 0..4usize).prop_map(|(voter, alternative)| Act::Pick { voter, alternative }),
        (0..12usize, 0..12usize).prop_map(|(voter, delegate)| Act::Delegate { voter, delegate }),
        (0..12usize).prop_map(|voter| Act::EmptyBallot { voter }),
    ]
}

fn build(acts: &[Act]) -> Election {
    let mut election = Election::new();
    for act in acts {
        match act {
            Act::Pick { voter, alternative } => {
                election
                    .pick(&format!("v{voter}"), Some(&format!("alt{alternative}")))
                    .unwrap();
            }
            Act::Delegate { voter, delegate } => {
                election
                    .delegate(&format!("v{voter}"), Some(&format!("v{delegate}")))
                    .unwrap();
            }
            Act::EmptyBallot { voter } => {
                election.pick(&format!("v{voter}"), None).unwrap();
            }
        }
    }
    election
}

proptest! {
    /// Every registered voter is counted exactly once.
    #[test]
    fn counts_sum_to_voter_count(acts in prop::collection::vec(act_strategy(), 0..60)) {
        let mut election = build(&acts);
        let tally = election.tally();
        prop_assert_eq!(tally.total_votes(), election.voter_count() as u64);
    }

    /// Resolving twice yields the same outcomes, and a second tally agrees
    /// with the first when nothing changed in between.
    #[test]
    fn resolution_is_idempotent(acts in prop::collection::vec(act_strategy(), 0..60)) {
        let mut election = build(&acts);
        let first = election.outcomes().clone();
        let second = election.outcomes().clone();
        prop_assert_eq!(&first, &second);
        let tally_a = election.tally();
        let tally_b = election.tally();
        prop_assert_eq!(tally_a, tally_b);
    }

    /// A valid outcome always points at a registered alternative, and every
    /// voter on a chain ending in a pick shares that pick's outcome.
    #[test]
    fn valid_outcomes_are_registered_alternatives(acts in prop::collection::vec(act_strategy(), 0..60)) {
        let mut election = build(&acts);
        let alternatives = election.alternative_names();
        for outcome in election.outcomes().values() {
            if let Outcome::Alternative(name) = outcome {
                prop_assert!(alternatives.contains(name));
            }
        }
    }

    /// The ranked view never loses or invents votes.
    #[test]
    fn ranking_preserves_counts(acts in prop::collection::vec(act_strategy(), 0..60)) {
        let mut election = build(&acts);
        let tally = election.tally();
        let ranked = tally.ranked();
        prop_assert_eq!(ranked.len(), tally.choices().len());
        let ranked_sum: u64 = ranked.iter().map(|(_, votes)| votes).sum();
        let direct_sum: u64 = tally.choices().values().sum();
        prop_assert_eq!(ranked_sum, direct_sum);
        // Strictly non-increasing vote counts.
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].1 >= pair[1].1);
        }
    }
}

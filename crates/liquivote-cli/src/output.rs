//! Output formatting utilities.
//!
//! Pretty printing for the tally report and the open-votes view.

use std::collections::{BTreeMap, HashMap};

use colored::Colorize;
use liquivote_core::{Outcome, Tally};
use serde::Serialize;
use tabled::{Table, Tabled};

/// One result line: `    {count:>4} {name}`.
pub fn format_count_line(votes: u64, name: &str) -> String {
    format!("    {votes:>4} {name}")
}

/// Render the ranked results, one alternative per line, the invalid count
/// always last.
pub fn render_results(tally: &Tally) -> String {
    let mut out = String::new();
    for (name, votes) in tally.ranked() {
        out.push_str(&format_count_line(votes, &name));
        out.push('\n');
    }
    out.push_str(&format_count_line(tally.invalid_votes(), "Invalid"));
    out.push('\n');
    out
}

/// Render the per-voter view of resolved choices, sorted by voter name.
pub fn render_open_votes(outcomes: &HashMap<String, Outcome>) -> String {
    #[derive(Tabled)]
    struct OpenVoteRow {
        voter: String,
        choice: String,
    }

    let sorted: BTreeMap<&String, &Outcome> = outcomes.iter().collect();
    let rows: Vec<OpenVoteRow> = sorted
        .into_iter()
        .map(|(voter, outcome)| OpenVoteRow {
            voter: voter.clone(),
            choice: match outcome.alternative() {
                Some(name) => name.to_string(),
                None => "(invalid choice)".to_string(),
            },
        })
        .collect();

    format!("\nOpen Votes:\n{}\n", Table::new(rows))
}

/// Machine-readable report for `--json`.
#[derive(Debug, Serialize)]
pub struct JsonReport {
    pub results: Vec<JsonResult>,
    pub invalid_votes: u64,
    pub voters: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open: Option<BTreeMap<String, Option<String>>>,
}

#[derive(Debug, Serialize)]
pub struct JsonResult {
    pub alternative: String,
    pub votes: u64,
}

impl JsonReport {
    pub fn new(tally: &Tally, open: Option<&HashMap<String, Outcome>>) -> Self {
        let results = tally
            .ranked()
            .into_iter()
            .map(|(alternative, votes)| JsonResult { alternative, votes })
            .collect();

        let open = open.map(|outcomes| {
            outcomes
                .iter()
                .map(|(voter, outcome)| {
                    (voter.clone(), outcome.alternative().map(str::to_string))
                })
                .collect()
        });

        Self {
            results,
            invalid_votes: tally.invalid_votes(),
            voters: tally.total_votes(),
            open,
        }
    }
}

/// Print a warning to stderr.
pub fn print_warning(msg: &str) {
    eprintln!("{}", format!("⚠ {}", msg).yellow());
}

/// Print an error to stderr.
pub fn print_error(msg: &str) {
    eprintln!("{}", format!("✗ {}", msg).red());
}

//! The command-processing loop.
//!
//! Reads commands until the first empty line or end of input, feeds them
//! into an [`Election`] and writes the report.

use std::io::{BufRead, Write};

use liquivote_core::Election;
use tracing::debug;

use crate::command::{self, Action};
use crate::output::{self, JsonReport};
use crate::Args;

/// Run one tallying session: consume `input`, write the report to `out`.
///
/// Warnings about skipped lines go to stderr; when any line was skipped, a
/// blank line separates the (possibly interleaved) warnings from the
/// report.
pub fn run<R: BufRead, W: Write>(args: &Args, input: R, out: &mut W) -> anyhow::Result<()> {
    let mut election = Election::new();
    let mut warned = false;
    let mut applied = 0usize;

    for line in input.lines() {
        let line = line?;
        if line.is_empty() {
            break;
        }

        let cmd = command::parse_line(&line);
        match (cmd.voter.as_deref(), cmd.action) {
            (Some(voter), Some(Action::Pick)) => {
                election.pick(voter, cmd.choice.as_deref())?;
                applied += 1;
            }
            (Some(voter), Some(Action::Delegate)) => {
                election.delegate(voter, cmd.choice.as_deref())?;
                applied += 1;
            }
            _ => {
                output::print_warning(&format!("Invalid line, skipping: {line:?}"));
                warned = true;
            }
        }
    }

    debug!(applied, voters = election.voter_count(), "input consumed");

    let tally = election.tally();

    if args.json {
        let open = args.open.then(|| election.outcomes().clone());
        let report = JsonReport::new(&tally, open.as_ref());
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
        return Ok(());
    }

    if warned {
        writeln!(out)?;
    }
    write!(out, "{}", output::render_results(&tally))?;

    if args.open {
        write!(out, "{}", output::render_open_votes(election.outcomes()))?;
    }

    Ok(())
}

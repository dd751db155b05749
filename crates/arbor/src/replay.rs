use std::fmt;
use std::io::{BufRead, Write};
use std::sync::Arc;

use anyhow::Context;
use arbor_sync::{CodecRegistry, ReceiveSession, RoundStats, transport};

#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct Summary {
    pub(crate) rounds: usize,
    pub(crate) failed: usize,
    pub(crate) violations: usize,
}

impl Summary {
    pub(crate) fn is_clean(&self) -> bool {
        self.failed == 0 && self.violations == 0
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} rounds, {} failed, {} violations", self.rounds, self.failed, self.violations)
    }
}

/// Receives every round of a JSON-lines transcript and validates the result.
///
/// A failed round leaves the session without a baseline, so every round after
/// it fails too until the transcript carries a full round again.
pub(crate) fn replay(
    registry: Arc<CodecRegistry>,
    transcript: impl BufRead,
    out: &mut impl Write,
) -> anyhow::Result<Summary> {
    let mut session = ReceiveSession::new(registry);
    let mut summary = Summary::default();

    for (number, line) in transcript.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read line {}", number + 1))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        summary.rounds += 1;
        let round = summary.rounds;

        let items = match transport::decode_round(line) {
            Ok(items) => items,
            Err(error) => {
                tracing::warn!(round, line = number + 1, %error, "unreadable round");
                session.reset();
                summary.failed += 1;
                writeln!(out, "round {round}: failed: {error}")?;
                continue;
            }
        };

        let stats = RoundStats::of(&items);
        match session.receive(items) {
            Ok(tree) => {
                let report = arbor_validate::check(&tree);
                summary.violations += report.violations.len();
                writeln!(out, "round {round}: {stats}, {} violations", report.violations.len())?;
                for violation in &report.violations {
                    writeln!(out, "  {violation}")?;
                }
            }
            Err(error) => {
                summary.failed += 1;
                writeln!(out, "round {round}: failed: {error}")?;
            }
        }
    }

    Ok(summary)
}

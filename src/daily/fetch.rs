use super::aggregate::{aggregate, DayStatsIndex};
use crate::git::GitRepo;
use crate::model::{DayWindow, TimeBasis};
use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};

fn spinner(show_progress: bool) -> ProgressBar {
    if !show_progress {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} {pos}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message("Collecting commits...");
    pb
}

/// Walk the repository history for `window` and fold it into per-day stats.
pub fn fetch_day_stats(
    repo: &GitRepo,
    window: DayWindow,
    basis: TimeBasis,
    show_progress: bool,
) -> anyhow::Result<DayStatsIndex> {
    let walk = repo
        .commits(window)
        .context("Failed to start walking repository history")?;

    let pb = spinner(show_progress);
    let index = aggregate(walk.inspect(|_| pb.inc(1)), basis);
    match &index {
        Ok(days) if days.is_empty() => pb.finish_with_message("No commits in range"),
        Ok(days) => pb.finish_with_message(format!("Commits collected on {} days", days.len())),
        Err(_) => pb.abandon(),
    }

    index.context("Failed to collect commits from repository")
}

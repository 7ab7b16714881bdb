use crate::error::Result;
use crate::model::{CommitRecord, DayStats, TimeBasis};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Per-day statistics for the days that saw at least one commit.
///
/// The index is sparse: a day without an entry had no commits. Entries are
/// only ever created by folding a commit in, never pre-filled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayStatsIndex {
    days: BTreeMap<NaiveDate, DayStats>,
}

impl DayStatsIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_commit(&mut self, commit: &CommitRecord, basis: TimeBasis) {
        let day = basis.day_of(&commit.timestamp);
        let entry = self.days.entry(day).or_default();
        for delta in &commit.files {
            entry.add_file(delta);
        }
    }

    pub fn get(&self, day: &NaiveDate) -> Option<&DayStats> {
        self.days.get(day)
    }

    pub fn contains(&self, day: &NaiveDate) -> bool {
        self.days.contains_key(day)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Fold a stream of commits into a [`DayStatsIndex`].
///
/// The stream is consumed to the end; the first error aborts the fold and is
/// returned in place of the index.
pub fn aggregate<I>(commits: I, basis: TimeBasis) -> Result<DayStatsIndex>
where
    I: IntoIterator<Item = Result<CommitRecord>>,
{
    let mut index = DayStatsIndex::new();
    for commit in commits {
        index.insert_commit(&commit?, basis);
    }
    Ok(index)
}

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDelta {
    pub path: String,
    pub added_lines: u32,
    pub deleted_lines: u32,
    #[serde(default)]
    pub is_binary: bool,
}

/// A single commit as handed over by the history walk: the author timestamp
/// keeps the offset it was recorded with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitRecord {
    pub id: String,
    pub timestamp: DateTime<FixedOffset>,
    pub files: Vec<FileDelta>,
}

/// Which clock a commit's calendar day is read from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeBasis {
    #[default]
    AuthorLocal,
    Utc,
}

impl TimeBasis {
    pub fn day_of(self, timestamp: &DateTime<FixedOffset>) -> NaiveDate {
        match self {
            TimeBasis::AuthorLocal => timestamp.date_naive(),
            TimeBasis::Utc => timestamp.with_timezone(&Utc).date_naive(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayStats {
    pub changed_files: BTreeSet<String>,
    pub additions: u64,
    pub deletions: u64,
}

impl DayStats {
    /// Binary files carry no line counts and are left out of the changed
    /// file set.
    pub fn add_file(&mut self, delta: &FileDelta) {
        if !delta.is_binary {
            self.changed_files.insert(delta.path.clone());
        }
        self.additions += delta.added_lines as u64;
        self.deletions += delta.deleted_lines as u64;
    }

    pub fn files_changed(&self) -> usize {
        self.changed_files.len()
    }

    pub fn total_changes(&self) -> u64 {
        self.additions + self.deletions
    }
}

/// Inclusive range of whole calendar days requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DayWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> crate::error::Result<Self> {
        if end < start {
            return Err(crate::error::DaystatError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// First instant of `start`, in UTC.
    pub fn since(&self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self.start.and_time(NaiveTime::MIN))
    }

    /// Last second of `end`, in UTC.
    pub fn until(&self) -> DateTime<Utc> {
        let last = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
        Utc.from_utc_datetime(&self.end.and_time(last))
    }

    /// Bounds are whole UTC days, while commits are later bucketed by their
    /// author-local day, so a commit near midnight in a far offset can fall
    /// outside the window although its local day is inside it.
    pub fn contains(&self, timestamp: &DateTime<FixedOffset>) -> bool {
        let ts = timestamp.with_timezone(&Utc);
        ts >= self.since() && ts <= self.until()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActivityRow {
    Active {
        date: NaiveDate,
        files_changed: usize,
        additions: u64,
        deletions: u64,
    },
    Gap {
        start: NaiveDate,
        end: NaiveDate,
    },
}

impl ActivityRow {
    pub fn total_changes(&self) -> u64 {
        match self {
            ActivityRow::Active { additions, deletions, .. } => additions + deletions,
            ActivityRow::Gap { .. } => 0,
        }
    }

    /// Number of calendar days the row covers.
    pub fn days(&self) -> i64 {
        match self {
            ActivityRow::Active { .. } => 1,
            ActivityRow::Gap { start, end } => (*end - *start).num_days() + 1,
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        match self {
            ActivityRow::Active { date, .. } => *date,
            ActivityRow::Gap { start, .. } => *start,
        }
    }

    pub fn last_day(&self) -> NaiveDate {
        match self {
            ActivityRow::Active { date, .. } => *date,
            ActivityRow::Gap { end, .. } => *end,
        }
    }
}

/// Flattened row shape used for JSON and NDJSON output, where the derived
/// totals are written out next to the counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowRecord {
    Active {
        date: NaiveDate,
        files_changed: usize,
        additions: u64,
        deletions: u64,
        total_changes: u64,
    },
    Gap {
        start: NaiveDate,
        end: NaiveDate,
        days: i64,
    },
}

impl From<&ActivityRow> for RowRecord {
    fn from(row: &ActivityRow) -> Self {
        match *row {
            ActivityRow::Active {
                date,
                files_changed,
                additions,
                deletions,
            } => RowRecord::Active {
                date,
                files_changed,
                additions,
                deletions,
                total_changes: additions + deletions,
            },
            ActivityRow::Gap { start, end } => RowRecord::Gap {
                start,
                end,
                days: row.days(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaystatOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repository_path: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub time_basis: TimeBasis,
    pub rows: Vec<RowRecord>,
}

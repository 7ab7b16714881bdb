use super::aggregate::DayStatsIndex;
use crate::model::{ActivityRow, DayWindow};
use chrono::NaiveDate;

/// Walks a day window in ascending order, yielding one row per active day and
/// one row per maximal run of days without commits.
pub struct DayRows<'a> {
    index: &'a DayStatsIndex,
    next_day: Option<NaiveDate>,
    end: NaiveDate,
}

pub fn rows(index: &DayStatsIndex, window: DayWindow) -> DayRows<'_> {
    DayRows {
        index,
        next_day: Some(window.start),
        end: window.end,
    }
}

impl DayRows<'_> {
    fn advance(&mut self, from: NaiveDate) {
        self.next_day = from.succ_opt().filter(|d| *d <= self.end);
    }
}

impl Iterator for DayRows<'_> {
    type Item = ActivityRow;

    fn next(&mut self) -> Option<ActivityRow> {
        let day = self.next_day?;

        if let Some(stats) = self.index.get(&day) {
            self.advance(day);
            return Some(ActivityRow::Active {
                date: day,
                files_changed: stats.files_changed(),
                additions: stats.additions,
                deletions: stats.deletions,
            });
        }

        let gap_start = day;
        let mut gap_end = day;
        while let Some(next) = gap_end.succ_opt().filter(|d| *d <= self.end) {
            if self.index.contains(&next) {
                break;
            }
            gap_end = next;
        }
        self.advance(gap_end);

        Some(ActivityRow::Gap {
            start: gap_start,
            end: gap_end,
        })
    }
}

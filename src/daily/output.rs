use crate::error::Result;
use crate::model::{ActivityRow, DaystatOutput, DayWindow, RowRecord, TimeBasis, SCHEMA_VERSION};
use crate::util::{center_text, day_key, format_day_range, pad_text, plural_days};
use chrono::Utc;
use console::style;
use std::io::Write;

pub const DATE_RANGE_WIDTH: usize = 25;
pub const FILES_CHANGED_WIDTH: usize = 15;
pub const ADDITIONS_WIDTH: usize = 11;
pub const DELETIONS_WIDTH: usize = 11;
pub const TOTAL_CHANGES_WIDTH: usize = 15;

/// Full table width: five columns plus four `|` separators.
pub const TABLE_WIDTH: usize =
    DATE_RANGE_WIDTH + FILES_CHANGED_WIDTH + ADDITIONS_WIDTH + DELETIONS_WIDTH + TOTAL_CHANGES_WIDTH + 4;

/// 256-colour palette index used for idle stretches.
const GAP_COLOR: u8 = 208;

pub struct TableWriter {
    colored: bool,
}

impl TableWriter {
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }

    pub fn rule(&self) -> String {
        "-".repeat(TABLE_WIDTH)
    }

    fn gap_style(&self, text: String) -> String {
        style(text)
            .color256(GAP_COLOR)
            .force_styling(self.colored)
            .to_string()
    }

    pub fn header_lines(&self) -> Vec<String> {
        vec![
            format!(
                "{}|{}|{}|{}|{}",
                center_text("Date Range", DATE_RANGE_WIDTH),
                center_text("Files Changed", FILES_CHANGED_WIDTH),
                center_text("Additions", ADDITIONS_WIDTH),
                center_text("Deletions", DELETIONS_WIDTH),
                center_text("Total Changes", TOTAL_CHANGES_WIDTH),
            ),
            self.rule(),
        ]
    }

    pub fn row_lines(&self, row: &ActivityRow) -> Vec<String> {
        match row {
            ActivityRow::Active {
                date,
                files_changed,
                additions,
                deletions,
            } => vec![
                format!(
                    "{}|{}|{}|{}|{}",
                    pad_text(&day_key(date), DATE_RANGE_WIDTH),
                    center_text(&files_changed.to_string(), FILES_CHANGED_WIDTH),
                    center_text(&additions.to_string(), ADDITIONS_WIDTH),
                    center_text(&deletions.to_string(), DELETIONS_WIDTH),
                    center_text(&row.total_changes().to_string(), TOTAL_CHANGES_WIDTH),
                ),
                self.rule(),
            ],
            ActivityRow::Gap { start, end } => {
                let days = row.days();
                let message = format!("{days} {} no commits", plural_days(days));
                vec![
                    self.gap_style(self.rule()),
                    format!(
                        "{}|{}",
                        self.gap_style(pad_text(&format_day_range(start, end), DATE_RANGE_WIDTH)),
                        self.gap_style(center_text(&message, TABLE_WIDTH - DATE_RANGE_WIDTH - 1)),
                    ),
                    self.rule(),
                ]
            }
        }
    }

    pub fn write_table<W, I>(&self, rows: I, out: &mut W) -> Result<()>
    where
        W: Write,
        I: IntoIterator<Item = ActivityRow>,
    {
        for line in self.header_lines() {
            writeln!(out, "{line}")?;
        }
        for row in rows {
            for line in self.row_lines(&row) {
                writeln!(out, "{line}")?;
            }
        }
        Ok(())
    }
}

pub fn output_json<W: Write>(
    rows: &[ActivityRow],
    repository_path: &str,
    window: DayWindow,
    time_basis: TimeBasis,
    out: &mut W,
) -> Result<()> {
    let output = DaystatOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        repository_path: repository_path.to_string(),
        start_date: window.start,
        end_date: window.end,
        time_basis,
        rows: rows.iter().map(RowRecord::from).collect(),
    };

    writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}

pub fn output_ndjson<W, I>(rows: I, out: &mut W) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = ActivityRow>,
{
    for row in rows {
        writeln!(out, "{}", serde_json::to_string(&RowRecord::from(&row))?)?;
    }
    Ok(())
}

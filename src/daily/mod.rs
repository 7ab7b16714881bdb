pub mod aggregate;
pub mod exec;
pub mod fetch;
pub mod output;
pub mod rows;

pub use aggregate::{aggregate, DayStatsIndex};
pub use exec::exec;
pub use fetch::fetch_day_stats;
pub use output::{output_json, output_ndjson, TableWriter};
pub use rows::{rows, DayRows};

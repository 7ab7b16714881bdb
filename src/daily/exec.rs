use super::{fetch_day_stats, output_json, output_ndjson, rows, TableWriter};
use crate::cli::ReportArgs;
use crate::git::GitRepo;
use crate::model::{ActivityRow, DayWindow, TimeBasis};
use crate::util::parse_day;
use anyhow::Context;
use std::io::{self, Write};

pub fn exec(args: ReportArgs) -> anyhow::Result<()> {
    // Validate all input before touching the repository.
    let start = parse_day("start", &args.start_date)?;
    let end = parse_day("end", &args.end_date)?;
    let window = DayWindow::new(start, end)?;
    let basis = if args.utc { TimeBasis::Utc } else { TimeBasis::AuthorLocal };

    let repo = GitRepo::open(&args.repo_path).context("Failed to open git repository")?;

    let machine_output = args.json || args.ndjson;
    let index = fetch_day_stats(&repo, window, basis, !(machine_output || args.quiet))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let day_rows = rows(&index, window);

    if args.json {
        let collected: Vec<ActivityRow> = day_rows.collect();
        output_json(
            &collected,
            &repo.path().to_string_lossy(),
            window,
            basis,
            &mut out,
        )?;
    } else if args.ndjson {
        output_ndjson(day_rows, &mut out)?;
    } else {
        let colored = !args.no_color && console::colors_enabled();
        TableWriter::new(colored)
            .write_table(day_rows, &mut out)
            .context("Failed to write report")?;
    }

    out.flush()?;
    Ok(())
}

use anyhow::Result;
use clap::{Args, Parser};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "git-daystat")]
#[command(about = "Daily files/lines changed in a git repository, with idle days collapsed")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub report: ReportArgs,
}

#[derive(Args, Clone)]
pub struct ReportArgs {
    #[arg(help = "Path to git repository")]
    pub repo_path: PathBuf,

    #[arg(help = "First day of the report (YYYY-MM-DD)")]
    pub start_date: String,

    #[arg(help = "Last day of the report, inclusive (YYYY-MM-DD)")]
    pub end_date: String,

    #[arg(long, help = "Group commits by UTC day instead of the author's local day")]
    pub utc: bool,

    #[arg(long, help = "Output as JSON", conflicts_with = "ndjson")]
    pub json: bool,

    #[arg(long, help = "Output as NDJSON")]
    pub ndjson: bool,

    #[arg(long, help = "Disable colored output")]
    pub no_color: bool,

    #[arg(long, short, help = "Hide the progress spinner")]
    pub quiet: bool,
}

impl Cli {
    /// Parse process arguments. Usage errors exit with status 1; help and
    /// version output exit with status 0.
    pub fn parse() -> Self {
        match <Self as Parser>::try_parse() {
            Ok(cli) => cli,
            Err(err) if err.use_stderr() => {
                let _ = err.print();
                std::process::exit(1);
            }
            Err(err) => err.exit(),
        }
    }

    pub fn execute(self) -> Result<()> {
        crate::daily::exec(self.report)
    }
}

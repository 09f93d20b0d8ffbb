use clap::Parser;
use pocketkit::{init_logging, run_job, Config, PocketJob, BUILD_DATE, VERSION};
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser)]
#[command(name = "pocketkit", version, about = "Pocket milling toolpath planner")]
struct Cli {
    /// Job file (.toml or .json)
    job: PathBuf,

    /// Settings file; the per-user config when omitted
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging()?;
    debug!(version = VERSION, build_date = BUILD_DATE, "Starting pocketkit");

    let config = Config::load_or_default(cli.config.as_deref())?;
    let job = PocketJob::load(&cli.job)?;
    let moves = run_job(&job, &config)?;

    let stdout = std::io::stdout();
    serde_json::to_writer_pretty(stdout.lock(), &moves)?;
    println!();
    Ok(())
}

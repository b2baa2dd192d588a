// seqp-score: offline batch scorer for the Solar Eclipse QSO Party
//
// Reads the pooled contact archive, scores every participant against the
// submission attribute database, and writes the score table CSV. One run
// either completes with a consistent table or aborts; there is no partial
// output.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use seqp_scoring::db::SqliteAttributeStore;
use seqp_scoring::{archive, pipeline, report, ContestConfig, Error, Result};

#[derive(Debug, Parser)]
#[command(name = "seqp-score", about = "Score a Solar Eclipse QSO Party dataset")]
struct Args {
    /// Pooled contact archive CSV (own logs plus spotting networks)
    #[arg(long)]
    contacts: PathBuf,

    /// Submission attribute database URL, e.g. sqlite:seqp.db?mode=ro
    #[arg(long)]
    db: String,

    /// Output score table CSV
    #[arg(long, default_value = "seqp_scores.csv")]
    out: PathBuf,

    /// Also write a per-mode contact count summary CSV
    #[arg(long)]
    mode_summary: Option<PathBuf>,

    /// Contest configuration overrides, JSON (defaults are the 2017 rules)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("seqp_scoring=info,seqp_score=info"),
    )
    .init();

    match run(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let cfg = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            serde_json::from_str::<ContestConfig>(&text)
                .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?
        }
        None => ContestConfig::default(),
    };

    let records = archive::load_contacts(&args.contacts)?;
    let store = SqliteAttributeStore::connect(&args.db).await?;
    let table = pipeline::run(&records, &store, &cfg).await?;

    report::write_score_table(&args.out, &table)?;
    if let Some(path) = &args.mode_summary {
        report::write_mode_summary(path, &table)?;
    }
    Ok(())
}

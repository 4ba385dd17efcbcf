use clap::Parser;
use std::{path::PathBuf, sync::Arc};
use thumbrank_core::{config::Config, report::render_table, sort_records, SortOption};
use thumbrank_feeds::{
    file::FileSource, load_dataset, sheet::SheetSource, Analyst, DataOrigin, GeminiAnalyst,
    RecordSource,
};

#[derive(Parser)]
#[command(
    name = "thumbrank",
    about = "Rank YouTube thumbnails by click-through rate, with AI commentary"
)]
struct Cli {
    /// Write debug logs to /tmp/thumbrank-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,

    /// Config file to use instead of ~/.config/thumbrank/config.toml.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Read a local CSV export instead of the published sheet.
    #[arg(long, value_name = "PATH")]
    csv: Option<PathBuf>,

    /// Initial ranking: ctr-desc, ctr-asc or rating.
    #[arg(long, value_name = "ORDER")]
    sort: Option<SortOption>,

    /// Print the ranked table to stdout and exit.
    #[arg(long)]
    print: bool,

    /// Print AI commentary for one record id (e.g. row-3) and exit.
    #[arg(long, value_name = "ID")]
    analyze: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/thumbrank-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("debug log started at /tmp/thumbrank-debug.log");
    }

    // A missing .env is fine; the key may come from the real environment.
    if let Err(err) = dotenvy::dotenv() {
        tracing::debug!(%err, "no .env loaded");
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|err| {
            tracing::warn!(%err, "could not load user config; using defaults");
            Config::defaults()
        }),
    };
    if let Some(sort) = cli.sort {
        config.ui.default_sort = sort.to_string();
    }

    let runtime = tokio::runtime::Runtime::new()?;

    let source: Box<dyn RecordSource> = match &cli.csv {
        Some(path) => Box::new(FileSource::new(path)),
        None => Box::new(SheetSource::from_config(&config.sheet)?),
    };
    let dataset = runtime.block_on(load_dataset(source.as_ref()));

    if let DataOrigin::Fallback { reason } = &dataset.origin {
        if cli.print || cli.analyze.is_some() {
            eprintln!("warning: could not read the sheet ({reason}); showing sample data");
        }
    }

    if cli.print {
        let ranked = sort_records(&dataset.records, config.ui.sort_option());
        print!("{}", render_table(&ranked));
        return Ok(());
    }

    let analyst = GeminiAnalyst::from_config(&config.analysis)?;

    if let Some(id) = &cli.analyze {
        let Some(record) = dataset.records.iter().find(|r| &r.id == id) else {
            anyhow::bail!("no record with id {id}");
        };
        match runtime.block_on(analyst.analyze(record)) {
            Ok(text) => println!("{text}"),
            Err(err) => {
                tracing::error!(%err, "commentary failed");
                eprintln!("{}", err.user_message());
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    let analyst: Arc<dyn Analyst> = Arc::new(analyst);
    thumbrank_tui::run(dataset, config, analyst, runtime.handle().clone())
}

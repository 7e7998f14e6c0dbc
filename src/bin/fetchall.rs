use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::Parser;
use urlfetch::fetchall::{FetchAllConfig, fetch_all};

#[derive(Parser)]
#[command(name = "fetchall")]
#[command(about = "Fetch URLs concurrently into file1..fileN and report timings")]
#[command(version)]
struct Cli {
    #[arg(help = "URLs to fetch, http:// is prepended when missing")]
    urls: Vec<String>,
    #[arg(short, long, default_value = ".", help = "Directory the files are written to")]
    output_dir: PathBuf,
    #[arg(short = 'j', long, help = "Maximum fetches in flight (default: unbounded)")]
    max_concurrent: Option<NonZeroUsize>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    urlfetch::init_tracing();
    let cli = Cli::parse();

    let config = FetchAllConfig {
        output_dir: cli.output_dir,
        max_concurrent: cli.max_concurrent,
    };
    let mut stdout = tokio::io::stdout();
    fetch_all(reqwest::Client::new(), &cli.urls, &config, &mut stdout).await?;

    Ok(())
}

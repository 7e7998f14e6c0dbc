use std::process::ExitCode;

use clap::Parser;
use urlfetch::fetch;

#[derive(Parser)]
#[command(name = "fetch")]
#[command(about = "Fetch URLs and stream their bodies to stdout")]
#[command(version)]
struct Cli {
    #[arg(help = "URLs to fetch, http:// is prepended when missing")]
    urls: Vec<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    urlfetch::init_tracing();
    let cli = Cli::parse();

    let client = reqwest::Client::new();
    let mut stdout = tokio::io::stdout();
    let mut stderr = tokio::io::stderr();

    match fetch::run(&client, &cli.urls, &mut stdout, &mut stderr).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("fetch: {}", err);
            ExitCode::FAILURE
        }
    }
}

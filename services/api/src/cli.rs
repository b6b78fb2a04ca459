use crate::demo::{run_count, run_demo, run_search, CountArgs, DemoArgs, SearchArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use talent_search::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Talent Search",
    about = "Search, rank, and count pool candidates from the command line or over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Run one candidate search against a CSV export and print the page
    Search(SearchArgs),
    /// Count candidates matching the given criteria
    Count(CountArgs),
    /// Walk through a few searches over the bundled sample pool
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Candidate CSV export to load at startup (defaults to SEARCH_CANDIDATES_CSV)
    #[arg(long)]
    pub(crate) candidates_csv: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Search(args) => run_search(args),
        Command::Count(args) => run_count(args),
        Command::Demo(args) => run_demo(args),
    }
}

use crate::server;
use crate::terminal::{run_evaluate, run_profiles, run_take, EvaluateArgs, TakeArgs};
use agent_quiz::error::AppError;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Agent Quiz",
    about = "Find your agent role and playstyle code, in the terminal or over HTTP",
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
    /// Take the quiz interactively in the terminal
    Take(TakeArgs),
    /// Evaluate a JSON file of answers without prompting
    Evaluate(EvaluateArgs),
    /// List every playstyle profile
    Profiles,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Question dataset CSV (defaults to QUIZ_DATASET_PATH)
    #[arg(long)]
    pub(crate) dataset: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Take(args) => run_take(args),
        Command::Evaluate(args) => run_evaluate(args),
        Command::Profiles => run_profiles(),
    }
}

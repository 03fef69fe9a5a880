mod cli;
mod infra;
mod routes;
mod server;
mod terminal;

use agent_quiz::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}

mod cli;
mod demo;
mod infra;
mod routes;
mod sample;
mod server;

use unistay::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}

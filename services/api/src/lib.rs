mod cli;
mod compare;
mod infra;
mod routes;
mod server;

use procurement::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}

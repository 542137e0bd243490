mod cli;
mod render;
mod shutdown;

use job_board::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}

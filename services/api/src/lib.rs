mod auth;
mod cli;
mod commands;
mod extract;
mod infra;
mod routes;
mod server;

pub use infra::BrokerageState;
pub use routes::app_router;

use freight_desk::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}

use std::error::Error;

use api::core::app_state::{AppConfig, AppState};
use tracing::info;

mod telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // A missing .env is fine; a malformed one is not.
    if let Err(err) = dotenvy::dotenv() {
        if !err.not_found() {
            return Err(err.into());
        }
    }

    let config = AppConfig::from_env()?;
    telemetry::init(config.debug)?;
    info!(address = %config.bind_address, debug = config.debug, "starting");

    let state = AppState::new(config)?;
    api::start(state).await?;

    Ok(())
}

use std::sync::Arc;

use color_eyre::eyre::Result;
use dotenv::dotenv;
use rota_api::config::ApiConfig;
use rota_db::FileStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;

    // Open the schedule slot file
    let store = FileStore::open(&config.data_file)?;

    // Start API server
    rota_api::start_server(config, Arc::new(store)).await?;

    Ok(())
}

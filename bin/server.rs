// Fun Purchases - Web Server
// GET /fun-purchases serves purchases.json from the working directory

use anyhow::Result;
use fun_purchases::server::{serve, AppState};
use fun_purchases::{Config, PURCHASES_FILE};
use log::info;

#[tokio::main]
async fn main() -> Result<()> {
    fun_purchases::init_logging();

    let config = Config::from_env()?;
    info!("🌐 Fun Purchases server v{}", fun_purchases::VERSION);

    serve(config.bind_addr, AppState::new(PURCHASES_FILE)).await
}

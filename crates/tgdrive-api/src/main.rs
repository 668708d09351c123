use tgdrive_api::setup;
use tgdrive_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::from_env()?;

    let app = setup::initialize_app(config.clone()).await?;

    setup::server::run(&config, app).await?;

    Ok(())
}

use connector_ftx_rest::rest::FtxRestClient;
use connector_ftx_rest::FtxAuthSettings;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .init();

    let client = FtxRestClient::new(FtxAuthSettings::from_env()?)?;

    let response = client.get_orderbook("BTC-PERP", Some(20))?;
    tracing::info!(status = response.status, "orderbook");
    tracing::info!("{}", response.body);

    let response = client.get_balances()?;
    tracing::info!(status = response.status, "balances");
    tracing::info!("{}", response.body);

    Ok(())
}

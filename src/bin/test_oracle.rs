//! Quick test to verify both oracle connections
//!
//! Run with: cargo run --bin test_oracle [chainlink|band|all] [config.yaml]

use anyhow::Result;
use tracing::{info, warn};

use eth_price_widget::bin_common::{load_widget_config, parse_args, ConfigType};
use eth_price_widget::pricefeed::application::widget::format_price;
use eth_price_widget::pricefeed::{
    init_tracing, EthersChainClient, OracleAdapter, OracleSource, PriceFetcher,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let args = parse_args();
    let config_type = match args.get(1) {
        Some(path) => ConfigType::Custom(path.clone()),
        None => ConfigType::Widget,
    };

    let config = load_widget_config(config_type)?;
    init_tracing(&config.log_level);

    info!("════════════════════════════════════════════════════════════════");
    info!("ETH/USD Oracle Connection Test");
    info!("════════════════════════════════════════════════════════════════");

    let sources = match args.first().map(String::as_str) {
        None | Some("all") => OracleSource::ALL.to_vec(),
        Some(arg) => vec![arg.parse::<OracleSource>()?],
    };

    if sources.contains(&OracleSource::Chainlink) {
        let chain = EthersChainClient::new(&config.rpc_url, &config.aggregator_address)?;
        info!("Aggregator: {:?} via {}", chain.address(), config.rpc_url);

        match (chain.description().await, chain.decimals().await) {
            (Ok(description), Ok(decimals)) => {
                info!("✅ Feed: {} ({} decimals)", description, decimals)
            }
            (Err(e), _) | (_, Err(e)) => warn!("❌ Could not read feed metadata: {}", e),
        }
    }

    let adapter = OracleAdapter::from_config(&config)?;
    let mut failures = 0;

    for source in sources {
        match adapter.fetch(source).await {
            Ok(quote) => info!("✅ {}: {}", source, format_price(Some(&quote))),
            Err(e) => {
                failures += 1;
                warn!("❌ {}: {}", source, e);
            }
        }
    }

    info!("════════════════════════════════════════════════════════════════");
    info!("Test complete ({} failed)", failures);
    info!("════════════════════════════════════════════════════════════════");

    Ok(())
}

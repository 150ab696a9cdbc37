use coin_market_sdk::{format_currency, format_large_number, format_price, MarketDataClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let symbol = std::env::args().nth(1).unwrap_or_else(|| "btc".to_string());
    let client = MarketDataClient::new()?;

    println!("Popular Coins");
    println!("=============");
    for coin in client.popular_coins().await? {
        println!("{:<24} {}", coin.name, coin.symbol.to_uppercase());
    }

    println!("\n{:-<60}", "");
    let coins = client.coins_by_symbol(&symbol).await?;
    for coin in &coins {
        println!(
            "{:<20} price {:<14} cap {:<12} vol {}",
            coin.name,
            format_currency(coin.current_price),
            format_currency(coin.market_cap),
            format_large_number(coin.total_volume),
        );
    }

    let Some(first) = coins.first() else {
        println!("No market data for {}", symbol);
        return Ok(());
    };

    let history = client.coin_history(&first.id, Some(30)).await?;
    println!("\n{:-<60}", "");
    println!(
        "{} over 30 days: {} samples, last {}, change {}",
        first.name,
        history.prices.len(),
        format_price(history.latest_price()),
        format_price(history.price_change()),
    );
    if let Some(time) = history.prices.last().and_then(|p| p.time()) {
        println!("Last sample at {}", time.to_rfc3339());
    }

    Ok(())
}

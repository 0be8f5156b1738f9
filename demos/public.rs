/// Public market-data tour: assets, markets, tickers, depth, klines, and
/// system endpoints. No credential required.
use backpack_sdk::enums::{KlineInterval, TickerInterval};
use backpack_sdk::PublicClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = PublicClient::new()?;
    let symbol = "SOL_USDC";

    println!("status: {}", client.get_status().await?);
    println!("ping: {}", client.send_ping().await?);
    println!("time: {}", client.get_system_time().await?);

    let markets = client.get_markets().await?;
    println!(
        "markets: {}",
        markets.as_array().map_or(0, |m| m.len())
    );

    println!(
        "ticker {symbol}: {}",
        client.get_ticker(symbol, TickerInterval::OneDay).await?
    );
    println!("depth {symbol}: {}", client.get_depth(symbol).await?);

    let start = 1_700_000_000_000u64;
    let klines = client
        .get_klines(symbol, KlineInterval::OneHour, start, None)
        .await?;
    println!("klines: {klines}");

    println!(
        "recent trades: {}",
        client.get_recent_trades(symbol, Some(10)).await?
    );
    println!(
        "mark price: {}",
        client.get_mark_price("SOL_USDC_PERP").await?
    );
    println!(
        "borrow/lend markets: {}",
        client.get_borrow_lend_markets().await?
    );

    Ok(())
}

/// Real-time streams: public book ticker and trades, plus private order
/// updates when credentials are set.
///
/// Set `BACKPACK_API_KEY` and `BACKPACK_SECRET_KEY` for the private stream.
use backpack_sdk::BackpackWebSocket;
use tokio_stream::StreamExt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let api_key = std::env::var("BACKPACK_API_KEY").ok();
    let secret_key = std::env::var("BACKPACK_SECRET_KEY").ok();

    let ws = match (api_key, secret_key) {
        (Some(api_key), Some(secret_key)) => {
            BackpackWebSocket::connect_authenticated(&api_key, &secret_key).await?
        }
        _ => BackpackWebSocket::connect().await?,
    };
    println!("connected");

    let mut book = ws.subscribe(&["bookTicker.SOL_USDC"]).await?;
    tokio::spawn(async move {
        while let Some(event) = book.next().await {
            println!("book ticker: {event}");
        }
    });

    let mut trades = ws.subscribe(&["trade.SOL_USDC"]).await?;
    tokio::spawn(async move {
        while let Some(event) = trades.next().await {
            println!("trade: {event}");
        }
    });

    match ws.subscribe_private(&["account.orderUpdate.SOL_USDC"]).await {
        Ok(mut orders) => {
            tokio::spawn(async move {
                while let Some(event) = orders.next().await {
                    println!("order update: {event}");
                }
            });
        }
        Err(err) => println!("private stream unavailable: {err}"),
    }

    tokio::signal::ctrl_c().await?;
    println!("closing");
    ws.disconnect().await?;
    Ok(())
}

/// Authenticated workflow: balances, deposits, order placement and
/// cancellation, and history queries.
///
/// Set `BACKPACK_API_KEY` and `BACKPACK_SECRET_KEY` before running.
use backpack_sdk::enums::{Blockchain, Side};
use backpack_sdk::{AuthenticatedClient, HistoryPage, OrderRequest};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let api_key = std::env::var("BACKPACK_API_KEY")?;
    let secret_key = std::env::var("BACKPACK_SECRET_KEY")?;
    let client = AuthenticatedClient::new(&api_key, &secret_key)?;

    // Capital
    println!("balances: {}", client.get_balances().await?);
    println!(
        "deposits: {}",
        client.get_deposits(None, None, Some(10), None).await?
    );
    println!(
        "deposit address: {}",
        client.get_deposit_address(Blockchain::Solana).await?
    );

    // History
    let page = HistoryPage::default();
    println!(
        "order history: {}",
        client
            .get_order_history(None, None, Some("SOL_USDC"), None, &page)
            .await?
    );
    println!(
        "fills: {}",
        client
            .get_fill_history(None, None, None, None, Some("SOL_USDC"), None, None, &page)
            .await?
    );

    // Orders
    let mut order = OrderRequest::limit("SOL_USDC", Side::Ask, "200", "0.1");
    order.post_only = true;
    order.client_id = Some(9_999);
    println!("placed: {}", client.execute_order(&order).await?);

    println!(
        "open orders: {}",
        client.get_open_orders(Some("SOL_USDC"), None).await?
    );
    println!(
        "cancelled: {}",
        client.cancel_open_orders("SOL_USDC", None).await?
    );

    Ok(())
}

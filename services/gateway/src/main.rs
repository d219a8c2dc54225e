use std::net::SocketAddr;
use std::sync::Arc;

use rust_decimal::Decimal;
use tokio::net::TcpListener;
use types::ids::{MarketId, UserId};

use gateway::exchange::Exchange;
use gateway::router::create_router;
use gateway::settlement::Ledger;
use gateway::state::AppState;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt::init();

    tracing::info!("starting exchange gateway");

    // Demo accounts so market orders can settle out of the box
    let ledger = Arc::new(Ledger::with_accounts([
        (UserId::new(7), Decimal::from(1_000_000)),
        (UserId::new(8), Decimal::from(1_000_000)),
    ]));
    let exchange = Exchange::new([MarketId::new("ETH")], ledger);

    let app = create_router(AppState::new(exchange));

    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

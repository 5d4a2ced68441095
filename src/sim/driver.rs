use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::info;

use crate::orderbook::OrderBook;

pub async fn run_matcher(book: Arc<OrderBook>, period: Duration, running: Arc<AtomicBool>) {
    info!(symbol = %book.symbol(), ?period, "matcher started");
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut passes = 0u64;
    while running.load(Ordering::Acquire) {
        ticker.tick().await;
        book.match_orders();
        passes += 1;
    }
    info!(passes, trades = book.total_trades_executed(), "matcher stopped");
}

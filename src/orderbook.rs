use parking_lot::Mutex;
use tracing::{debug, instrument, warn};

use crate::error::InvalidOrder;
use crate::matching::MatchOutcome;
use crate::matching::orderbook::BookState;
use crate::metrics::{MATCHED_VOLUME, ORDERS_ACCEPTED, ORDERS_REJECTED, TRADES};
use crate::models::{Order, TopRow};

#[derive(Debug)]
pub struct OrderBook {
    symbol: String,
    state: Mutex<BookState>,
}

impl OrderBook {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            state: Mutex::new(BookState::new()),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn add_order(&self, order: Order) -> Result<(), InvalidOrder> {
        let (id, side, price, quantity) = (order.id, order.side, order.price, order.quantity);
        let result = self.state.lock().add_order(order);
        match &result {
            Ok(()) => {
                metrics::counter!(ORDERS_ACCEPTED).increment(1);
                debug!(symbol = %self.symbol, id, %side, price, quantity, "order accepted");
            }
            Err(err) => {
                metrics::counter!(ORDERS_REJECTED, "reason" => err.reason()).increment(1);
                warn!(symbol = %self.symbol, id = err.order_id(), %err, "order rejected");
            }
        }
        result
    }

    #[instrument(skip(self), fields(symbol = %self.symbol))]
    pub fn match_orders(&self) -> MatchOutcome {
        let outcome = self.state.lock().match_orders();
        if !outcome.is_empty() {
            metrics::counter!(TRADES).increment(outcome.trades);
            metrics::counter!(MATCHED_VOLUME).increment(outcome.volume);
            debug!(trades = outcome.trades, volume = outcome.volume, "matching pass");
        }
        outcome
    }

    pub fn top_buys(&self, n: usize) -> Vec<TopRow> {
        self.state.lock().top_buys(n)
    }

    pub fn top_sells(&self, n: usize) -> Vec<TopRow> {
        self.state.lock().top_sells(n)
    }

    pub fn total_trades_executed(&self) -> u64 {
        self.state.lock().trades_executed()
    }

    pub fn depth(&self) -> (usize, usize) {
        self.state.lock().depth()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn book_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<OrderBook>();
    }

    #[test]
    fn rejected_order_leaves_book_untouched() {
        let book = OrderBook::new("ABC");
        book.add_order(Order::buy(1, 100.0, 10)).unwrap();
        assert!(book.add_order(Order::buy(1, 101.0, 10)).is_err());
        assert!(book.add_order(Order::sell(2, -1.0, 10)).is_err());
        assert_eq!(book.depth(), (1, 0));
        assert_eq!(book.top_buys(5)[0].price, 100.0);
        assert_eq!(book.symbol(), "ABC");
    }
}

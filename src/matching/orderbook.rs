use std::collections::HashSet;

use tracing::trace;

use crate::error::InvalidOrder;
use crate::matching::MatchOutcome;
use crate::matching::ranking::{AskLadder, BidLadder};
use crate::models::{Order, OrderId, TopRow};

#[derive(Debug, Default)]
pub(crate) struct BookState {
    bids: BidLadder,
    asks: AskLadder,
    resting: HashSet<OrderId>,
    trades_executed: u64,
}

impl BookState {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add_order(&mut self, order: Order) -> Result<(), InvalidOrder> {
        validate(&order)?;
        if !self.resting.insert(order.id) {
            return Err(InvalidOrder::DuplicateId { id: order.id });
        }
        self.rest(order);
        Ok(())
    }

    pub(crate) fn match_orders(&mut self) -> MatchOutcome {
        let mut outcome = MatchOutcome::default();

        loop {
            let (Some(bid), Some(ask)) = (self.bids.peek(), self.asks.peek()) else {
                break;
            };
            if bid.price < ask.price {
                break;
            }

            let (Some(mut bid), Some(mut ask)) = (self.bids.pop(), self.asks.pop()) else {
                break;
            };
            let trade_qty = bid.quantity.min(ask.quantity);
            bid.quantity -= trade_qty;
            ask.quantity -= trade_qty;
            self.trades_executed += 1;
            outcome.trades += 1;
            outcome.volume = outcome.volume.saturating_add(trade_qty);

            trace!(
                bid_id = bid.id,
                ask_id = ask.id,
                bid_price = bid.price,
                ask_price = ask.price,
                quantity = trade_qty,
                "trade"
            );

            self.settle(bid);
            self.settle(ask);
        }

        outcome
    }

    // Remainders go back with their original id, keeping time priority.
    fn settle(&mut self, order: Order) {
        if order.is_filled() {
            self.resting.remove(&order.id);
            return;
        }
        self.rest(order);
    }

    fn rest(&mut self, order: Order) {
        if order.is_buy() {
            self.bids.push(order);
        } else {
            self.asks.push(order);
        }
    }

    pub(crate) fn top_buys(&self, n: usize) -> Vec<TopRow> {
        self.bids.top(n)
    }

    pub(crate) fn top_sells(&self, n: usize) -> Vec<TopRow> {
        self.asks.top(n)
    }

    pub(crate) fn trades_executed(&self) -> u64 {
        self.trades_executed
    }

    pub(crate) fn depth(&self) -> (usize, usize) {
        (self.bids.len(), self.asks.len())
    }
}

fn validate(order: &Order) -> Result<(), InvalidOrder> {
    if !order.price.is_finite() || order.price <= 0.0 {
        return Err(InvalidOrder::NonPositivePrice {
            id: order.id,
            price: order.price,
        });
    }
    if order.quantity == 0 {
        return Err(InvalidOrder::ZeroQuantity { id: order.id });
    }
    Ok(())
}

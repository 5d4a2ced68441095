use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use crate::config::GeneratorConfig;
use crate::models::{Order, Side, trader_label};
use crate::orderbook::OrderBook;
use crate::sim::ids::OrderIdSource;

pub struct OrderGenerator {
    config: GeneratorConfig,
    ids: Arc<OrderIdSource>,
    rng: StdRng,
}

impl OrderGenerator {
    pub fn new(config: GeneratorConfig, ids: Arc<OrderIdSource>) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { config, ids, rng }
    }

    pub fn next_order(&mut self) -> Order {
        let id = self.ids.next_id();
        let side = if self.rng.gen_bool(0.5) { Side::Buy } else { Side::Sell };
        let jitter = self.config.price_jitter;
        let delta = if jitter > 0.0 { self.rng.gen_range(-jitter..jitter) } else { 0.0 };
        let price = (self.config.mid_price + delta).max(self.config.min_price);
        let quantity = self.rng.gen_range(1..=self.config.max_quantity);
        Order::new(id, trader_label(id), side, price, quantity)
    }

    pub async fn run(mut self, book: Arc<OrderBook>, running: Arc<AtomicBool>) {
        info!(symbol = %book.symbol(), "order generator started");
        let mut submitted = 0u64;
        'bursts: while running.load(Ordering::Acquire) {
            for _ in 0..self.config.orders_per_burst {
                if !running.load(Ordering::Acquire) {
                    break 'bursts;
                }
                let order = self.next_order();
                match book.add_order(order) {
                    Ok(()) => submitted += 1,
                    Err(err) => warn!(%err, "generated order refused"),
                }
                tokio::time::sleep(self.config.order_interval()).await;
            }
            tokio::time::sleep(self.config.burst_pause()).await;
        }
        info!(submitted, "order generator stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64) -> OrderGenerator {
        let config = GeneratorConfig {
            seed: Some(seed),
            ..GeneratorConfig::default()
        };
        OrderGenerator::new(config, Arc::new(OrderIdSource::new()))
    }

    #[test]
    fn seeded_generators_agree() {
        let mut a = seeded(42);
        let mut b = seeded(42);
        for _ in 0..50 {
            let (x, y) = (a.next_order(), b.next_order());
            assert_eq!((x.id, x.side, x.price, x.quantity), (y.id, y.side, y.price, y.quantity));
        }
    }

    #[test]
    fn orders_respect_floor_and_quantity_range() {
        let config = GeneratorConfig {
            mid_price: 1.2,
            price_jitter: 1.0,
            min_price: 1.0,
            max_quantity: 3,
            seed: Some(1),
            ..GeneratorConfig::default()
        };
        let mut generator = OrderGenerator::new(config, Arc::new(OrderIdSource::new()));
        let mut last_id = 0;
        for _ in 0..500 {
            let order = generator.next_order();
            assert!(order.price >= 1.0 && order.price < 2.2);
            assert!((1..=3).contains(&order.quantity));
            assert!(order.id > last_id);
            assert_eq!(order.trader, format!("Trader_{}", order.id));
            last_id = order.id;
        }
    }

    #[test]
    fn zero_jitter_quotes_the_mid() {
        let config = GeneratorConfig {
            price_jitter: 0.0,
            seed: Some(3),
            ..GeneratorConfig::default()
        };
        let mut generator = OrderGenerator::new(config, Arc::new(OrderIdSource::new()));
        assert_eq!(generator.next_order().price, 100.0);
    }
}

pub mod config;
pub mod error;
pub mod matching;
pub mod models;
pub mod orderbook;
pub mod sim;

pub mod metrics;

pub use error::InvalidOrder;
pub use matching::MatchOutcome;
pub use models::{Order, OrderId, Price, Quantity, Side, TopRow};
pub use orderbook::OrderBook;
pub use sim::Simulation;

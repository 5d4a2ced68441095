pub(crate) mod orderbook;
pub mod ranking;

use crate::models::Quantity;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchOutcome {
    pub trades: u64,
    pub volume: Quantity,
}

impl MatchOutcome {
    pub fn is_empty(&self) -> bool {
        self.trades == 0
    }
}

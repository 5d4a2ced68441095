use std::fmt;
use std::time::Instant;

pub type OrderId = u64;
pub type Price = f64;
pub type Quantity = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Buy,
    Sell,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "buy"),
            Side::Sell => write!(f, "sell"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub trader: String,
    pub side: Side,
    pub price: Price,
    pub quantity: Quantity,
    pub timestamp: Instant,
}

impl Order {
    pub fn new(id: OrderId, trader: impl Into<String>, side: Side, price: Price, quantity: Quantity) -> Self {
        Self {
            id,
            trader: trader.into(),
            side,
            price,
            quantity,
            timestamp: Instant::now(),
        }
    }

    pub fn buy(id: OrderId, price: Price, quantity: Quantity) -> Self {
        Self::new(id, trader_label(id), Side::Buy, price, quantity)
    }

    pub fn sell(id: OrderId, price: Price, quantity: Quantity) -> Self {
        Self::new(id, trader_label(id), Side::Sell, price, quantity)
    }

    pub fn is_buy(&self) -> bool {
        self.side == Side::Buy
    }

    pub fn is_filled(&self) -> bool {
        self.quantity == 0
    }
}

pub fn trader_label(id: OrderId) -> String {
    format!("Trader_{id}")
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TopRow {
    pub price: Price,
    pub quantity: Quantity,
    pub id: OrderId,
}

impl From<&Order> for TopRow {
    fn from(order: &Order) -> Self {
        Self {
            price: order.price,
            quantity: order.quantity,
            id: order.id,
        }
    }
}

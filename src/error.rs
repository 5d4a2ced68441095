use crate::models::{OrderId, Price};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidOrder {
    #[error("order {id}: price {price} is not a positive finite number")]
    NonPositivePrice { id: OrderId, price: Price },
    #[error("order {id}: quantity must be positive")]
    ZeroQuantity { id: OrderId },
    #[error("order {id} is already resting on the book")]
    DuplicateId { id: OrderId },
}

impl InvalidOrder {
    pub fn order_id(&self) -> OrderId {
        match *self {
            Self::NonPositivePrice { id, .. } | Self::ZeroQuantity { id } | Self::DuplicateId { id } => id,
        }
    }

    pub fn reason(&self) -> &'static str {
        match self {
            Self::NonPositivePrice { .. } => "price",
            Self::ZeroQuantity { .. } => "quantity",
            Self::DuplicateId { .. } => "duplicate",
        }
    }
}

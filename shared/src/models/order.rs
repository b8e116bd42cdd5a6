//! Order Model

use super::customer::{Customer, CustomerRecord};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Raised when a stored enum tag does not match any known variant.
///
/// Rows are only ever written with tags produced by `as_str`, so hitting
/// this on a read means schema drift or manual edits to the database.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} tag: {value}")]
pub struct UnknownTag {
    pub kind: &'static str,
    pub value: String,
}

/// Pizza size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PizzaType {
    Small,
    Large,
}

impl PizzaType {
    /// 转换为数据库存储的字符串
    pub fn as_str(&self) -> &'static str {
        match self {
            PizzaType::Small => "SMALL",
            PizzaType::Large => "LARGE",
        }
    }
}

impl FromStr for PizzaType {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SMALL" => Ok(PizzaType::Small),
            "LARGE" => Ok(PizzaType::Large),
            other => Err(UnknownTag {
                kind: "pizza type",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for PizzaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order lifecycle status
///
/// `Created` is the only active state; `Delivered` and `Cancelled` are
/// terminal (no transition is defined out of them).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Created,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// 转换为数据库存储的字符串
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Created => "CREATED",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }

    /// Terminal states carry a finish time and accept no further transition.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREATED" => Ok(OrderStatus::Created),
            "DELIVERED" => Ok(OrderStatus::Delivered),
            "CANCELLED" => Ok(OrderStatus::Cancelled),
            other => Err(UnknownTag {
                kind: "order status",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order entity reconstructed from a joined read
///
/// Always carries its customer; the reader never returns an order without
/// the joined customer fields populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub customer: Customer,
    pub pizza_type: PizzaType,
    pub status: OrderStatus,
    /// Epoch millis, set at creation, may be absent
    pub estimated_delivery_time: Option<i64>,
    /// Epoch millis, set when the order leaves the active lifecycle
    pub finish_time: Option<i64>,
}

/// Create order payload (no id yet)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCreate {
    pub customer: CustomerRecord,
    pub pizza_type: PizzaType,
    pub status: OrderStatus,
    pub estimated_delivery_time: Option<i64>,
}

impl OrderCreate {
    /// New order in `Created` with no finish time.
    pub fn new(customer: impl Into<CustomerRecord>, pizza_type: PizzaType) -> Self {
        Self {
            customer: customer.into(),
            pizza_type,
            status: OrderStatus::Created,
            estimated_delivery_time: None,
        }
    }

    pub fn with_estimated_delivery_time(mut self, millis: i64) -> Self {
        self.estimated_delivery_time = Some(millis);
        self
    }
}

/// Upsert input for the order writer.
///
/// Same convention as [`CustomerRecord`]: the variant picks the statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderRecord {
    New(OrderCreate),
    Saved(Order),
}

impl OrderRecord {
    pub fn id(&self) -> Option<i64> {
        match self {
            OrderRecord::New(_) => None,
            OrderRecord::Saved(o) => Some(o.id),
        }
    }

    /// The customer this order resolves to at write time.
    pub fn customer(&self) -> CustomerRecord {
        match self {
            OrderRecord::New(data) => data.customer.clone(),
            OrderRecord::Saved(order) => CustomerRecord::Saved(order.customer.clone()),
        }
    }

    pub fn status(&self) -> OrderStatus {
        match self {
            OrderRecord::New(data) => data.status,
            OrderRecord::Saved(order) => order.status,
        }
    }

    pub fn pizza_type(&self) -> PizzaType {
        match self {
            OrderRecord::New(data) => data.pizza_type,
            OrderRecord::Saved(order) => order.pizza_type,
        }
    }

    pub fn estimated_delivery_time(&self) -> Option<i64> {
        match self {
            OrderRecord::New(data) => data.estimated_delivery_time,
            OrderRecord::Saved(order) => order.estimated_delivery_time,
        }
    }

    pub fn finish_time(&self) -> Option<i64> {
        match self {
            OrderRecord::New(_) => None,
            OrderRecord::Saved(order) => order.finish_time,
        }
    }
}

impl From<OrderCreate> for OrderRecord {
    fn from(data: OrderCreate) -> Self {
        OrderRecord::New(data)
    }
}

impl From<Order> for OrderRecord {
    fn from(order: Order) -> Self {
        OrderRecord::Saved(order)
    }
}

/// Flat joined row (`order_t` JOIN `customer_t`)
///
/// One row per order; mapped to [`Order`] by the repository's single
/// row-mapping function.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderRow {
    pub order_id: i64,
    pub customer_id: i64,
    pub status: String,
    pub pizza_type: String,
    pub estimated_delivery_time: Option<i64>,
    pub finish_time: Option<i64>,
    pub name: String,
    pub email: String,
    pub address: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::customer::CustomerCreate;

    #[test]
    fn status_tags_round_trip() {
        for status in [
            OrderStatus::Created,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_tag_is_rejected() {
        let err = "SHIPPED".parse::<OrderStatus>().unwrap_err();
        assert_eq!(err.kind, "order status");
        assert_eq!(err.value, "SHIPPED");
    }

    #[test]
    fn pizza_type_tags_round_trip() {
        for pizza_type in [PizzaType::Small, PizzaType::Large] {
            assert_eq!(
                pizza_type.as_str().parse::<PizzaType>().unwrap(),
                pizza_type
            );
        }
    }

    #[test]
    fn serde_uses_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Delivered).unwrap(),
            "\"DELIVERED\""
        );
        assert_eq!(
            serde_json::to_string(&PizzaType::Large).unwrap(),
            "\"LARGE\""
        );
    }

    #[test]
    fn new_order_starts_created_without_finish_time() {
        let record: OrderRecord =
            OrderCreate::new(CustomerCreate::new("a", "b", "c"), PizzaType::Small).into();
        assert_eq!(record.id(), None);
        assert_eq!(record.status(), OrderStatus::Created);
        assert_eq!(record.finish_time(), None);
    }
}

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::orders::OrderEntity;
use crate::domain::value_objects::tickets::IssuedTicketDto;

pub const ORDER_NUMBER_PREFIX: &str = "ORD-";

/// Human-readable order number: fixed prefix plus six random digits.
/// Uniqueness is enforced by the caller with an existence-checked retry loop.
pub fn generate_order_number() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..6).map(|_| char::from(b'0' + rng.gen_range(0u8..10))).collect();
    format!("{}{}", ORDER_NUMBER_PREFIX, suffix)
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderItemModel {
    pub event_id: Uuid,
    pub ticket_type_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderModel {
    pub items: Vec<CreateOrderItemModel>,
    pub payment_method: String,
    pub billing_address: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub id: Uuid,
    pub order_number: String,
    pub total_amount_minor: i64,
    pub status: String,
    pub payment_method: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<OrderEntity> for OrderDto {
    fn from(entity: OrderEntity) -> Self {
        Self {
            id: entity.id,
            order_number: entity.order_number,
            total_amount_minor: entity.total_amount_minor,
            status: entity.status,
            payment_method: entity.payment_method,
            created_at: entity.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDto {
    pub event_id: Uuid,
    pub event_name: String,
    pub ticket_type_id: Uuid,
    pub quantity: i32,
    pub unit_price_minor: i32,
    pub total_price_minor: i32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderWithItemsDto {
    #[serde(flatten)]
    pub order: OrderDto,
    pub items: Vec<OrderItemDto>,
}

/// `POST /users/orders` response: the persisted order and every issued ticket.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreatedOrderDto {
    pub order: OrderDto,
    pub tickets: Vec<IssuedTicketDto>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_number_format() {
        for _ in 0..100 {
            let number = generate_order_number();
            let suffix = number.strip_prefix(ORDER_NUMBER_PREFIX).unwrap();
            assert_eq!(suffix.len(), 6);
            assert!(suffix.chars().all(|c| c.is_ascii_digit()));
        }
    }
}

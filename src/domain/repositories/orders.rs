use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::order_items::{InsertOrderItemEntity, OrderItemEntity};
use crate::domain::entities::orders::{InsertOrderEntity, OrderEntity};
use crate::domain::entities::tickets::{InsertTicketEntity, TicketEntity};

/// Result of the create-order transaction. Inventory is re-checked under a
/// row lock inside the transaction, so the usecase's earlier reads are
/// advisory only.
#[derive(Debug, Clone)]
pub enum CreateOrderOutcome {
    Created {
        order: OrderEntity,
        tickets: Vec<TicketEntity>,
    },
    InsufficientInventory {
        ticket_type_id: Uuid,
        requested: i32,
        available: i32,
    },
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository {
    /// Persists the order, its items, and every ticket atomically, or
    /// nothing at all.
    async fn create_order(
        &self,
        insert_order_entity: InsertOrderEntity,
        items: Vec<InsertOrderItemEntity>,
        tickets: Vec<InsertTicketEntity>,
    ) -> Result<CreateOrderOutcome>;
    async fn list_by_user(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<OrderEntity>, i64)>;
    async fn items_with_event_titles(
        &self,
        order_id: Uuid,
    ) -> Result<Vec<(OrderItemEntity, String)>>;
    async fn tickets_by_user(&self, user_id: Uuid) -> Result<Vec<TicketEntity>>;
}

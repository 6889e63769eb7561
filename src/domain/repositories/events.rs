use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::events::{EventEntity, InsertEventEntity};
use crate::domain::entities::ticket_types::{InsertTicketTypeEntity, TicketTypeEntity};
use crate::domain::value_objects::events::EventFilter;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository {
    async fn create_with_default_ticket_type(
        &self,
        insert_event_entity: InsertEventEntity,
        default_ticket_type: InsertTicketTypeEntity,
    ) -> Result<Uuid>;
    async fn list_public(
        &self,
        filter: EventFilter,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<EventEntity>, i64)>;
    async fn find_active_by_id(&self, event_id: Uuid) -> Result<Option<EventEntity>>;
    async fn find_owned_by(
        &self,
        event_id: Uuid,
        company_id: Uuid,
    ) -> Result<Option<EventEntity>>;
    async fn list_by_company(&self, company_id: Uuid) -> Result<Vec<EventEntity>>;
    async fn ticket_types_of(&self, event_id: Uuid) -> Result<Vec<TicketTypeEntity>>;
    async fn find_ticket_type(&self, ticket_type_id: Uuid) -> Result<Option<TicketTypeEntity>>;
    async fn add_ticket_type(
        &self,
        insert_ticket_type_entity: InsertTicketTypeEntity,
    ) -> Result<TicketTypeEntity>;
    /// Flips is_active and returns the new state, None when not owned.
    async fn toggle_active(&self, event_id: Uuid, company_id: Uuid) -> Result<Option<bool>>;
    async fn has_order_items(&self, event_id: Uuid) -> Result<bool>;
    async fn delete(&self, event_id: Uuid, company_id: Uuid) -> Result<bool>;
    async fn distinct_categories(&self) -> Result<Vec<String>>;
    async fn distinct_cities(&self) -> Result<Vec<String>>;
    async fn featured(&self, limit: i64) -> Result<Vec<EventEntity>>;
}

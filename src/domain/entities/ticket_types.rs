use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::ticket_types;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = ticket_types)]
pub struct TicketTypeEntity {
    pub id: Uuid,
    pub event_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price_minor: i32,
    pub quantity_available: i32,
    pub quantity_sold: i32,
    pub benefits: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = ticket_types)]
pub struct InsertTicketTypeEntity {
    pub id: Uuid,
    pub event_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price_minor: i32,
    pub quantity_available: i32,
    pub quantity_sold: i32,
    pub benefits: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

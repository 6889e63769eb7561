use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::tickets;

/// One unit of entry. Event name/venue/date and holder details are a
/// snapshot taken at issuance; later event edits never touch issued tickets.
#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = tickets)]
pub struct TicketEntity {
    pub id: Uuid,
    pub order_id: Uuid,
    pub event_id: Uuid,
    pub ticket_type_id: Uuid,
    pub ticket_number: String,
    pub qr_code: String,
    pub event_name: String,
    pub event_location: String,
    pub event_date: DateTime<Utc>,
    pub holder_name: Option<String>,
    pub holder_email: Option<String>,
    pub seat_number: Option<String>,
    pub section: Option<String>,
    pub status: String,
    pub used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tickets)]
pub struct InsertTicketEntity {
    pub id: Uuid,
    pub order_id: Uuid,
    pub event_id: Uuid,
    pub ticket_type_id: Uuid,
    pub ticket_number: String,
    pub qr_code: String,
    pub event_name: String,
    pub event_location: String,
    pub event_date: DateTime<Utc>,
    pub holder_name: Option<String>,
    pub holder_email: Option<String>,
    pub seat_number: Option<String>,
    pub section: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

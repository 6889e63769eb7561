use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::ticket_validations;

/// Append-only audit record of one validation attempt outcome.
#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = ticket_validations)]
pub struct TicketValidationEntity {
    pub id: Uuid,
    pub ticket_id: Uuid,
    pub validated_by: Uuid,
    pub validation_method: String,
    pub location: Option<String>,
    pub validated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = ticket_validations)]
pub struct InsertTicketValidationEntity {
    pub id: Uuid,
    pub ticket_id: Uuid,
    pub validated_by: Uuid,
    pub validation_method: String,
    pub location: Option<String>,
    pub validated_at: DateTime<Utc>,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::events::{EventEntity, InsertEventEntity};
use crate::domain::entities::ticket_types::{InsertTicketTypeEntity, TicketTypeEntity};

pub const DEFAULT_TICKET_TYPE_NAME: &str = "General";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventModel {
    pub title: String,
    pub description: Option<String>,
    pub event_date: DateTime<Utc>,
    pub venue: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub total_tickets: i32,
    pub base_price_minor: i32,
}

impl CreateEventModel {
    pub fn to_entity(&self, company_id: Uuid) -> InsertEventEntity {
        InsertEventEntity {
            id: Uuid::new_v4(),
            company_id,
            title: self.title.clone(),
            description: self.description.clone(),
            event_date: self.event_date,
            venue: self.venue.clone(),
            address: self.address.clone(),
            city: self.city.clone(),
            country: self.country.clone(),
            category: self.category.clone(),
            image_url: self.image_url.clone(),
            total_tickets: self.total_tickets,
            available_tickets: self.total_tickets,
            base_price_minor: self.base_price_minor,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    /// Every new event starts with a full-capacity general-admission tier.
    pub fn default_ticket_type(&self, event_id: Uuid) -> InsertTicketTypeEntity {
        InsertTicketTypeEntity {
            id: Uuid::new_v4(),
            event_id,
            name: DEFAULT_TICKET_TYPE_NAME.to_string(),
            description: None,
            price_minor: self.base_price_minor,
            quantity_available: self.total_tickets,
            quantity_sold: 0,
            benefits: None,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicketTypeModel {
    pub name: String,
    pub description: Option<String>,
    pub price_minor: i32,
    pub quantity_available: i32,
    pub benefits: Option<serde_json::Value>,
}

impl CreateTicketTypeModel {
    pub fn to_entity(&self, event_id: Uuid) -> InsertTicketTypeEntity {
        InsertTicketTypeEntity {
            id: Uuid::new_v4(),
            event_id,
            name: self.name.clone(),
            description: self.description.clone(),
            price_minor: self.price_minor,
            quantity_available: self.quantity_available,
            quantity_sold: 0,
            benefits: self.benefits.clone(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub category: Option<String>,
    pub city: Option<String>,
    pub search: Option<String>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TicketTypeDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price_minor: i32,
    pub quantity_available: i32,
    pub quantity_sold: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benefits: Option<serde_json::Value>,
}

impl From<TicketTypeEntity> for TicketTypeDto {
    fn from(entity: TicketTypeEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            price_minor: entity.price_minor,
            quantity_available: entity.quantity_available,
            quantity_sold: entity.quantity_sold,
            benefits: entity.benefits,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventCompanyDto {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventDto {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub event_date: DateTime<Utc>,
    pub venue: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub total_tickets: i32,
    pub available_tickets: i32,
    pub base_price_minor: i32,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ticket_types: Vec<TicketTypeDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<EventCompanyDto>,
}

impl EventDto {
    pub fn from_entity(entity: EventEntity, ticket_types: Vec<TicketTypeDto>) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            description: entity.description,
            event_date: entity.event_date,
            venue: entity.venue,
            address: entity.address,
            city: entity.city,
            country: entity.country,
            category: entity.category,
            image_url: entity.image_url,
            total_tickets: entity.total_tickets,
            available_tickets: entity.available_tickets,
            base_price_minor: entity.base_price_minor,
            is_active: entity.is_active,
            ticket_types,
            company: None,
        }
    }
}

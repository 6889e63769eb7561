use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::repositories::events::EventRepository;
use crate::domain::repositories::users::UserRepository;
use crate::domain::value_objects::events::{
    CreateEventModel, CreateTicketTypeModel, EventCompanyDto, EventDto, EventFilter,
    TicketTypeDto,
};
use crate::domain::value_objects::pagination::{PageQuery, Pagination};

const DEFAULT_EVENTS_PER_PAGE: i64 = 20;
const MAX_EVENTS_PER_PAGE: i64 = 20;
const FEATURED_EVENTS_LIMIT: i64 = 6;

#[derive(Debug, Error)]
pub enum EventError {
    #[error("{0}")]
    Validation(String),
    #[error("Event not found")]
    NotFound,
    #[error("Cannot delete event with existing orders")]
    HasOrders,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl EventError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            EventError::Validation(_) => StatusCode::BAD_REQUEST,
            EventError::NotFound => StatusCode::NOT_FOUND,
            EventError::HasOrders => StatusCode::CONFLICT,
            EventError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type EventResult<T> = std::result::Result<T, EventError>;

/// Raw list-endpoint query before the date strings are parsed.
#[derive(Debug, Clone, Default)]
pub struct EventListQuery {
    pub category: Option<String>,
    pub city: Option<String>,
    pub search: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

pub struct EventUseCase<E, U>
where
    E: EventRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    event_repo: Arc<E>,
    user_repo: Arc<U>,
}

impl<E, U> EventUseCase<E, U>
where
    E: EventRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    pub fn new(event_repo: Arc<E>, user_repo: Arc<U>) -> Self {
        Self {
            event_repo,
            user_repo,
        }
    }

    pub async fn list_events(
        &self,
        list_query: EventListQuery,
        page_query: PageQuery,
    ) -> EventResult<(Vec<EventDto>, Pagination)> {
        let filter = Self::build_filter(list_query)?;
        let (page, per_page) = page_query.resolve(DEFAULT_EVENTS_PER_PAGE, MAX_EVENTS_PER_PAGE);
        let offset = Pagination::offset(page, per_page);

        let (events, total) = self
            .event_repo
            .list_public(filter, per_page, offset)
            .await
            .map_err(|err| {
                error!(db_error = ?err, "events: failed to list events");
                EventError::Internal(err)
            })?;

        let mut result = Vec::with_capacity(events.len());
        for event in events {
            let ticket_types = self.load_ticket_types(event.id).await?;
            result.push(EventDto::from_entity(event, ticket_types));
        }

        Ok((result, Pagination::new(page, per_page, total)))
    }

    pub async fn get_event(&self, event_id: Uuid) -> EventResult<EventDto> {
        let event = self
            .event_repo
            .find_active_by_id(event_id)
            .await
            .map_err(|err| {
                error!(%event_id, db_error = ?err, "events: failed to load event");
                EventError::Internal(err)
            })?
            .ok_or(EventError::NotFound)?;

        let company_id = event.company_id;
        let ticket_types = self.load_ticket_types(event.id).await?;
        let mut dto = EventDto::from_entity(event, ticket_types);

        let company = self
            .user_repo
            .find_by_id(company_id)
            .await
            .map_err(|err| {
                error!(%company_id, db_error = ?err, "events: failed to load event company");
                EventError::Internal(err)
            })?;
        dto.company = company.map(|company| EventCompanyDto {
            id: company.id,
            name: company.company_name,
            email: company.email,
        });

        Ok(dto)
    }

    pub async fn create_event(
        &self,
        company_id: Uuid,
        create_event_model: CreateEventModel,
    ) -> EventResult<EventDto> {
        if create_event_model.title.trim().is_empty() {
            return Err(EventError::Validation("title is required".to_string()));
        }
        if create_event_model.venue.trim().is_empty() {
            return Err(EventError::Validation("venue is required".to_string()));
        }
        if create_event_model.total_tickets <= 0 {
            return Err(EventError::Validation(
                "totalTickets must be a positive number".to_string(),
            ));
        }
        if create_event_model.base_price_minor < 0 {
            return Err(EventError::Validation(
                "basePriceMinor must not be negative".to_string(),
            ));
        }
        if create_event_model.event_date <= Utc::now() {
            return Err(EventError::Validation(
                "eventDate must be in the future".to_string(),
            ));
        }

        let insert_event = create_event_model.to_entity(company_id);
        let default_ticket_type = create_event_model.default_ticket_type(insert_event.id);

        let event_id = self
            .event_repo
            .create_with_default_ticket_type(insert_event, default_ticket_type)
            .await
            .map_err(|err| {
                error!(%company_id, db_error = ?err, "events: failed to create event");
                EventError::Internal(err)
            })?;

        info!(%company_id, %event_id, "events: event created");
        self.get_event(event_id).await
    }

    pub async fn delete_event(&self, company_id: Uuid, event_id: Uuid) -> EventResult<()> {
        self.event_repo
            .find_owned_by(event_id, company_id)
            .await
            .map_err(|err| {
                error!(%event_id, db_error = ?err, "events: failed to load event for delete");
                EventError::Internal(err)
            })?
            .ok_or(EventError::NotFound)?;

        let has_orders = self
            .event_repo
            .has_order_items(event_id)
            .await
            .map_err(|err| {
                error!(%event_id, db_error = ?err, "events: failed to check event orders");
                EventError::Internal(err)
            })?;
        if has_orders {
            warn!(%company_id, %event_id, "events: refusing to delete event with orders");
            return Err(EventError::HasOrders);
        }

        let deleted = self
            .event_repo
            .delete(event_id, company_id)
            .await
            .map_err(|err| {
                error!(%event_id, db_error = ?err, "events: failed to delete event");
                EventError::Internal(err)
            })?;
        if !deleted {
            return Err(EventError::NotFound);
        }

        info!(%company_id, %event_id, "events: event deleted");
        Ok(())
    }

    pub async fn toggle_event_status(
        &self,
        company_id: Uuid,
        event_id: Uuid,
    ) -> EventResult<bool> {
        let is_active = self
            .event_repo
            .toggle_active(event_id, company_id)
            .await
            .map_err(|err| {
                error!(%event_id, db_error = ?err, "events: failed to toggle event status");
                EventError::Internal(err)
            })?
            .ok_or(EventError::NotFound)?;

        info!(%company_id, %event_id, is_active, "events: event status toggled");
        Ok(is_active)
    }

    pub async fn add_ticket_type(
        &self,
        company_id: Uuid,
        event_id: Uuid,
        create_ticket_type_model: CreateTicketTypeModel,
    ) -> EventResult<TicketTypeDto> {
        if create_ticket_type_model.name.trim().is_empty() {
            return Err(EventError::Validation("name is required".to_string()));
        }
        if create_ticket_type_model.price_minor < 0 {
            return Err(EventError::Validation(
                "priceMinor must not be negative".to_string(),
            ));
        }
        if create_ticket_type_model.quantity_available <= 0 {
            return Err(EventError::Validation(
                "quantityAvailable must be a positive number".to_string(),
            ));
        }

        self.event_repo
            .find_owned_by(event_id, company_id)
            .await
            .map_err(|err| {
                error!(%event_id, db_error = ?err, "events: failed to load event for ticket type");
                EventError::Internal(err)
            })?
            .ok_or(EventError::NotFound)?;

        let ticket_type = self
            .event_repo
            .add_ticket_type(create_ticket_type_model.to_entity(event_id))
            .await
            .map_err(|err| {
                error!(%event_id, db_error = ?err, "events: failed to add ticket type");
                EventError::Internal(err)
            })?;

        info!(%company_id, %event_id, ticket_type_id = %ticket_type.id, "events: ticket type added");
        Ok(TicketTypeDto::from(ticket_type))
    }

    pub async fn list_company_events(&self, company_id: Uuid) -> EventResult<Vec<EventDto>> {
        let events = self
            .event_repo
            .list_by_company(company_id)
            .await
            .map_err(|err| {
                error!(%company_id, db_error = ?err, "events: failed to list company events");
                EventError::Internal(err)
            })?;

        Ok(events
            .into_iter()
            .map(|event| EventDto::from_entity(event, vec![]))
            .collect())
    }

    pub async fn categories(&self) -> EventResult<Vec<String>> {
        self.event_repo.distinct_categories().await.map_err(|err| {
            error!(db_error = ?err, "events: failed to list categories");
            EventError::Internal(err)
        })
    }

    pub async fn cities(&self) -> EventResult<Vec<String>> {
        self.event_repo.distinct_cities().await.map_err(|err| {
            error!(db_error = ?err, "events: failed to list cities");
            EventError::Internal(err)
        })
    }

    pub async fn featured_events(&self) -> EventResult<Vec<EventDto>> {
        let events = self
            .event_repo
            .featured(FEATURED_EVENTS_LIMIT)
            .await
            .map_err(|err| {
                error!(db_error = ?err, "events: failed to list featured events");
                EventError::Internal(err)
            })?;

        Ok(events
            .into_iter()
            .map(|event| EventDto::from_entity(event, vec![]))
            .collect())
    }

    async fn load_ticket_types(&self, event_id: Uuid) -> EventResult<Vec<TicketTypeDto>> {
        let ticket_types = self
            .event_repo
            .ticket_types_of(event_id)
            .await
            .map_err(|err| {
                error!(%event_id, db_error = ?err, "events: failed to load ticket types");
                EventError::Internal(err)
            })?;
        Ok(ticket_types.into_iter().map(TicketTypeDto::from).collect())
    }

    fn build_filter(list_query: EventListQuery) -> EventResult<EventFilter> {
        let date_from = list_query
            .date_from
            .as_deref()
            .map(Self::parse_date)
            .transpose()
            .map_err(|_| EventError::Validation("Invalid date_from format".to_string()))?;
        let date_to = list_query
            .date_to
            .as_deref()
            .map(Self::parse_date)
            .transpose()
            .map_err(|_| EventError::Validation("Invalid date_to format".to_string()))?;

        Ok(EventFilter {
            category: list_query.category,
            city: list_query.city,
            search: list_query.search,
            date_from,
            date_to,
        })
    }

    fn parse_date(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        DateTime::parse_from_rfc3339(raw).map(|parsed| parsed.with_timezone(&Utc))
    }
}

#[cfg(test)]
mod tests;

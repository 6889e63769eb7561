use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use diesel::{Connection, PgConnection, insert_into, prelude::*, update};
use uuid::Uuid;

use crate::domain::entities::ticket_validations::InsertTicketValidationEntity;
use crate::domain::entities::tickets::TicketEntity;
use crate::domain::repositories::tickets::TicketRepository;
use crate::domain::value_objects::enums::ticket_statuses::TicketStatus;
use crate::domain::value_objects::enums::validation_methods::ValidationMethod;
use crate::domain::value_objects::tickets::{ValidatedTicketDto, ValidationOutcome};
use crate::infrastructure::postgres::{
    postgres_connection::PgPoolSquad,
    schema::{events, orders, ticket_validations, tickets},
};

pub struct TicketPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl TicketPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }

    /// One validation attempt inside an open transaction. Item-level
    /// rejections are outcomes, not errors, so a batch caller can keep its
    /// transaction alive across them.
    fn validate_in_tx(
        tx: &mut PgConnection,
        company_id: Uuid,
        ticket_number: &str,
        method: ValidationMethod,
        location: Option<&str>,
    ) -> Result<ValidationOutcome, diesel::result::Error> {
        let row: Option<(TicketEntity, Uuid)> = tickets::table
            .inner_join(events::table)
            .filter(tickets::ticket_number.eq(ticket_number))
            .select((TicketEntity::as_select(), events::company_id))
            .for_update()
            .first::<(TicketEntity, Uuid)>(tx)
            .optional()?;

        let Some((ticket, owner_id)) = row else {
            return Ok(ValidationOutcome::NotFound);
        };

        if owner_id != company_id {
            return Ok(ValidationOutcome::NotOwned);
        }

        match TicketStatus::from_str(&ticket.status) {
            Some(TicketStatus::Used) => Ok(ValidationOutcome::AlreadyUsed {
                ticket_number: ticket.ticket_number,
                used_at: ticket.used_at.unwrap_or(ticket.created_at),
            }),
            Some(TicketStatus::Cancelled) | None => Ok(ValidationOutcome::Cancelled {
                ticket_number: ticket.ticket_number,
            }),
            Some(TicketStatus::Valid) => {
                let now = Utc::now();

                update(tickets::table.find(ticket.id))
                    .set((
                        tickets::status.eq(TicketStatus::Used.to_string()),
                        tickets::used_at.eq(Some(now)),
                    ))
                    .execute(tx)?;

                insert_into(ticket_validations::table)
                    .values(&InsertTicketValidationEntity {
                        id: Uuid::new_v4(),
                        ticket_id: ticket.id,
                        validated_by: company_id,
                        validation_method: method.to_string(),
                        location: location.map(|value| value.to_string()),
                        validated_at: now,
                    })
                    .execute(tx)?;

                Ok(ValidationOutcome::Validated(ValidatedTicketDto {
                    ticket_number: ticket.ticket_number,
                    event_name: ticket.event_name,
                    holder_name: ticket.holder_name,
                    validated_at: now,
                    event_date: ticket.event_date,
                }))
            }
        }
    }
}

#[async_trait]
impl TicketRepository for TicketPostgres {
    async fn find_for_customer(
        &self,
        ticket_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<TicketEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = tickets::table
            .inner_join(orders::table)
            .filter(tickets::id.eq(ticket_id))
            .filter(orders::user_id.eq(user_id))
            .select(TicketEntity::as_select())
            .first::<TicketEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn find_for_company(
        &self,
        ticket_id: Uuid,
        company_id: Uuid,
    ) -> Result<Option<TicketEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = tickets::table
            .inner_join(events::table)
            .filter(tickets::id.eq(ticket_id))
            .filter(events::company_id.eq(company_id))
            .select(TicketEntity::as_select())
            .first::<TicketEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn validate_ticket(
        &self,
        company_id: Uuid,
        ticket_number: &str,
        method: ValidationMethod,
        location: Option<String>,
    ) -> Result<ValidationOutcome> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let outcome = conn.transaction::<ValidationOutcome, diesel::result::Error, _>(|tx| {
            Self::validate_in_tx(tx, company_id, ticket_number, method, location.as_deref())
        })?;

        Ok(outcome)
    }

    async fn batch_validate(
        &self,
        company_id: Uuid,
        ticket_numbers: Vec<String>,
        location: Option<String>,
    ) -> Result<Vec<ValidationOutcome>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let outcomes = conn.transaction::<Vec<ValidationOutcome>, diesel::result::Error, _>(|tx| {
            let mut outcomes = Vec::with_capacity(ticket_numbers.len());
            for ticket_number in &ticket_numbers {
                outcomes.push(Self::validate_in_tx(
                    tx,
                    company_id,
                    ticket_number,
                    ValidationMethod::QrScan,
                    location.as_deref(),
                )?);
            }
            Ok(outcomes)
        })?;

        Ok(outcomes)
    }
}

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::tickets::TicketEntity;
use crate::domain::value_objects::enums::validation_methods::ValidationMethod;
use crate::domain::value_objects::tickets::ValidationOutcome;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TicketRepository {
    async fn find_for_customer(
        &self,
        ticket_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<TicketEntity>>;
    async fn find_for_company(
        &self,
        ticket_id: Uuid,
        company_id: Uuid,
    ) -> Result<Option<TicketEntity>>;
    /// Resolve → tenant check → status check → mark used + audit row, all in
    /// one transaction.
    async fn validate_ticket(
        &self,
        company_id: Uuid,
        ticket_number: &str,
        method: ValidationMethod,
        location: Option<String>,
    ) -> Result<ValidationOutcome>;
    /// Evaluates every number independently inside one transaction; an
    /// item-level rejection never aborts the others. Outcomes come back in
    /// input order.
    async fn batch_validate(
        &self,
        company_id: Uuid,
        ticket_numbers: Vec<String>,
        location: Option<String>,
    ) -> Result<Vec<ValidationOutcome>>;
}

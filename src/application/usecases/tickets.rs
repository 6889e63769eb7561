use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::auth::AuthenticatedUser;
use crate::domain::repositories::tickets::TicketRepository;
use crate::domain::value_objects::enums::user_roles::UserRole;
use crate::domain::value_objects::enums::validation_methods::ValidationMethod;
use crate::domain::value_objects::tickets::{
    BatchItemDto, BatchSummaryDto, BatchValidateModel, BatchValidationDto, TicketDto,
    ValidateTicketModel, ValidatedTicketDto, ValidationOutcome, parse_ticket_identifier,
};

pub const MAX_BATCH_SIZE: usize = 50;

#[derive(Debug, Error)]
pub enum TicketError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("Ticket not found")]
    NotFound,
    #[error("Ticket already used")]
    AlreadyUsed {
        ticket_number: String,
        used_at: DateTime<Utc>,
    },
    #[error("Ticket is cancelled")]
    Cancelled { ticket_number: String },
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl TicketError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            TicketError::Validation(_) => StatusCode::BAD_REQUEST,
            TicketError::Forbidden(_) => StatusCode::FORBIDDEN,
            TicketError::NotFound => StatusCode::NOT_FOUND,
            TicketError::AlreadyUsed { .. } | TicketError::Cancelled { .. } => {
                StatusCode::CONFLICT
            }
            TicketError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type TicketResult<T> = std::result::Result<T, TicketError>;

pub struct TicketValidationUseCase<T>
where
    T: TicketRepository + Send + Sync + 'static,
{
    ticket_repo: Arc<T>,
}

impl<T> TicketValidationUseCase<T>
where
    T: TicketRepository + Send + Sync + 'static,
{
    pub fn new(ticket_repo: Arc<T>) -> Self {
        Self { ticket_repo }
    }

    /// Customers see tickets from their own orders; companies see tickets of
    /// their own events. Cross-tenant lookups read as missing.
    pub async fn get_ticket(
        &self,
        auth_user: &AuthenticatedUser,
        ticket_id: Uuid,
    ) -> TicketResult<TicketDto> {
        let ticket = match auth_user.role {
            UserRole::Company => self
                .ticket_repo
                .find_for_company(ticket_id, auth_user.user_id)
                .await,
            UserRole::Customer => self
                .ticket_repo
                .find_for_customer(ticket_id, auth_user.user_id)
                .await,
        }
        .map_err(|err| {
            error!(user_id = %auth_user.user_id, %ticket_id, db_error = ?err, "tickets: failed to load ticket");
            TicketError::Internal(err)
        })?
        .ok_or(TicketError::NotFound)?;

        Ok(TicketDto::from(ticket))
    }

    pub async fn validate_ticket(
        &self,
        auth_user: &AuthenticatedUser,
        validate_ticket_model: ValidateTicketModel,
    ) -> TicketResult<ValidatedTicketDto> {
        self.require_company(auth_user)?;

        let method = match validate_ticket_model.validation_method.as_deref() {
            None => ValidationMethod::QrScan,
            Some(raw) => ValidationMethod::from_str(raw).ok_or_else(|| {
                TicketError::Validation(format!("Unknown validation method: {}", raw))
            })?,
        };

        let ticket_number = parse_ticket_identifier(&validate_ticket_model.qr_code)
            .ok_or_else(|| TicketError::Validation("Invalid QR code format".to_string()))?;

        let outcome = self
            .ticket_repo
            .validate_ticket(
                auth_user.user_id,
                &ticket_number,
                method,
                validate_ticket_model.location.clone(),
            )
            .await
            .map_err(|err| {
                error!(
                    company_id = %auth_user.user_id,
                    %ticket_number,
                    db_error = ?err,
                    "tickets: validation transaction failed"
                );
                TicketError::Internal(err)
            })?;

        match outcome {
            ValidationOutcome::Validated(validated) => {
                info!(
                    company_id = %auth_user.user_id,
                    ticket_number = %validated.ticket_number,
                    method = %method,
                    "tickets: ticket validated"
                );
                Ok(validated)
            }
            ValidationOutcome::NotFound => Err(TicketError::NotFound),
            ValidationOutcome::NotOwned => {
                warn!(
                    company_id = %auth_user.user_id,
                    %ticket_number,
                    "tickets: cross-tenant validation attempt"
                );
                Err(TicketError::Forbidden(
                    "You can only validate tickets for your events".to_string(),
                ))
            }
            ValidationOutcome::AlreadyUsed {
                ticket_number,
                used_at,
            } => {
                warn!(
                    company_id = %auth_user.user_id,
                    %ticket_number,
                    %used_at,
                    "tickets: repeat validation rejected"
                );
                Err(TicketError::AlreadyUsed {
                    ticket_number,
                    used_at,
                })
            }
            ValidationOutcome::Cancelled { ticket_number } => {
                Err(TicketError::Cancelled { ticket_number })
            }
        }
    }

    /// Validates up to [`MAX_BATCH_SIZE`] identifiers in one call. The cap is
    /// enforced before anything is resolved; inside the batch each item
    /// stands alone.
    pub async fn batch_validate(
        &self,
        auth_user: &AuthenticatedUser,
        batch_validate_model: BatchValidateModel,
    ) -> TicketResult<BatchValidationDto> {
        self.require_company(auth_user)?;

        let count = batch_validate_model.qr_codes.len();
        if count == 0 || count > MAX_BATCH_SIZE {
            return Err(TicketError::Validation(format!(
                "Provide 1-{} QR codes for validation",
                MAX_BATCH_SIZE
            )));
        }

        let parsed: Vec<(String, Option<String>)> = batch_validate_model
            .qr_codes
            .iter()
            .map(|raw| (raw.clone(), parse_ticket_identifier(raw)))
            .collect();

        let ticket_numbers: Vec<String> = parsed
            .iter()
            .filter_map(|(_, number)| number.clone())
            .collect();

        let mut outcomes = self
            .ticket_repo
            .batch_validate(
                auth_user.user_id,
                ticket_numbers,
                batch_validate_model.location.clone(),
            )
            .await
            .map_err(|err| {
                error!(
                    company_id = %auth_user.user_id,
                    db_error = ?err,
                    "tickets: batch validation transaction failed"
                );
                TicketError::Internal(err)
            })?
            .into_iter();

        let mut results = Vec::with_capacity(count);
        for (raw, number) in parsed {
            let item = match number {
                None => BatchItemDto {
                    qr_code: raw,
                    success: false,
                    ticket_number: None,
                    event_name: None,
                    holder_name: None,
                    error: Some("Invalid QR code format".to_string()),
                },
                Some(_) => match outcomes.next() {
                    Some(ValidationOutcome::Validated(validated)) => BatchItemDto {
                        qr_code: raw,
                        success: true,
                        ticket_number: Some(validated.ticket_number),
                        event_name: Some(validated.event_name),
                        holder_name: validated.holder_name,
                        error: None,
                    },
                    Some(ValidationOutcome::NotFound) => BatchItemDto {
                        qr_code: raw,
                        success: false,
                        ticket_number: None,
                        event_name: None,
                        holder_name: None,
                        error: Some("Ticket not found".to_string()),
                    },
                    Some(ValidationOutcome::NotOwned) => BatchItemDto {
                        qr_code: raw,
                        success: false,
                        ticket_number: None,
                        event_name: None,
                        holder_name: None,
                        error: Some("Not your event".to_string()),
                    },
                    Some(ValidationOutcome::AlreadyUsed { ticket_number, .. }) => BatchItemDto {
                        qr_code: raw,
                        success: false,
                        ticket_number: Some(ticket_number),
                        event_name: None,
                        holder_name: None,
                        error: Some("Already used".to_string()),
                    },
                    Some(ValidationOutcome::Cancelled { ticket_number }) => BatchItemDto {
                        qr_code: raw,
                        success: false,
                        ticket_number: Some(ticket_number),
                        event_name: None,
                        holder_name: None,
                        error: Some("Ticket is cancelled".to_string()),
                    },
                    None => BatchItemDto {
                        qr_code: raw,
                        success: false,
                        ticket_number: None,
                        event_name: None,
                        holder_name: None,
                        error: Some("Validation failed".to_string()),
                    },
                },
            };
            results.push(item);
        }

        let successful = results.iter().filter(|item| item.success).count();
        let failed = results.len() - successful;
        info!(
            company_id = %auth_user.user_id,
            total = results.len(),
            successful,
            failed,
            "tickets: batch validation completed"
        );

        Ok(BatchValidationDto {
            summary: BatchSummaryDto {
                total: results.len(),
                successful,
                failed,
            },
            results,
        })
    }

    fn require_company(&self, auth_user: &AuthenticatedUser) -> TicketResult<()> {
        match auth_user.role {
            UserRole::Company => Ok(()),
            UserRole::Customer => Err(TicketError::Forbidden(
                "Only companies can validate tickets".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests;

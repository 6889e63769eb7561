use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;
use uuid::Uuid;

use crate::application::usecases::tickets::{TicketError, TicketValidationUseCase};
use crate::auth::AuthenticatedUser;
use crate::domain::repositories::tickets::TicketRepository;
use crate::domain::value_objects::tickets::{BatchValidateModel, ValidateTicketModel};
use crate::infrastructure::axum_http::error_responses::error_response;
use crate::infrastructure::postgres::postgres_connection::PgPoolSquad;
use crate::infrastructure::postgres::repositories::tickets::TicketPostgres;

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let ticket_repository = TicketPostgres::new(Arc::clone(&db_pool));
    let usecase = TicketValidationUseCase::new(Arc::new(ticket_repository));

    Router::new()
        .route("/:ticket_id", get(get_ticket))
        .route("/validate", post(validate_ticket))
        .route("/batch-validate", post(batch_validate))
        .with_state(Arc::new(usecase))
}

pub async fn get_ticket<T>(
    State(usecase): State<Arc<TicketValidationUseCase<T>>>,
    auth_user: AuthenticatedUser,
    Path(ticket_id): Path<Uuid>,
) -> impl IntoResponse
where
    T: TicketRepository + Send + Sync + 'static,
{
    match usecase.get_ticket(&auth_user, ticket_id).await {
        Ok(ticket) => Json(json!({"ticket": ticket})).into_response(),
        Err(err) => error_response(err.status_code(), &err),
    }
}

pub async fn validate_ticket<T>(
    State(usecase): State<Arc<TicketValidationUseCase<T>>>,
    auth_user: AuthenticatedUser,
    Json(validate_ticket_model): Json<ValidateTicketModel>,
) -> impl IntoResponse
where
    T: TicketRepository + Send + Sync + 'static,
{
    match usecase.validate_ticket(&auth_user, validate_ticket_model).await {
        Ok(validated) => Json(json!({
            "message": "Ticket validated successfully",
            "ticket": validated,
        }))
        .into_response(),
        // The conflict body carries the evidence: which ticket, and when it
        // was first used.
        Err(TicketError::AlreadyUsed {
            ticket_number,
            used_at,
        }) => (
            StatusCode::CONFLICT,
            Json(json!({
                "code": StatusCode::CONFLICT.as_u16(),
                "message": "Ticket already used",
                "ticketNumber": ticket_number,
                "usedAt": used_at,
            })),
        )
            .into_response(),
        Err(TicketError::Cancelled { ticket_number }) => (
            StatusCode::CONFLICT,
            Json(json!({
                "code": StatusCode::CONFLICT.as_u16(),
                "message": "Ticket is cancelled",
                "ticketNumber": ticket_number,
            })),
        )
            .into_response(),
        Err(err) => error_response(err.status_code(), &err),
    }
}

pub async fn batch_validate<T>(
    State(usecase): State<Arc<TicketValidationUseCase<T>>>,
    auth_user: AuthenticatedUser,
    Json(batch_validate_model): Json<BatchValidateModel>,
) -> impl IntoResponse
where
    T: TicketRepository + Send + Sync + 'static,
{
    match usecase.batch_validate(&auth_user, batch_validate_model).await {
        Ok(batch) => Json(json!({
            "message": format!(
                "Batch validation completed: {} successful, {} failed",
                batch.summary.successful, batch.summary.failed
            ),
            "results": batch.results,
            "summary": batch.summary,
        }))
        .into_response(),
        Err(err) => error_response(err.status_code(), &err),
    }
}

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::application::usecases::events::{EventListQuery, EventUseCase};
use crate::auth::AuthenticatedUser;
use crate::domain::repositories::events::EventRepository;
use crate::domain::repositories::users::UserRepository;
use crate::domain::value_objects::enums::user_roles::UserRole;
use crate::domain::value_objects::events::{CreateEventModel, CreateTicketTypeModel};
use crate::domain::value_objects::pagination::PageQuery;
use crate::infrastructure::axum_http::error_responses::error_response;
use crate::infrastructure::postgres::postgres_connection::PgPoolSquad;
use crate::infrastructure::postgres::repositories::{events::EventPostgres, users::UserPostgres};

#[derive(Debug, Deserialize)]
pub struct EventsQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub category: Option<String>,
    pub city: Option<String>,
    pub search: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let event_repository = EventPostgres::new(Arc::clone(&db_pool));
    let user_repository = UserPostgres::new(Arc::clone(&db_pool));
    let usecase = EventUseCase::new(Arc::new(event_repository), Arc::new(user_repository));

    Router::new()
        .route("/", get(list_events).post(create_event))
        .route("/categories", get(categories))
        .route("/cities", get(cities))
        .route("/featured", get(featured_events))
        .route("/:event_id", get(get_event).delete(delete_event))
        .route("/:event_id/status", patch(toggle_event_status))
        .route("/:event_id/ticket-types", post(add_ticket_type))
        .with_state(Arc::new(usecase))
}

pub async fn list_events<E, U>(
    State(usecase): State<Arc<EventUseCase<E, U>>>,
    Query(query): Query<EventsQuery>,
) -> impl IntoResponse
where
    E: EventRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let page_query = PageQuery {
        page: query.page,
        per_page: query.per_page,
    };
    let list_query = EventListQuery {
        category: query.category,
        city: query.city,
        search: query.search,
        date_from: query.date_from,
        date_to: query.date_to,
    };

    match usecase.list_events(list_query, page_query).await {
        Ok((events, pagination)) => {
            Json(json!({"events": events, "pagination": pagination})).into_response()
        }
        Err(err) => error_response(err.status_code(), &err),
    }
}

pub async fn get_event<E, U>(
    State(usecase): State<Arc<EventUseCase<E, U>>>,
    Path(event_id): Path<Uuid>,
) -> impl IntoResponse
where
    E: EventRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    match usecase.get_event(event_id).await {
        Ok(event) => Json(json!({"event": event})).into_response(),
        Err(err) => error_response(err.status_code(), &err),
    }
}

pub async fn create_event<E, U>(
    State(usecase): State<Arc<EventUseCase<E, U>>>,
    auth_user: AuthenticatedUser,
    Json(create_event_model): Json<CreateEventModel>,
) -> impl IntoResponse
where
    E: EventRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    match auth_user.role {
        UserRole::Company => {}
        UserRole::Customer => {
            return error_response(StatusCode::FORBIDDEN, &"Company access required");
        }
    }

    match usecase.create_event(auth_user.user_id, create_event_model).await {
        Ok(event) => (StatusCode::CREATED, Json(json!({"event": event}))).into_response(),
        Err(err) => error_response(err.status_code(), &err),
    }
}

pub async fn delete_event<E, U>(
    State(usecase): State<Arc<EventUseCase<E, U>>>,
    auth_user: AuthenticatedUser,
    Path(event_id): Path<Uuid>,
) -> impl IntoResponse
where
    E: EventRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    match auth_user.role {
        UserRole::Company => {}
        UserRole::Customer => {
            return error_response(StatusCode::FORBIDDEN, &"Company access required");
        }
    }

    match usecase.delete_event(auth_user.user_id, event_id).await {
        Ok(()) => Json(json!({"message": "Event deleted successfully"})).into_response(),
        Err(err) => error_response(err.status_code(), &err),
    }
}

pub async fn toggle_event_status<E, U>(
    State(usecase): State<Arc<EventUseCase<E, U>>>,
    auth_user: AuthenticatedUser,
    Path(event_id): Path<Uuid>,
) -> impl IntoResponse
where
    E: EventRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    match auth_user.role {
        UserRole::Company => {}
        UserRole::Customer => {
            return error_response(StatusCode::FORBIDDEN, &"Company access required");
        }
    }

    match usecase.toggle_event_status(auth_user.user_id, event_id).await {
        Ok(is_active) => Json(json!({"isActive": is_active})).into_response(),
        Err(err) => error_response(err.status_code(), &err),
    }
}

pub async fn add_ticket_type<E, U>(
    State(usecase): State<Arc<EventUseCase<E, U>>>,
    auth_user: AuthenticatedUser,
    Path(event_id): Path<Uuid>,
    Json(create_ticket_type_model): Json<CreateTicketTypeModel>,
) -> impl IntoResponse
where
    E: EventRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    match auth_user.role {
        UserRole::Company => {}
        UserRole::Customer => {
            return error_response(StatusCode::FORBIDDEN, &"Company access required");
        }
    }

    match usecase
        .add_ticket_type(auth_user.user_id, event_id, create_ticket_type_model)
        .await
    {
        Ok(ticket_type) => {
            (StatusCode::CREATED, Json(json!({"ticketType": ticket_type}))).into_response()
        }
        Err(err) => error_response(err.status_code(), &err),
    }
}

pub async fn categories<E, U>(
    State(usecase): State<Arc<EventUseCase<E, U>>>,
) -> impl IntoResponse
where
    E: EventRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    match usecase.categories().await {
        Ok(categories) => Json(json!({"categories": categories})).into_response(),
        Err(err) => error_response(err.status_code(), &err),
    }
}

pub async fn cities<E, U>(State(usecase): State<Arc<EventUseCase<E, U>>>) -> impl IntoResponse
where
    E: EventRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    match usecase.cities().await {
        Ok(cities) => Json(json!({"cities": cities})).into_response(),
        Err(err) => error_response(err.status_code(), &err),
    }
}

pub async fn featured_events<E, U>(
    State(usecase): State<Arc<EventUseCase<E, U>>>,
) -> impl IntoResponse
where
    E: EventRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    match usecase.featured_events().await {
        Ok(events) => Json(json!({"featuredEvents": events})).into_response(),
        Err(err) => error_response(err.status_code(), &err),
    }
}

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::application::usecases::events::EventUseCase;
use crate::application::usecases::reporting::ReportingUseCase;
use crate::auth::AuthenticatedUser;
use crate::domain::repositories::events::EventRepository;
use crate::domain::repositories::reporting::ReportingRepository;
use crate::domain::repositories::users::UserRepository;
use crate::domain::value_objects::enums::user_roles::UserRole;
use crate::domain::value_objects::pagination::PageQuery;
use crate::domain::value_objects::reporting::AnalyticsPeriod;
use crate::infrastructure::axum_http::error_responses::error_response;
use crate::infrastructure::postgres::postgres_connection::PgPoolSquad;
use crate::infrastructure::postgres::repositories::{
    events::EventPostgres, reporting::ReportingPostgres, users::UserPostgres,
};

#[derive(Debug, Deserialize)]
pub struct AnalyticsQuery {
    pub period: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CustomersQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub event_id: Option<Uuid>,
}

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let event_usecase = EventUseCase::new(
        Arc::new(EventPostgres::new(Arc::clone(&db_pool))),
        Arc::new(UserPostgres::new(Arc::clone(&db_pool))),
    );

    let reporting_usecase = ReportingUseCase::new(
        Arc::new(ReportingPostgres::new(Arc::clone(&db_pool))),
        Arc::new(EventPostgres::new(Arc::clone(&db_pool))),
    );

    let event_routes = Router::new()
        .route("/events", get(list_company_events))
        .with_state(Arc::new(event_usecase));

    let reporting_routes = Router::new()
        .route("/dashboard", get(dashboard))
        .route("/analytics", get(analytics))
        .route("/customers", get(customers))
        .route("/events/:event_id/attendees", get(attendees))
        .with_state(Arc::new(reporting_usecase));

    event_routes.merge(reporting_routes)
}

fn require_company(auth_user: &AuthenticatedUser) -> Result<(), axum::response::Response> {
    match auth_user.role {
        UserRole::Company => Ok(()),
        UserRole::Customer => Err(error_response(
            StatusCode::FORBIDDEN,
            &"Company access required",
        )),
    }
}

pub async fn list_company_events<E, U>(
    State(usecase): State<Arc<EventUseCase<E, U>>>,
    auth_user: AuthenticatedUser,
) -> impl IntoResponse
where
    E: EventRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    if let Err(response) = require_company(&auth_user) {
        return response;
    }

    match usecase.list_company_events(auth_user.user_id).await {
        Ok(events) => Json(json!({"events": events})).into_response(),
        Err(err) => error_response(err.status_code(), &err),
    }
}

pub async fn dashboard<R, E>(
    State(usecase): State<Arc<ReportingUseCase<R, E>>>,
    auth_user: AuthenticatedUser,
) -> impl IntoResponse
where
    R: ReportingRepository + Send + Sync + 'static,
    E: EventRepository + Send + Sync + 'static,
{
    if let Err(response) = require_company(&auth_user) {
        return response;
    }

    match usecase.dashboard(auth_user.user_id).await {
        Ok(dashboard) => Json(json!({"dashboard": dashboard})).into_response(),
        Err(err) => error_response(err.status_code(), &err),
    }
}

pub async fn analytics<R, E>(
    State(usecase): State<Arc<ReportingUseCase<R, E>>>,
    auth_user: AuthenticatedUser,
    Query(query): Query<AnalyticsQuery>,
) -> impl IntoResponse
where
    R: ReportingRepository + Send + Sync + 'static,
    E: EventRepository + Send + Sync + 'static,
{
    if let Err(response) = require_company(&auth_user) {
        return response;
    }

    let period = AnalyticsPeriod::from_str_or_default(query.period.as_deref().unwrap_or(""));
    match usecase.analytics(auth_user.user_id, period).await {
        Ok(analytics) => Json(json!({"analytics": analytics})).into_response(),
        Err(err) => error_response(err.status_code(), &err),
    }
}

pub async fn customers<R, E>(
    State(usecase): State<Arc<ReportingUseCase<R, E>>>,
    auth_user: AuthenticatedUser,
    Query(query): Query<CustomersQuery>,
) -> impl IntoResponse
where
    R: ReportingRepository + Send + Sync + 'static,
    E: EventRepository + Send + Sync + 'static,
{
    if let Err(response) = require_company(&auth_user) {
        return response;
    }

    let page_query = PageQuery {
        page: query.page,
        per_page: query.per_page,
    };
    match usecase
        .customers(auth_user.user_id, query.event_id, page_query)
        .await
    {
        Ok((customers, pagination)) => {
            Json(json!({"customers": customers, "pagination": pagination})).into_response()
        }
        Err(err) => error_response(err.status_code(), &err),
    }
}

pub async fn attendees<R, E>(
    State(usecase): State<Arc<ReportingUseCase<R, E>>>,
    auth_user: AuthenticatedUser,
    Path(event_id): Path<Uuid>,
    Query(page_query): Query<PageQuery>,
) -> impl IntoResponse
where
    R: ReportingRepository + Send + Sync + 'static,
    E: EventRepository + Send + Sync + 'static,
{
    if let Err(response) = require_company(&auth_user) {
        return response;
    }

    match usecase
        .attendees(auth_user.user_id, event_id, page_query)
        .await
    {
        Ok((attendees, pagination, event_info)) => Json(json!({
            "attendees": attendees,
            "pagination": pagination,
            "eventInfo": event_info,
        }))
        .into_response(),
        Err(err) => error_response(err.status_code(), &err),
    }
}

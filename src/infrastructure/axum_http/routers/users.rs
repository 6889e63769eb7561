use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde_json::json;
use uuid::Uuid;

use crate::application::usecases::auth::AuthUseCase;
use crate::application::usecases::orders::OrderUseCase;
use crate::application::usecases::payment_methods::PaymentMethodUseCase;
use crate::auth::AuthenticatedUser;
use crate::config::{config_loader, config_model::DotEnvyConfig};
use crate::domain::repositories::events::EventRepository;
use crate::domain::repositories::orders::OrderRepository;
use crate::domain::repositories::payment_methods::PaymentMethodRepository;
use crate::domain::repositories::sessions::SessionRepository;
use crate::domain::repositories::users::UserRepository;
use crate::domain::value_objects::orders::CreateOrderModel;
use crate::domain::value_objects::pagination::PageQuery;
use crate::domain::value_objects::payment_methods::{
    CreatePaymentMethodModel, UpdatePaymentMethodModel,
};
use crate::infrastructure::axum_http::error_responses::error_response;
use crate::infrastructure::axum_http::routers::auth::{get_profile, update_profile};
use crate::infrastructure::postgres::postgres_connection::PgPoolSquad;
use crate::infrastructure::postgres::repositories::{
    events::EventPostgres, orders::OrderPostgres, payment_methods::PaymentMethodPostgres,
    sessions::SessionPostgres, users::UserPostgres,
};

pub fn routes(db_pool: Arc<PgPoolSquad>, config: Arc<DotEnvyConfig>) -> Router {
    let secrets =
        config_loader::get_user_secret().expect("JWT user secrets are not configured");

    let auth_usecase = AuthUseCase::new(
        Arc::new(UserPostgres::new(Arc::clone(&db_pool))),
        Arc::new(SessionPostgres::new(Arc::clone(&db_pool))),
        secrets,
        config.token.clone(),
    );

    let order_usecase = OrderUseCase::new(
        Arc::new(OrderPostgres::new(Arc::clone(&db_pool))),
        Arc::new(EventPostgres::new(Arc::clone(&db_pool))),
        Arc::new(UserPostgres::new(Arc::clone(&db_pool))),
    );

    let payment_method_usecase = PaymentMethodUseCase::new(Arc::new(PaymentMethodPostgres::new(
        Arc::clone(&db_pool),
    )));

    let profile_routes = Router::new()
        .route("/profile", get(get_profile).put(update_profile))
        .with_state(Arc::new(auth_usecase))
        .route("/upload-avatar", axum::routing::post(upload_avatar));

    let order_routes = Router::new()
        .route("/orders", get(list_orders).post(create_order))
        .route("/tickets", get(list_tickets))
        .with_state(Arc::new(order_usecase));

    let payment_method_routes = Router::new()
        .route(
            "/payment-methods",
            get(list_payment_methods).post(add_payment_method),
        )
        .route(
            "/payment-methods/:payment_method_id",
            axum::routing::put(update_payment_method).delete(delete_payment_method),
        )
        .with_state(Arc::new(payment_method_usecase));

    profile_routes.merge(order_routes).merge(payment_method_routes)
}

// Placeholder until an object-storage integration lands.
pub async fn upload_avatar(_auth_user: AuthenticatedUser) -> impl IntoResponse {
    (
        StatusCode::NOT_IMPLEMENTED,
        Json(json!({"message": "Avatar upload is not implemented"})),
    )
        .into_response()
}

pub async fn create_order<O, E, U>(
    State(usecase): State<Arc<OrderUseCase<O, E, U>>>,
    auth_user: AuthenticatedUser,
    Json(create_order_model): Json<CreateOrderModel>,
) -> impl IntoResponse
where
    O: OrderRepository + Send + Sync + 'static,
    E: EventRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    match usecase.create_order(auth_user.user_id, create_order_model).await {
        Ok(created) => (StatusCode::CREATED, Json(created)).into_response(),
        Err(err) => error_response(err.status_code(), &err),
    }
}

pub async fn list_orders<O, E, U>(
    State(usecase): State<Arc<OrderUseCase<O, E, U>>>,
    auth_user: AuthenticatedUser,
    Query(page_query): Query<PageQuery>,
) -> impl IntoResponse
where
    O: OrderRepository + Send + Sync + 'static,
    E: EventRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    match usecase.list_orders(auth_user.user_id, page_query).await {
        Ok((orders, pagination)) => {
            Json(json!({"orders": orders, "pagination": pagination})).into_response()
        }
        Err(err) => error_response(err.status_code(), &err),
    }
}

pub async fn list_tickets<O, E, U>(
    State(usecase): State<Arc<OrderUseCase<O, E, U>>>,
    auth_user: AuthenticatedUser,
) -> impl IntoResponse
where
    O: OrderRepository + Send + Sync + 'static,
    E: EventRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    match usecase.list_tickets(auth_user.user_id).await {
        Ok(tickets) => {
            let total = tickets.len();
            Json(json!({"tickets": tickets, "total": total})).into_response()
        }
        Err(err) => error_response(err.status_code(), &err),
    }
}

pub async fn list_payment_methods<P>(
    State(usecase): State<Arc<PaymentMethodUseCase<P>>>,
    auth_user: AuthenticatedUser,
) -> impl IntoResponse
where
    P: PaymentMethodRepository + Send + Sync + 'static,
{
    match usecase.list(auth_user.user_id).await {
        Ok(methods) => Json(json!({"paymentMethods": methods})).into_response(),
        Err(err) => error_response(err.status_code(), &err),
    }
}

pub async fn add_payment_method<P>(
    State(usecase): State<Arc<PaymentMethodUseCase<P>>>,
    auth_user: AuthenticatedUser,
    Json(create_payment_method_model): Json<CreatePaymentMethodModel>,
) -> impl IntoResponse
where
    P: PaymentMethodRepository + Send + Sync + 'static,
{
    match usecase
        .add(auth_user.user_id, create_payment_method_model)
        .await
    {
        Ok(method) => {
            (StatusCode::CREATED, Json(json!({"paymentMethod": method}))).into_response()
        }
        Err(err) => error_response(err.status_code(), &err),
    }
}

pub async fn update_payment_method<P>(
    State(usecase): State<Arc<PaymentMethodUseCase<P>>>,
    auth_user: AuthenticatedUser,
    Path(payment_method_id): Path<Uuid>,
    Json(update_payment_method_model): Json<UpdatePaymentMethodModel>,
) -> impl IntoResponse
where
    P: PaymentMethodRepository + Send + Sync + 'static,
{
    match usecase
        .update(auth_user.user_id, payment_method_id, update_payment_method_model)
        .await
    {
        Ok(()) => Json(json!({"message": "Payment method updated successfully"})).into_response(),
        Err(err) => error_response(err.status_code(), &err),
    }
}

pub async fn delete_payment_method<P>(
    State(usecase): State<Arc<PaymentMethodUseCase<P>>>,
    auth_user: AuthenticatedUser,
    Path(payment_method_id): Path<Uuid>,
) -> impl IntoResponse
where
    P: PaymentMethodRepository + Send + Sync + 'static,
{
    match usecase.delete(auth_user.user_id, payment_method_id).await {
        Ok(()) => Json(json!({"message": "Payment method deleted successfully"})).into_response(),
        Err(err) => error_response(err.status_code(), &err),
    }
}

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{ConnectInfo, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;

use crate::application::usecases::auth::{AuthUseCase, ClientMeta};
use crate::auth::AuthenticatedUser;
use crate::config::{config_loader, config_model::DotEnvyConfig};
use crate::domain::repositories::sessions::SessionRepository;
use crate::domain::repositories::users::UserRepository;
use crate::domain::value_objects::auth::{LogoutModel, RefreshTokenModel};
use crate::domain::value_objects::users::{
    ChangePasswordModel, LoginModel, RegisterUserModel, UpdateProfileModel,
};
use crate::infrastructure::axum_http::error_responses::error_response;
use crate::infrastructure::postgres::postgres_connection::PgPoolSquad;
use crate::infrastructure::postgres::repositories::{
    sessions::SessionPostgres, users::UserPostgres,
};

pub fn routes(db_pool: Arc<PgPoolSquad>, config: Arc<DotEnvyConfig>) -> Router {
    let secrets =
        config_loader::get_user_secret().expect("JWT user secrets are not configured");

    let user_repository = UserPostgres::new(Arc::clone(&db_pool));
    let session_repository = SessionPostgres::new(Arc::clone(&db_pool));
    let usecase = AuthUseCase::new(
        Arc::new(user_repository),
        Arc::new(session_repository),
        secrets,
        config.token.clone(),
    );

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/refresh-token", post(refresh_token))
        .route("/me", get(me))
        .route("/verify-email", post(verify_email))
        .route("/change-password", post(change_password))
        .with_state(Arc::new(usecase))
}

fn client_meta(headers: &HeaderMap, addr: SocketAddr) -> ClientMeta {
    ClientMeta {
        device_info: headers
            .get(header::USER_AGENT)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string()),
        ip_address: Some(addr.ip().to_string()),
    }
}

pub async fn register<U, S>(
    State(usecase): State<Arc<AuthUseCase<U, S>>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(register_user_model): Json<RegisterUserModel>,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    match usecase
        .register(register_user_model, client_meta(&headers, addr))
        .await
    {
        Ok(result) => (StatusCode::CREATED, Json(result)).into_response(),
        Err(err) => error_response(err.status_code(), &err),
    }
}

pub async fn login<U, S>(
    State(usecase): State<Arc<AuthUseCase<U, S>>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(login_model): Json<LoginModel>,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    match usecase.login(login_model, client_meta(&headers, addr)).await {
        Ok(result) => Json(result).into_response(),
        Err(err) => error_response(err.status_code(), &err),
    }
}

pub async fn logout<U, S>(
    State(usecase): State<Arc<AuthUseCase<U, S>>>,
    _auth_user: AuthenticatedUser,
    Json(logout_model): Json<LogoutModel>,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    match usecase.logout(logout_model.refresh_token.as_deref()).await {
        Ok(_) => Json(json!({"message": "Logout successful"})).into_response(),
        Err(err) => error_response(err.status_code(), &err),
    }
}

pub async fn refresh_token<U, S>(
    State(usecase): State<Arc<AuthUseCase<U, S>>>,
    Json(refresh_token_model): Json<RefreshTokenModel>,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    match usecase
        .refresh_access_token(&refresh_token_model.refresh_token)
        .await
    {
        Ok(result) => Json(result).into_response(),
        Err(err) => error_response(err.status_code(), &err),
    }
}

pub async fn me<U, S>(
    State(usecase): State<Arc<AuthUseCase<U, S>>>,
    auth_user: AuthenticatedUser,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    match usecase.me(auth_user.user_id).await {
        Ok(user) => Json(json!({"user": user})).into_response(),
        Err(err) => error_response(err.status_code(), &err),
    }
}

pub async fn verify_email<U, S>(
    State(usecase): State<Arc<AuthUseCase<U, S>>>,
    auth_user: AuthenticatedUser,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    match usecase.verify_email(auth_user.user_id).await {
        Ok(()) => Json(json!({"message": "Email verified successfully"})).into_response(),
        Err(err) => error_response(err.status_code(), &err),
    }
}

pub async fn change_password<U, S>(
    State(usecase): State<Arc<AuthUseCase<U, S>>>,
    auth_user: AuthenticatedUser,
    Json(change_password_model): Json<ChangePasswordModel>,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    match usecase
        .change_password(auth_user.user_id, change_password_model)
        .await
    {
        Ok(()) => Json(json!({"message": "Password changed successfully"})).into_response(),
        Err(err) => error_response(err.status_code(), &err),
    }
}

pub async fn update_profile<U, S>(
    State(usecase): State<Arc<AuthUseCase<U, S>>>,
    auth_user: AuthenticatedUser,
    Json(update_profile_model): Json<UpdateProfileModel>,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    match usecase
        .update_profile(auth_user.user_id, update_profile_model)
        .await
    {
        Ok(user) => Json(json!({"user": user})).into_response(),
        Err(err) => error_response(err.status_code(), &err),
    }
}

pub async fn get_profile<U, S>(
    State(usecase): State<Arc<AuthUseCase<U, S>>>,
    auth_user: AuthenticatedUser,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    match usecase.me(auth_user.user_id).await {
        Ok(user) => Json(json!({"user": user})).into_response(),
        Err(err) => error_response(err.status_code(), &err),
    }
}

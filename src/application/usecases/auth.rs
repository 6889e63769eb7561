use std::sync::Arc;

use anyhow::anyhow;
use chrono::{Duration, Utc};
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::auth::{
    decode_refresh_token, hash_password, hash_refresh_token, mint_access_token,
    mint_refresh_token, verify_password,
};
use crate::config::config_model::{TokenLifetimes, UserSecret};
use crate::domain::entities::sessions::InsertSessionEntity;
use crate::domain::entities::users::UserEntity;
use crate::domain::repositories::sessions::SessionRepository;
use crate::domain::repositories::users::UserRepository;
use crate::domain::value_objects::auth::{AuthSuccessDto, RefreshedTokenDto};
use crate::domain::value_objects::enums::user_roles::UserRole;
use crate::domain::value_objects::users::{
    ChangePasswordModel, LoginModel, RegisterUserModel, UpdateProfileModel, UserDto,
};

const PASSWORD_MIN_LENGTH: usize = 8;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Account is deactivated")]
    AccountDeactivated,
    #[error("Invalid or expired token")]
    InvalidToken,
    #[error("Email already registered")]
    EmailAlreadyRegistered,
    #[error("User not found")]
    UserNotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AuthError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials
            | AuthError::AccountDeactivated
            | AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
            AuthError::EmailAlreadyRegistered => StatusCode::CONFLICT,
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type AuthResult<T> = std::result::Result<T, AuthError>;

/// Client metadata recorded on each issued session.
#[derive(Debug, Clone, Default)]
pub struct ClientMeta {
    pub device_info: Option<String>,
    pub ip_address: Option<String>,
}

pub struct AuthUseCase<U, S>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    secrets: UserSecret,
    lifetimes: TokenLifetimes,
}

impl<U, S> AuthUseCase<U, S>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    pub fn new(
        user_repo: Arc<U>,
        session_repo: Arc<S>,
        secrets: UserSecret,
        lifetimes: TokenLifetimes,
    ) -> Self {
        Self {
            user_repo,
            session_repo,
            secrets,
            lifetimes,
        }
    }

    pub async fn register(
        &self,
        register_user_model: RegisterUserModel,
        client: ClientMeta,
    ) -> AuthResult<AuthSuccessDto> {
        let role = UserRole::from_str(&register_user_model.user_type).ok_or_else(|| {
            AuthError::Validation("userType must be 'customer' or 'company'".to_string())
        })?;

        match role {
            UserRole::Company => {
                let has_company_name = register_user_model
                    .company_name
                    .as_deref()
                    .is_some_and(|name| !name.trim().is_empty());
                if !has_company_name {
                    return Err(AuthError::Validation(
                        "companyName is required for company accounts".to_string(),
                    ));
                }
            }
            UserRole::Customer => {}
        }

        if register_user_model.password.len() < PASSWORD_MIN_LENGTH {
            return Err(AuthError::Validation(format!(
                "Password must be at least {} characters",
                PASSWORD_MIN_LENGTH
            )));
        }

        let existing = self
            .user_repo
            .find_by_email(&register_user_model.email)
            .await
            .map_err(|err| {
                error!(db_error = ?err, "auth: failed to look up email for registration");
                AuthError::Internal(err)
            })?;
        if existing.is_some() {
            warn!(email = %register_user_model.email, "auth: registration with taken email");
            return Err(AuthError::EmailAlreadyRegistered);
        }

        let password_hash = hash_password(&register_user_model.password)?;
        let user = self
            .user_repo
            .register(register_user_model.to_entity(role, password_hash))
            .await
            .map_err(|err| {
                error!(db_error = ?err, "auth: failed to persist new user");
                AuthError::Internal(err)
            })?;

        info!(user_id = %user.id, role = %role, "auth: user registered");

        let (token, refresh_token) = self.issue_token_pair(&user, client).await?;
        Ok(AuthSuccessDto {
            user: UserDto::from(user),
            token,
            refresh_token,
        })
    }

    pub async fn login(
        &self,
        login_model: LoginModel,
        client: ClientMeta,
    ) -> AuthResult<AuthSuccessDto> {
        let user = self
            .user_repo
            .find_by_email(&login_model.email)
            .await
            .map_err(|err| {
                error!(db_error = ?err, "auth: failed to look up email for login");
                AuthError::Internal(err)
            })?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(&login_model.password, &user.password_hash) {
            warn!(user_id = %user.id, "auth: login with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        if !user.is_active {
            warn!(user_id = %user.id, "auth: login on deactivated account");
            return Err(AuthError::AccountDeactivated);
        }

        info!(user_id = %user.id, "auth: login successful");

        let (token, refresh_token) = self.issue_token_pair(&user, client).await?;
        Ok(AuthSuccessDto {
            user: UserDto::from(user),
            token,
            refresh_token,
        })
    }

    /// Exchanges a live refresh token for a fresh access token. The session
    /// row is the authority: a revoked or expired session rejects the token
    /// even when its own signature and expiry still check out.
    pub async fn refresh_access_token(&self, refresh_token: &str) -> AuthResult<RefreshedTokenDto> {
        let claims = decode_refresh_token(refresh_token, &self.secrets.refresh_secret)
            .map_err(|_| AuthError::InvalidToken)?;

        let token_hash = hash_refresh_token(refresh_token);
        let session = self
            .session_repo
            .find_active_by_token_hash(&token_hash)
            .await
            .map_err(|err| {
                error!(db_error = ?err, "auth: failed to look up session for refresh");
                AuthError::Internal(err)
            })?
            .ok_or(AuthError::InvalidToken)?;

        let now = Utc::now();
        if session.expires_at < now {
            warn!(session_id = %session.id, "auth: refresh on expired session");
            return Err(AuthError::InvalidToken);
        }

        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AuthError::InvalidToken)?;
        if session.user_id != user_id {
            warn!(session_id = %session.id, "auth: refresh token and session user mismatch");
            return Err(AuthError::InvalidToken);
        }

        let user = self
            .user_repo
            .find_by_id(user_id)
            .await
            .map_err(|err| {
                error!(db_error = ?err, "auth: failed to load user for refresh");
                AuthError::Internal(err)
            })?
            .filter(|user| user.is_active)
            .ok_or(AuthError::InvalidToken)?;

        let role =
            UserRole::from_str(&user.role).ok_or_else(|| anyhow!("unknown role on user row"))?;
        let token = mint_access_token(
            user.id,
            role,
            &user.email,
            &self.secrets.secret,
            self.lifetimes.access_ttl_seconds,
        )?;

        self.session_repo
            .touch_last_used(session.id, now)
            .await
            .map_err(|err| {
                error!(db_error = ?err, "auth: failed to bump session last_used");
                AuthError::Internal(err)
            })?;

        info!(user_id = %user.id, session_id = %session.id, "auth: access token refreshed");
        Ok(RefreshedTokenDto { token })
    }

    /// Revokes the session behind a refresh token. Idempotent; returns
    /// whether anything was actually revoked.
    pub async fn logout(&self, refresh_token: Option<&str>) -> AuthResult<bool> {
        let Some(refresh_token) = refresh_token else {
            return Ok(false);
        };

        let token_hash = hash_refresh_token(refresh_token);
        let revoked = self
            .session_repo
            .revoke_by_token_hash(&token_hash)
            .await
            .map_err(|err| {
                error!(db_error = ?err, "auth: failed to revoke session");
                AuthError::Internal(err)
            })?;

        info!(revoked, "auth: logout processed");
        Ok(revoked)
    }

    pub async fn me(&self, user_id: Uuid) -> AuthResult<UserDto> {
        let user = self.load_active_user(user_id).await?;
        Ok(UserDto::from(user))
    }

    pub async fn update_profile(
        &self,
        user_id: Uuid,
        update_profile_model: UpdateProfileModel,
    ) -> AuthResult<UserDto> {
        let user = self.load_active_user(user_id).await?;
        let role =
            UserRole::from_str(&user.role).ok_or_else(|| anyhow!("unknown role on user row"))?;

        let updated = self
            .user_repo
            .update_profile(user_id, update_profile_model.to_entity(role))
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "auth: failed to update profile");
                AuthError::Internal(err)
            })?;

        info!(%user_id, "auth: profile updated");
        Ok(UserDto::from(updated))
    }

    pub async fn verify_email(&self, user_id: Uuid) -> AuthResult<()> {
        self.load_active_user(user_id).await?;
        self.user_repo
            .mark_email_verified(user_id)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "auth: failed to mark email verified");
                AuthError::Internal(err)
            })?;
        info!(%user_id, "auth: email verified");
        Ok(())
    }

    pub async fn change_password(
        &self,
        user_id: Uuid,
        change_password_model: ChangePasswordModel,
    ) -> AuthResult<()> {
        if change_password_model.new_password.len() < PASSWORD_MIN_LENGTH {
            return Err(AuthError::Validation(format!(
                "New password must be at least {} characters",
                PASSWORD_MIN_LENGTH
            )));
        }

        let user = self.load_active_user(user_id).await?;
        if !verify_password(&change_password_model.current_password, &user.password_hash) {
            warn!(%user_id, "auth: change password with wrong current password");
            return Err(AuthError::Validation(
                "Current password is incorrect".to_string(),
            ));
        }

        let password_hash = hash_password(&change_password_model.new_password)?;
        self.user_repo
            .update_password_hash(user_id, password_hash)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "auth: failed to update password hash");
                AuthError::Internal(err)
            })?;

        info!(%user_id, "auth: password changed");
        Ok(())
    }

    async fn load_active_user(&self, user_id: Uuid) -> AuthResult<UserEntity> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "auth: failed to load user");
                AuthError::Internal(err)
            })?
            .ok_or(AuthError::UserNotFound)?;

        if !user.is_active {
            return Err(AuthError::AccountDeactivated);
        }
        Ok(user)
    }

    /// Mints the access/refresh pair and persists the refresh session. Only
    /// the hash of the refresh token ever reaches the store.
    async fn issue_token_pair(
        &self,
        user: &UserEntity,
        client: ClientMeta,
    ) -> AuthResult<(String, String)> {
        let role =
            UserRole::from_str(&user.role).ok_or_else(|| anyhow!("unknown role on user row"))?;

        let token = mint_access_token(
            user.id,
            role,
            &user.email,
            &self.secrets.secret,
            self.lifetimes.access_ttl_seconds,
        )?;
        let refresh_token = mint_refresh_token(
            user.id,
            &self.secrets.refresh_secret,
            self.lifetimes.refresh_ttl_seconds,
        )?;

        let now = Utc::now();
        let session = InsertSessionEntity {
            id: Uuid::new_v4(),
            user_id: user.id,
            token_hash: hash_refresh_token(&refresh_token),
            device_info: client.device_info,
            ip_address: client.ip_address,
            expires_at: now + Duration::seconds(self.lifetimes.refresh_ttl_seconds),
            created_at: now,
            last_used_at: now,
            is_active: true,
        };

        let session_id = self.session_repo.create(session).await.map_err(|err| {
            error!(user_id = %user.id, db_error = ?err, "auth: failed to persist session");
            AuthError::Internal(err)
        })?;

        info!(user_id = %user.id, %session_id, "auth: token pair issued");
        Ok((token, refresh_token))
    }
}

#[cfg(test)]
mod tests;

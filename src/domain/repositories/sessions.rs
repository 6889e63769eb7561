use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::sessions::{InsertSessionEntity, SessionEntity};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository {
    async fn create(&self, insert_session_entity: InsertSessionEntity) -> Result<Uuid>;
    async fn find_active_by_token_hash(&self, token_hash: &str)
    -> Result<Option<SessionEntity>>;
    async fn touch_last_used(&self, session_id: Uuid, at: DateTime<Utc>) -> Result<()>;
    /// Returns false when no session matched; revoking twice is a no-op.
    async fn revoke_by_token_hash(&self, token_hash: &str) -> Result<bool>;
}

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::{insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::sessions::{InsertSessionEntity, SessionEntity};
use crate::domain::repositories::sessions::SessionRepository;
use crate::infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::sessions};

pub struct SessionPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl SessionPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl SessionRepository for SessionPostgres {
    async fn create(&self, insert_session_entity: InsertSessionEntity) -> Result<Uuid> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(sessions::table)
            .values(&insert_session_entity)
            .returning(sessions::id)
            .get_result::<Uuid>(&mut conn)?;

        Ok(result)
    }

    async fn find_active_by_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<SessionEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = sessions::table
            .filter(sessions::token_hash.eq(token_hash))
            .filter(sessions::is_active.eq(true))
            .select(SessionEntity::as_select())
            .first::<SessionEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn touch_last_used(&self, session_id: Uuid, at: DateTime<Utc>) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(sessions::table.find(session_id))
            .set(sessions::last_used_at.eq(at))
            .execute(&mut conn)?;

        Ok(())
    }

    async fn revoke_by_token_hash(&self, token_hash: &str) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let affected = update(sessions::table)
            .filter(sessions::token_hash.eq(token_hash))
            .filter(sessions::is_active.eq(true))
            .set(sessions::is_active.eq(false))
            .execute(&mut conn)?;

        Ok(affected > 0)
    }
}

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use diesel::{Connection, insert_into, prelude::*, update};
use uuid::Uuid;

use crate::domain::entities::payment_methods::{InsertPaymentMethodEntity, PaymentMethodEntity};
use crate::domain::repositories::payment_methods::PaymentMethodRepository;
use crate::infrastructure::postgres::{
    postgres_connection::PgPoolSquad, schema::payment_methods,
};

pub struct PaymentMethodPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl PaymentMethodPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl PaymentMethodRepository for PaymentMethodPostgres {
    async fn list_active_by_user(&self, user_id: Uuid) -> Result<Vec<PaymentMethodEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = payment_methods::table
            .filter(payment_methods::user_id.eq(user_id))
            .filter(payment_methods::is_active.eq(true))
            .order(payment_methods::created_at.desc())
            .select(PaymentMethodEntity::as_select())
            .load::<PaymentMethodEntity>(&mut conn)?;

        Ok(results)
    }

    async fn insert(
        &self,
        insert_payment_method_entity: InsertPaymentMethodEntity,
    ) -> Result<PaymentMethodEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = conn.transaction::<PaymentMethodEntity, diesel::result::Error, _>(|tx| {
            // At most one default per user: a new default demotes the old one
            // in the same transaction.
            if insert_payment_method_entity.is_default {
                update(payment_methods::table)
                    .filter(
                        payment_methods::user_id.eq(insert_payment_method_entity.user_id),
                    )
                    .filter(payment_methods::is_default.eq(true))
                    .set(payment_methods::is_default.eq(false))
                    .execute(tx)?;
            }

            insert_into(payment_methods::table)
                .values(&insert_payment_method_entity)
                .returning(PaymentMethodEntity::as_returning())
                .get_result::<PaymentMethodEntity>(tx)
        })?;

        Ok(result)
    }

    async fn set_default(&self, user_id: Uuid, payment_method_id: Uuid) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let affected = conn.transaction::<usize, diesel::result::Error, _>(|tx| {
            update(payment_methods::table)
                .filter(payment_methods::user_id.eq(user_id))
                .filter(payment_methods::is_default.eq(true))
                .set(payment_methods::is_default.eq(false))
                .execute(tx)?;

            update(payment_methods::table)
                .filter(payment_methods::id.eq(payment_method_id))
                .filter(payment_methods::user_id.eq(user_id))
                .filter(payment_methods::is_active.eq(true))
                .set(payment_methods::is_default.eq(true))
                .execute(tx)
        })?;

        Ok(affected > 0)
    }

    async fn soft_delete(&self, user_id: Uuid, payment_method_id: Uuid) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let affected = update(payment_methods::table)
            .filter(payment_methods::id.eq(payment_method_id))
            .filter(payment_methods::user_id.eq(user_id))
            .filter(payment_methods::is_active.eq(true))
            .set(payment_methods::is_active.eq(false))
            .execute(&mut conn)?;

        Ok(affected > 0)
    }
}

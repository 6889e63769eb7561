use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::payment_methods::{InsertPaymentMethodEntity, PaymentMethodEntity};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentMethodRepository {
    async fn list_active_by_user(&self, user_id: Uuid) -> Result<Vec<PaymentMethodEntity>>;
    /// When the new method is flagged default, the user's previous default is
    /// unset in the same transaction.
    async fn insert(
        &self,
        insert_payment_method_entity: InsertPaymentMethodEntity,
    ) -> Result<PaymentMethodEntity>;
    async fn set_default(&self, user_id: Uuid, payment_method_id: Uuid) -> Result<bool>;
    async fn soft_delete(&self, user_id: Uuid, payment_method_id: Uuid) -> Result<bool>;
}

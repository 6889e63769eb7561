use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::users::{EditUserEntity, RegisterUserEntity, UserEntity};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository {
    async fn register(&self, register_user_entity: RegisterUserEntity) -> Result<UserEntity>;
    async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>>;
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<UserEntity>>;
    async fn update_profile(
        &self,
        user_id: Uuid,
        edit_user_entity: EditUserEntity,
    ) -> Result<UserEntity>;
    async fn update_password_hash(&self, user_id: Uuid, password_hash: String) -> Result<()>;
    async fn mark_email_verified(&self, user_id: Uuid) -> Result<()>;
}

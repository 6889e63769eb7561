use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::users::{EditUserEntity, RegisterUserEntity, UserEntity};
use crate::domain::value_objects::enums::user_roles::UserRole;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub user_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
    pub is_active: bool,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserEntity> for UserDto {
    fn from(entity: UserEntity) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
            first_name: entity.first_name,
            last_name: entity.last_name,
            user_type: entity.role,
            company_name: entity.company_name,
            phone: entity.phone,
            avatar_url: entity.avatar_url,
            is_active: entity.is_active,
            email_verified: entity.email_verified,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserModel {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub user_type: String,
    pub company_name: Option<String>,
    pub phone: Option<String>,
}

impl RegisterUserModel {
    pub fn to_entity(&self, role: UserRole, password_hash: String) -> RegisterUserEntity {
        RegisterUserEntity {
            id: Uuid::new_v4(),
            email: self.email.clone(),
            password_hash,
            role: role.to_string(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            company_name: match role {
                UserRole::Company => self.company_name.clone(),
                UserRole::Customer => None,
            },
            phone: self.phone.clone(),
            is_active: true,
            email_verified: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginModel {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileModel {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub company_name: Option<String>,
}

impl UpdateProfileModel {
    /// `company_name` is only honored for company accounts.
    pub fn to_entity(&self, role: UserRole) -> EditUserEntity {
        EditUserEntity {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phone: self.phone.clone(),
            company_name: match role {
                UserRole::Company => self.company_name.clone(),
                UserRole::Customer => None,
            },
            updated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordModel {
    pub current_password: String,
    pub new_password: String,
}

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::users::UserDto;

/// Login/registration response: the user plus a freshly issued token pair.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthSuccessDto {
    pub user: UserDto,
    pub token: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenModel {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RefreshedTokenDto {
    pub token: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutModel {
    pub refresh_token: Option<String>,
}

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Closed set of account roles. Every authorization check matches on this
/// exhaustively so a new role cannot silently pass an existing check.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum UserRole {
    Customer,
    Company,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Customer => "customer",
            UserRole::Company => "company",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "customer" => Some(UserRole::Customer),
            "company" => Some(UserRole::Company),
            _ => None,
        }
    }
}

impl Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

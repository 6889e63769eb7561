use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ValidationMethod {
    QrScan,
    Manual,
    App,
}

impl ValidationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationMethod::QrScan => "qr_scan",
            ValidationMethod::Manual => "manual",
            ValidationMethod::App => "app",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "qr_scan" => Some(ValidationMethod::QrScan),
            "manual" => Some(ValidationMethod::Manual),
            "app" => Some(ValidationMethod::App),
            _ => None,
        }
    }
}

impl Display for ValidationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

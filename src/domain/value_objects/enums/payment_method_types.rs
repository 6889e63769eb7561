use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentMethodType {
    CreditCard,
    Paypal,
    ApplePay,
}

impl PaymentMethodType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethodType::CreditCard => "credit-card",
            PaymentMethodType::Paypal => "paypal",
            PaymentMethodType::ApplePay => "apple-pay",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "credit-card" => Some(PaymentMethodType::CreditCard),
            "paypal" => Some(PaymentMethodType::Paypal),
            "apple-pay" => Some(PaymentMethodType::ApplePay),
            _ => None,
        }
    }
}

impl Display for PaymentMethodType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::payment_methods::{InsertPaymentMethodEntity, PaymentMethodEntity};
use crate::domain::value_objects::enums::payment_method_types::PaymentMethodType;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentMethodModel {
    #[serde(rename = "type")]
    pub method_type: String,
    pub provider: Option<String>,
    pub card_type: Option<String>,
    pub cardholder_name: Option<String>,
    pub card_number: Option<String>,
    pub expiry_month: Option<i32>,
    pub expiry_year: Option<i32>,
    #[serde(default)]
    pub is_default: bool,
}

impl CreatePaymentMethodModel {
    /// Only the last four digits of a card number are ever persisted.
    pub fn to_entity(&self, user_id: Uuid, method_type: PaymentMethodType) -> InsertPaymentMethodEntity {
        let card_last4 = self.card_number.as_ref().map(|number| {
            let digits: String = number.chars().filter(|c| c.is_ascii_digit()).collect();
            let cut = digits.len().saturating_sub(4);
            digits[cut..].to_string()
        });

        InsertPaymentMethodEntity {
            id: Uuid::new_v4(),
            user_id,
            method_type: method_type.to_string(),
            provider: self.provider.clone(),
            card_type: self.card_type.clone(),
            cardholder_name: self.cardholder_name.clone(),
            card_last4,
            expiry_month: self.expiry_month,
            expiry_year: self.expiry_year,
            is_default: self.is_default,
            is_active: true,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePaymentMethodModel {
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodDto {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub method_type: String,
    pub card_type: Option<String>,
    pub cardholder_name: Option<String>,
    pub card_last4: Option<String>,
    pub expiry_date: Option<String>,
    pub is_default: bool,
}

impl From<PaymentMethodEntity> for PaymentMethodDto {
    fn from(entity: PaymentMethodEntity) -> Self {
        let expiry_date = match (entity.expiry_month, entity.expiry_year) {
            (Some(month), Some(year)) => Some(format!("{:02}/{:02}", month, year % 100)),
            _ => None,
        };
        Self {
            id: entity.id,
            method_type: entity.method_type,
            card_type: entity.card_type,
            cardholder_name: entity.cardholder_name,
            card_last4: entity.card_last4,
            expiry_date,
            is_default: entity.is_default,
        }
    }
}

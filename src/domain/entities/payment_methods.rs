use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::payment_methods;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = payment_methods)]
pub struct PaymentMethodEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub method_type: String,
    pub provider: Option<String>,
    pub card_type: Option<String>,
    pub cardholder_name: Option<String>,
    pub card_last4: Option<String>,
    pub expiry_month: Option<i32>,
    pub expiry_year: Option<i32>,
    pub is_default: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = payment_methods)]
pub struct InsertPaymentMethodEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub method_type: String,
    pub provider: Option<String>,
    pub card_type: Option<String>,
    pub cardholder_name: Option<String>,
    pub card_last4: Option<String>,
    pub expiry_month: Option<i32>,
    pub expiry_year: Option<i32>,
    pub is_default: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyticsPeriod {
    Week,
    Month,
    Year,
}

impl AnalyticsPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalyticsPeriod::Week => "week",
            AnalyticsPeriod::Month => "month",
            AnalyticsPeriod::Year => "year",
        }
    }

    /// Unknown values fall back to a month, matching the public API contract.
    pub fn from_str_or_default(value: &str) -> Self {
        match value {
            "week" => AnalyticsPeriod::Week,
            "year" => AnalyticsPeriod::Year,
            _ => AnalyticsPeriod::Month,
        }
    }

    pub fn days_back(&self) -> i64 {
        match self {
            AnalyticsPeriod::Week => 7,
            AnalyticsPeriod::Month => 30,
            AnalyticsPeriod::Year => 365,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecentEventDto {
    pub id: Uuid,
    pub title: String,
    pub event_date: DateTime<Utc>,
    pub is_active: bool,
    pub tickets_sold: i64,
    pub total_tickets: i32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardDto {
    pub total_events: i64,
    pub active_events: i64,
    pub total_revenue_minor: i64,
    pub recent_events: Vec<RecentEventDto>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TopEventDto {
    pub event_id: Uuid,
    pub event_name: String,
    pub revenue_minor: i64,
    pub tickets_sold: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PeriodAnalyticsDto {
    pub period: String,
    pub revenue_minor: i64,
    pub tickets_sold: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsDto {
    pub total_revenue_minor: i64,
    pub total_tickets_sold: i64,
    pub total_events: i64,
    pub active_events: i64,
    pub top_events: Vec<TopEventDto>,
    pub period_analytics: PeriodAnalyticsDto,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerOrderDto {
    pub order_id: Uuid,
    pub order_number: String,
    pub event_name: String,
    pub quantity: i32,
    pub total_paid_minor: i64,
    pub purchase_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDto {
    pub id: Uuid,
    pub customer_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub total_orders: i64,
    pub total_spent_minor: i64,
    pub last_purchase: Option<DateTime<Utc>>,
    pub orders: Vec<CustomerOrderDto>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AttendeeDto {
    pub ticket_id: Uuid,
    pub ticket_number: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub holder_name: Option<String>,
    pub seat_number: Option<String>,
    pub section: Option<String>,
    pub status: String,
    pub purchase_date: DateTime<Utc>,
    pub used_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AttendeeEventInfoDto {
    pub id: Uuid,
    pub title: String,
    pub event_date: DateTime<Utc>,
    pub venue: String,
}

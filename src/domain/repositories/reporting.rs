use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::value_objects::reporting::{
    AttendeeDto, CustomerDto, DashboardDto, TopEventDto,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalyticsTotals {
    pub revenue_minor: i64,
    pub tickets_sold: i64,
    pub total_events: i64,
    pub active_events: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeriodTotals {
    pub revenue_minor: i64,
    pub tickets_sold: i64,
}

/// Read-only projections over the sales data. Nothing here mutates state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportingRepository {
    async fn dashboard(&self, company_id: Uuid) -> Result<DashboardDto>;
    async fn analytics_totals(&self, company_id: Uuid) -> Result<AnalyticsTotals>;
    async fn top_events_by_revenue(
        &self,
        company_id: Uuid,
        limit: i64,
    ) -> Result<Vec<TopEventDto>>;
    async fn period_totals(
        &self,
        company_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<PeriodTotals>;
    async fn customers(
        &self,
        company_id: Uuid,
        event_id: Option<Uuid>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<CustomerDto>, i64)>;
    async fn attendees(
        &self,
        event_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<AttendeeDto>, i64)>;
}

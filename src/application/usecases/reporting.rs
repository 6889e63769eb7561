use std::sync::Arc;

use chrono::{Duration, Utc};
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

use crate::domain::repositories::events::EventRepository;
use crate::domain::repositories::reporting::ReportingRepository;
use crate::domain::value_objects::pagination::{PageQuery, Pagination};
use crate::domain::value_objects::reporting::{
    AnalyticsDto, AnalyticsPeriod, AttendeeDto, AttendeeEventInfoDto, CustomerDto, DashboardDto,
    PeriodAnalyticsDto,
};

const DEFAULT_CUSTOMERS_PER_PAGE: i64 = 20;
const MAX_CUSTOMERS_PER_PAGE: i64 = 20;
const DEFAULT_ATTENDEES_PER_PAGE: i64 = 50;
const MAX_ATTENDEES_PER_PAGE: i64 = 50;
const TOP_EVENTS_LIMIT: i64 = 5;

#[derive(Debug, Error)]
pub enum ReportingError {
    #[error("Event not found")]
    EventNotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ReportingError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            ReportingError::EventNotFound => StatusCode::NOT_FOUND,
            ReportingError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type ReportingResult<T> = std::result::Result<T, ReportingError>;

/// Read-only company dashboards and analytics. Pure projections; nothing in
/// here writes.
pub struct ReportingUseCase<R, E>
where
    R: ReportingRepository + Send + Sync + 'static,
    E: EventRepository + Send + Sync + 'static,
{
    reporting_repo: Arc<R>,
    event_repo: Arc<E>,
}

impl<R, E> ReportingUseCase<R, E>
where
    R: ReportingRepository + Send + Sync + 'static,
    E: EventRepository + Send + Sync + 'static,
{
    pub fn new(reporting_repo: Arc<R>, event_repo: Arc<E>) -> Self {
        Self {
            reporting_repo,
            event_repo,
        }
    }

    pub async fn dashboard(&self, company_id: Uuid) -> ReportingResult<DashboardDto> {
        self.reporting_repo
            .dashboard(company_id)
            .await
            .map_err(|err| {
                error!(%company_id, db_error = ?err, "reporting: failed to build dashboard");
                ReportingError::Internal(err)
            })
    }

    pub async fn analytics(
        &self,
        company_id: Uuid,
        period: AnalyticsPeriod,
    ) -> ReportingResult<AnalyticsDto> {
        let totals = self
            .reporting_repo
            .analytics_totals(company_id)
            .await
            .map_err(|err| {
                error!(%company_id, db_error = ?err, "reporting: failed to load totals");
                ReportingError::Internal(err)
            })?;

        let top_events = self
            .reporting_repo
            .top_events_by_revenue(company_id, TOP_EVENTS_LIMIT)
            .await
            .map_err(|err| {
                error!(%company_id, db_error = ?err, "reporting: failed to load top events");
                ReportingError::Internal(err)
            })?;

        let since = Utc::now() - Duration::days(period.days_back());
        let period_totals = self
            .reporting_repo
            .period_totals(company_id, since)
            .await
            .map_err(|err| {
                error!(%company_id, db_error = ?err, "reporting: failed to load period totals");
                ReportingError::Internal(err)
            })?;

        info!(%company_id, period = period.as_str(), "reporting: analytics computed");
        Ok(AnalyticsDto {
            total_revenue_minor: totals.revenue_minor,
            total_tickets_sold: totals.tickets_sold,
            total_events: totals.total_events,
            active_events: totals.active_events,
            top_events,
            period_analytics: PeriodAnalyticsDto {
                period: period.as_str().to_string(),
                revenue_minor: period_totals.revenue_minor,
                tickets_sold: period_totals.tickets_sold,
            },
        })
    }

    pub async fn customers(
        &self,
        company_id: Uuid,
        event_id: Option<Uuid>,
        page_query: PageQuery,
    ) -> ReportingResult<(Vec<CustomerDto>, Pagination)> {
        let (page, per_page) =
            page_query.resolve(DEFAULT_CUSTOMERS_PER_PAGE, MAX_CUSTOMERS_PER_PAGE);
        let offset = Pagination::offset(page, per_page);

        let (customers, total) = self
            .reporting_repo
            .customers(company_id, event_id, per_page, offset)
            .await
            .map_err(|err| {
                error!(%company_id, db_error = ?err, "reporting: failed to list customers");
                ReportingError::Internal(err)
            })?;

        Ok((customers, Pagination::new(page, per_page, total)))
    }

    pub async fn attendees(
        &self,
        company_id: Uuid,
        event_id: Uuid,
        page_query: PageQuery,
    ) -> ReportingResult<(Vec<AttendeeDto>, Pagination, AttendeeEventInfoDto)> {
        let event = self
            .event_repo
            .find_owned_by(event_id, company_id)
            .await
            .map_err(|err| {
                error!(%event_id, db_error = ?err, "reporting: failed to load event");
                ReportingError::Internal(err)
            })?
            .ok_or(ReportingError::EventNotFound)?;

        let (page, per_page) =
            page_query.resolve(DEFAULT_ATTENDEES_PER_PAGE, MAX_ATTENDEES_PER_PAGE);
        let offset = Pagination::offset(page, per_page);

        let (attendees, total) = self
            .reporting_repo
            .attendees(event_id, per_page, offset)
            .await
            .map_err(|err| {
                error!(%event_id, db_error = ?err, "reporting: failed to list attendees");
                ReportingError::Internal(err)
            })?;

        let event_info = AttendeeEventInfoDto {
            id: event.id,
            title: event.title,
            event_date: event.event_date,
            venue: event.venue,
        };

        Ok((attendees, Pagination::new(page, per_page, total), event_info))
    }
}

#[cfg(test)]
mod tests;

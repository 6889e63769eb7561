use super::*;

use crate::domain::repositories::events::MockEventRepository;
use crate::domain::repositories::reporting::{
    AnalyticsTotals, MockReportingRepository, PeriodTotals,
};

fn usecase(
    reporting_repo: MockReportingRepository,
    event_repo: MockEventRepository,
) -> ReportingUseCase<MockReportingRepository, MockEventRepository> {
    ReportingUseCase::new(Arc::new(reporting_repo), Arc::new(event_repo))
}

#[tokio::test]
async fn test_analytics_windows_by_period() {
    let mut reporting_repo = MockReportingRepository::new();
    reporting_repo.expect_analytics_totals().returning(|_| {
        Ok(AnalyticsTotals {
            revenue_minor: 100_000,
            tickets_sold: 40,
            total_events: 3,
            active_events: 2,
        })
    });
    reporting_repo
        .expect_top_events_by_revenue()
        .withf(|_, limit| *limit == 5)
        .returning(|_, _| Ok(vec![]));
    reporting_repo
        .expect_period_totals()
        .withf(|_, since| {
            // A week-windowed query must look back roughly seven days.
            let days = (Utc::now() - *since).num_days();
            (6..=7).contains(&days)
        })
        .returning(|_, _| {
            Ok(PeriodTotals {
                revenue_minor: 10_000,
                tickets_sold: 4,
            })
        });

    let analytics = usecase(reporting_repo, MockEventRepository::new())
        .analytics(Uuid::new_v4(), AnalyticsPeriod::Week)
        .await
        .unwrap();

    assert_eq!(analytics.total_revenue_minor, 100_000);
    assert_eq!(analytics.period_analytics.period, "week");
    assert_eq!(analytics.period_analytics.revenue_minor, 10_000);
}

#[tokio::test]
async fn test_attendees_of_unowned_event_is_not_found() {
    let mut event_repo = MockEventRepository::new();
    event_repo.expect_find_owned_by().returning(|_, _| Ok(None));

    let mut reporting_repo = MockReportingRepository::new();
    reporting_repo.expect_attendees().times(0);

    let err = usecase(reporting_repo, event_repo)
        .attendees(Uuid::new_v4(), Uuid::new_v4(), PageQuery::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ReportingError::EventNotFound));
}

#[test]
fn test_period_parsing_defaults_to_month() {
    assert_eq!(AnalyticsPeriod::from_str_or_default("week"), AnalyticsPeriod::Week);
    assert_eq!(AnalyticsPeriod::from_str_or_default("year"), AnalyticsPeriod::Year);
    assert_eq!(AnalyticsPeriod::from_str_or_default("month"), AnalyticsPeriod::Month);
    assert_eq!(
        AnalyticsPeriod::from_str_or_default("fortnight"),
        AnalyticsPeriod::Month
    );
    assert_eq!(AnalyticsPeriod::Year.days_back(), 365);
}

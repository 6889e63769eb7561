use super::*;

use crate::domain::entities::events::EventEntity;
use crate::domain::repositories::events::MockEventRepository;
use crate::domain::repositories::users::MockUserRepository;

fn usecase(
    event_repo: MockEventRepository,
    user_repo: MockUserRepository,
) -> EventUseCase<MockEventRepository, MockUserRepository> {
    EventUseCase::new(Arc::new(event_repo), Arc::new(user_repo))
}

fn create_model(event_date: DateTime<Utc>) -> CreateEventModel {
    CreateEventModel {
        title: "Summer Fest".to_string(),
        description: None,
        event_date,
        venue: "Main Arena".to_string(),
        address: None,
        city: Some("Lisbon".to_string()),
        country: None,
        category: Some("music".to_string()),
        image_url: None,
        total_tickets: 500,
        base_price_minor: 1_500,
    }
}

fn owned_event(company_id: Uuid) -> EventEntity {
    EventEntity {
        id: Uuid::new_v4(),
        company_id,
        title: "Summer Fest".to_string(),
        description: None,
        event_date: Utc::now() + chrono::Duration::days(30),
        venue: "Main Arena".to_string(),
        address: None,
        city: None,
        country: None,
        category: None,
        image_url: None,
        total_tickets: 500,
        available_tickets: 500,
        base_price_minor: 1_500,
        is_active: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[tokio::test]
async fn test_create_event_rejects_past_date() {
    let mut event_repo = MockEventRepository::new();
    event_repo.expect_create_with_default_ticket_type().times(0);

    let err = usecase(event_repo, MockUserRepository::new())
        .create_event(
            Uuid::new_v4(),
            create_model(Utc::now() - chrono::Duration::days(1)),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, EventError::Validation(_)));
}

#[tokio::test]
async fn test_create_event_seeds_default_ticket_type_at_full_capacity() {
    let company_id = Uuid::new_v4();

    let mut event_repo = MockEventRepository::new();
    event_repo
        .expect_create_with_default_ticket_type()
        .times(1)
        .withf(|event, ticket_type| {
            ticket_type.event_id == event.id
                && ticket_type.name == "General"
                && ticket_type.quantity_available == event.total_tickets
                && ticket_type.price_minor == event.base_price_minor
                && event.available_tickets == event.total_tickets
        })
        .returning(|event, _| Ok(event.id));
    let company_clone = company_id;
    event_repo.expect_find_active_by_id().returning(move |id| {
        let mut event = owned_event(company_clone);
        event.id = id;
        Ok(Some(event))
    });
    event_repo.expect_ticket_types_of().returning(|_| Ok(vec![]));

    let mut user_repo = MockUserRepository::new();
    user_repo.expect_find_by_id().returning(|_| Ok(None));

    let dto = usecase(event_repo, user_repo)
        .create_event(company_id, create_model(Utc::now() + chrono::Duration::days(30)))
        .await
        .unwrap();
    assert!(dto.is_active);
}

#[tokio::test]
async fn test_delete_event_with_orders_is_refused() {
    let company_id = Uuid::new_v4();
    let event = owned_event(company_id);
    let event_id = event.id;

    let mut event_repo = MockEventRepository::new();
    event_repo
        .expect_find_owned_by()
        .returning(move |_, _| Ok(Some(event.clone())));
    event_repo.expect_has_order_items().returning(|_| Ok(true));
    event_repo.expect_delete().times(0);

    let err = usecase(event_repo, MockUserRepository::new())
        .delete_event(company_id, event_id)
        .await
        .unwrap_err();

    assert!(matches!(err, EventError::HasOrders));
    assert_eq!(err.status_code(), axum::http::StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_toggle_unowned_event_is_not_found() {
    let mut event_repo = MockEventRepository::new();
    event_repo.expect_toggle_active().returning(|_, _| Ok(None));

    let err = usecase(event_repo, MockUserRepository::new())
        .toggle_event_status(Uuid::new_v4(), Uuid::new_v4())
        .await
        .unwrap_err();

    assert!(matches!(err, EventError::NotFound));
}

#[tokio::test]
async fn test_list_events_rejects_malformed_dates() {
    let err = usecase(MockEventRepository::new(), MockUserRepository::new())
        .list_events(
            EventListQuery {
                date_from: Some("yesterday".to_string()),
                ..Default::default()
            },
            PageQuery::default(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, EventError::Validation(_)));
}

#[tokio::test]
async fn test_list_events_accepts_rfc3339_dates() {
    let mut event_repo = MockEventRepository::new();
    event_repo
        .expect_list_public()
        .withf(|filter, limit, offset| {
            filter.date_from.is_some() && *limit == 20 && *offset == 0
        })
        .returning(|_, _, _| Ok((vec![], 0)));

    let (events, pagination) = usecase(event_repo, MockUserRepository::new())
        .list_events(
            EventListQuery {
                date_from: Some("2026-09-01T00:00:00Z".to_string()),
                ..Default::default()
            },
            PageQuery::default(),
        )
        .await
        .unwrap();

    assert!(events.is_empty());
    assert_eq!(pagination.total, 0);
}

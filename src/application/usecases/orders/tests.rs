use super::*;

use std::collections::HashSet;

use crate::domain::entities::events::EventEntity;
use crate::domain::entities::orders::OrderEntity;
use crate::domain::entities::ticket_types::TicketTypeEntity;
use crate::domain::entities::tickets::TicketEntity;
use crate::domain::entities::users::UserEntity;
use crate::domain::repositories::events::MockEventRepository;
use crate::domain::repositories::orders::MockOrderRepository;
use crate::domain::repositories::users::MockUserRepository;
use crate::domain::value_objects::enums::user_roles::UserRole;
use crate::domain::value_objects::orders::CreateOrderItemModel;

fn usecase(
    order_repo: MockOrderRepository,
    event_repo: MockEventRepository,
    user_repo: MockUserRepository,
) -> OrderUseCase<MockOrderRepository, MockEventRepository, MockUserRepository> {
    OrderUseCase::new(Arc::new(order_repo), Arc::new(event_repo), Arc::new(user_repo))
}

fn sample_buyer() -> UserEntity {
    UserEntity {
        id: Uuid::new_v4(),
        email: "buyer@example.com".to_string(),
        password_hash: "irrelevant".to_string(),
        role: UserRole::Customer.to_string(),
        first_name: "Jamie".to_string(),
        last_name: "Doe".to_string(),
        company_name: None,
        phone: None,
        avatar_url: None,
        is_active: true,
        email_verified: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn sample_event(company_id: Uuid) -> EventEntity {
    EventEntity {
        id: Uuid::new_v4(),
        company_id,
        title: "Summer Fest".to_string(),
        description: None,
        event_date: Utc::now() + chrono::Duration::days(30),
        venue: "Main Arena".to_string(),
        address: None,
        city: Some("Lisbon".to_string()),
        country: None,
        category: Some("music".to_string()),
        image_url: None,
        total_tickets: 500,
        available_tickets: 500,
        base_price_minor: 1_500,
        is_active: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn sample_ticket_type(event_id: Uuid, price_minor: i32) -> TicketTypeEntity {
    TicketTypeEntity {
        id: Uuid::new_v4(),
        event_id,
        name: "General".to_string(),
        description: None,
        price_minor,
        quantity_available: 100,
        quantity_sold: 0,
        benefits: None,
        created_at: Utc::now(),
    }
}

/// Echoes the insert entities back as if the transaction committed.
fn committing_order_repo() -> MockOrderRepository {
    let mut order_repo = MockOrderRepository::new();
    order_repo
        .expect_create_order()
        .returning(|order, _items, tickets| {
            Ok(CreateOrderOutcome::Created {
                order: OrderEntity {
                    id: order.id,
                    user_id: order.user_id,
                    order_number: order.order_number,
                    total_amount_minor: order.total_amount_minor,
                    status: order.status,
                    payment_method: order.payment_method,
                    payment_ref: order.payment_ref,
                    billing_address: order.billing_address,
                    created_at: order.created_at,
                    updated_at: order.updated_at,
                },
                tickets: tickets
                    .into_iter()
                    .map(|ticket| TicketEntity {
                        id: ticket.id,
                        order_id: ticket.order_id,
                        event_id: ticket.event_id,
                        ticket_type_id: ticket.ticket_type_id,
                        ticket_number: ticket.ticket_number,
                        qr_code: ticket.qr_code,
                        event_name: ticket.event_name,
                        event_location: ticket.event_location,
                        event_date: ticket.event_date,
                        holder_name: ticket.holder_name,
                        holder_email: ticket.holder_email,
                        seat_number: ticket.seat_number,
                        section: ticket.section,
                        status: ticket.status,
                        used_at: None,
                        created_at: ticket.created_at,
                    })
                    .collect(),
            })
        });
    order_repo
}

fn user_repo_with(buyer: UserEntity) -> MockUserRepository {
    let mut user_repo = MockUserRepository::new();
    user_repo
        .expect_find_by_id()
        .returning(move |_| Ok(Some(buyer.clone())));
    user_repo
}

#[tokio::test]
async fn test_order_with_quantities_two_and_three_issues_five_tickets() {
    let buyer = sample_buyer();
    let event = sample_event(Uuid::new_v4());
    let standard = sample_ticket_type(event.id, 1_500);
    let vip = sample_ticket_type(event.id, 4_000);

    let mut event_repo = MockEventRepository::new();
    let found_event = event.clone();
    event_repo
        .expect_find_active_by_id()
        .returning(move |_| Ok(Some(found_event.clone())));
    let standard_clone = standard.clone();
    let vip_clone = vip.clone();
    event_repo.expect_find_ticket_type().returning(move |id| {
        if id == standard_clone.id {
            Ok(Some(standard_clone.clone()))
        } else {
            Ok(Some(vip_clone.clone()))
        }
    });

    let result = usecase(committing_order_repo(), event_repo, user_repo_with(buyer.clone()))
        .create_order(
            buyer.id,
            CreateOrderModel {
                items: vec![
                    CreateOrderItemModel {
                        event_id: event.id,
                        ticket_type_id: standard.id,
                        quantity: 2,
                    },
                    CreateOrderItemModel {
                        event_id: event.id,
                        ticket_type_id: vip.id,
                        quantity: 3,
                    },
                ],
                payment_method: "credit-card".to_string(),
                billing_address: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(result.tickets.len(), 5);
    // Total comes from server-side prices: 2 * 1500 + 3 * 4000.
    assert_eq!(result.order.total_amount_minor, 15_000);
    assert_eq!(result.order.status, "pending");

    let numbers: HashSet<&str> = result
        .tickets
        .iter()
        .map(|ticket| ticket.ticket_number.as_str())
        .collect();
    assert_eq!(numbers.len(), 5);

    let qr_payloads: HashSet<&str> = result
        .tickets
        .iter()
        .map(|ticket| ticket.qr_code.as_str())
        .collect();
    assert_eq!(qr_payloads.len(), 5);

    for ticket in &result.tickets {
        // The QR payload embeds the ticket's own id in a single pass.
        assert!(ticket.qr_code.starts_with(&format!("TICKET:{}", ticket.id)));
        assert_eq!(ticket.event_name, event.title);
        assert_eq!(ticket.event_location, event.venue);
    }
}

#[tokio::test]
async fn test_unknown_event_aborts_whole_order() {
    let buyer = sample_buyer();

    let mut event_repo = MockEventRepository::new();
    event_repo
        .expect_find_active_by_id()
        .returning(|_| Ok(None));

    let mut order_repo = MockOrderRepository::new();
    order_repo.expect_create_order().times(0);

    let missing_event = Uuid::new_v4();
    let err = usecase(order_repo, event_repo, user_repo_with(buyer.clone()))
        .create_order(
            buyer.id,
            CreateOrderModel {
                items: vec![CreateOrderItemModel {
                    event_id: missing_event,
                    ticket_type_id: Uuid::new_v4(),
                    quantity: 1,
                }],
                payment_method: "paypal".to_string(),
                billing_address: None,
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, OrderError::EventNotFound(id) if id == missing_event));
    assert_eq!(err.status_code(), axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_ticket_type_from_another_event_is_not_found() {
    let buyer = sample_buyer();
    let event = sample_event(Uuid::new_v4());
    // The ticket type exists but belongs to a different event.
    let foreign_type = sample_ticket_type(Uuid::new_v4(), 1_000);

    let mut event_repo = MockEventRepository::new();
    let found_event = event.clone();
    event_repo
        .expect_find_active_by_id()
        .returning(move |_| Ok(Some(found_event.clone())));
    let foreign_clone = foreign_type.clone();
    event_repo
        .expect_find_ticket_type()
        .returning(move |_| Ok(Some(foreign_clone.clone())));

    let mut order_repo = MockOrderRepository::new();
    order_repo.expect_create_order().times(0);

    let err = usecase(order_repo, event_repo, user_repo_with(buyer.clone()))
        .create_order(
            buyer.id,
            CreateOrderModel {
                items: vec![CreateOrderItemModel {
                    event_id: event.id,
                    ticket_type_id: foreign_type.id,
                    quantity: 1,
                }],
                payment_method: "paypal".to_string(),
                billing_address: None,
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, OrderError::TicketTypeNotFound(_)));
}

#[tokio::test]
async fn test_empty_cart_is_rejected() {
    let err = usecase(
        MockOrderRepository::new(),
        MockEventRepository::new(),
        MockUserRepository::new(),
    )
    .create_order(
        Uuid::new_v4(),
        CreateOrderModel {
            items: vec![],
            payment_method: "paypal".to_string(),
            billing_address: None,
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(err, OrderError::Validation(_)));
}

#[tokio::test]
async fn test_nonpositive_quantity_is_rejected() {
    let err = usecase(
        MockOrderRepository::new(),
        MockEventRepository::new(),
        MockUserRepository::new(),
    )
    .create_order(
        Uuid::new_v4(),
        CreateOrderModel {
            items: vec![CreateOrderItemModel {
                event_id: Uuid::new_v4(),
                ticket_type_id: Uuid::new_v4(),
                quantity: 0,
            }],
            payment_method: "paypal".to_string(),
            billing_address: None,
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(err, OrderError::Validation(_)));
}

#[tokio::test]
async fn test_insufficient_inventory_surfaces_conflict() {
    let buyer = sample_buyer();
    let event = sample_event(Uuid::new_v4());
    let ticket_type = sample_ticket_type(event.id, 2_000);
    let ticket_type_id = ticket_type.id;

    let mut event_repo = MockEventRepository::new();
    let found_event = event.clone();
    event_repo
        .expect_find_active_by_id()
        .returning(move |_| Ok(Some(found_event.clone())));
    event_repo
        .expect_find_ticket_type()
        .returning(move |_| Ok(Some(ticket_type.clone())));

    let mut order_repo = MockOrderRepository::new();
    order_repo.expect_create_order().returning(move |_, _, _| {
        Ok(CreateOrderOutcome::InsufficientInventory {
            ticket_type_id,
            requested: 3,
            available: 1,
        })
    });

    let err = usecase(order_repo, event_repo, user_repo_with(buyer.clone()))
        .create_order(
            buyer.id,
            CreateOrderModel {
                items: vec![CreateOrderItemModel {
                    event_id: event.id,
                    ticket_type_id,
                    quantity: 3,
                }],
                payment_method: "credit-card".to_string(),
                billing_address: None,
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, OrderError::InsufficientInventory { .. }));
    assert_eq!(err.status_code(), axum::http::StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_list_orders_builds_pagination_envelope() {
    let user_id = Uuid::new_v4();

    let mut order_repo = MockOrderRepository::new();
    order_repo
        .expect_list_by_user()
        .withf(|_, limit, offset| *limit == 20 && *offset == 20)
        .returning(move |user_id, _, _| {
            let order = OrderEntity {
                id: Uuid::new_v4(),
                user_id,
                order_number: "ORD-123456".to_string(),
                total_amount_minor: 3_000,
                status: "pending".to_string(),
                payment_method: Some("paypal".to_string()),
                payment_ref: None,
                billing_address: None,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            };
            Ok((vec![order], 45))
        });
    order_repo
        .expect_items_with_event_titles()
        .returning(|_| Ok(vec![]));

    let (orders, pagination) = usecase(
        order_repo,
        MockEventRepository::new(),
        MockUserRepository::new(),
    )
    .list_orders(
        user_id,
        PageQuery {
            page: Some(2),
            per_page: Some(50), // capped to 20
        },
    )
    .await
    .unwrap();

    assert_eq!(orders.len(), 1);
    assert_eq!(pagination.page, 2);
    assert_eq!(pagination.per_page, 20);
    assert_eq!(pagination.pages, 3);
    assert!(pagination.has_next);
    assert!(pagination.has_prev);
}

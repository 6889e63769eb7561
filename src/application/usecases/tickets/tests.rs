use super::*;

use std::sync::Mutex;

use crate::domain::entities::tickets::TicketEntity;
use crate::domain::repositories::tickets::MockTicketRepository;
use crate::domain::value_objects::enums::ticket_statuses::TicketStatus;
use crate::domain::value_objects::tickets::build_qr_payload;

fn company_user() -> AuthenticatedUser {
    AuthenticatedUser {
        user_id: Uuid::new_v4(),
        role: UserRole::Company,
        email: "gate@venue.example".to_string(),
    }
}

fn customer_user() -> AuthenticatedUser {
    AuthenticatedUser {
        user_id: Uuid::new_v4(),
        role: UserRole::Customer,
        email: "buyer@example.com".to_string(),
    }
}

fn usecase(ticket_repo: MockTicketRepository) -> TicketValidationUseCase<MockTicketRepository> {
    TicketValidationUseCase::new(Arc::new(ticket_repo))
}

fn validate_model(qr_code: &str) -> ValidateTicketModel {
    ValidateTicketModel {
        qr_code: qr_code.to_string(),
        location: Some("Gate A".to_string()),
        validation_method: None,
    }
}

fn validated_dto(ticket_number: &str, validated_at: DateTime<Utc>) -> ValidatedTicketDto {
    ValidatedTicketDto {
        ticket_number: ticket_number.to_string(),
        event_name: "Summer Fest".to_string(),
        holder_name: Some("Jamie Doe".to_string()),
        validated_at,
        event_date: validated_at + chrono::Duration::hours(2),
    }
}

#[tokio::test]
async fn test_validate_twice_yields_one_success_one_conflict() {
    let first_used_at = Utc::now();

    // The repository transitions the ticket on the first call and reports
    // the recorded used_at on every later one, like the real transaction.
    let calls = Mutex::new(0u32);
    let mut ticket_repo = MockTicketRepository::new();
    ticket_repo
        .expect_validate_ticket()
        .times(2)
        .returning(move |_, number, _, _| {
            let mut calls = calls.lock().unwrap();
            *calls += 1;
            if *calls == 1 {
                Ok(ValidationOutcome::Validated(validated_dto(
                    number,
                    first_used_at,
                )))
            } else {
                Ok(ValidationOutcome::AlreadyUsed {
                    ticket_number: number.to_string(),
                    used_at: first_used_at,
                })
            }
        });

    let auth_user = company_user();
    let usecase = usecase(ticket_repo);

    let first = usecase
        .validate_ticket(&auth_user, validate_model("TCK-111222"))
        .await
        .unwrap();
    assert_eq!(first.ticket_number, "TCK-111222");

    let second = usecase
        .validate_ticket(&auth_user, validate_model("TCK-111222"))
        .await
        .unwrap_err();
    match second {
        TicketError::AlreadyUsed {
            ticket_number,
            used_at,
        } => {
            assert_eq!(ticket_number, "TCK-111222");
            // The original used-at must survive the repeat attempt.
            assert_eq!(used_at, first_used_at);
        }
        other => panic!("expected AlreadyUsed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_cross_tenant_validation_is_forbidden() {
    let mut ticket_repo = MockTicketRepository::new();
    ticket_repo
        .expect_validate_ticket()
        .returning(|_, _, _, _| Ok(ValidationOutcome::NotOwned));

    let err = usecase(ticket_repo)
        .validate_ticket(&company_user(), validate_model("TCK-999000"))
        .await
        .unwrap_err();

    assert!(matches!(err, TicketError::Forbidden(_)));
    assert_eq!(err.status_code(), axum::http::StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_customer_cannot_validate() {
    let mut ticket_repo = MockTicketRepository::new();
    ticket_repo.expect_validate_ticket().times(0);

    let err = usecase(ticket_repo)
        .validate_ticket(&customer_user(), validate_model("TCK-999000"))
        .await
        .unwrap_err();

    assert!(matches!(err, TicketError::Forbidden(_)));
}

#[tokio::test]
async fn test_structured_qr_payload_resolves_to_ticket_number() {
    let payload = build_qr_payload(Uuid::new_v4(), Uuid::new_v4(), "TCK-424242");

    let mut ticket_repo = MockTicketRepository::new();
    ticket_repo
        .expect_validate_ticket()
        .withf(|_, number, method, _| number == "TCK-424242" && *method == ValidationMethod::QrScan)
        .returning(|_, number, _, _| {
            Ok(ValidationOutcome::Validated(validated_dto(number, Utc::now())))
        });

    let result = usecase(ticket_repo)
        .validate_ticket(&company_user(), validate_model(&payload))
        .await
        .unwrap();
    assert_eq!(result.ticket_number, "TCK-424242");
}

#[tokio::test]
async fn test_unparseable_identifier_is_rejected_before_lookup() {
    let mut ticket_repo = MockTicketRepository::new();
    ticket_repo.expect_validate_ticket().times(0);

    let err = usecase(ticket_repo)
        .validate_ticket(&company_user(), validate_model("TICKET:only-two|parts"))
        .await
        .unwrap_err();

    assert!(matches!(err, TicketError::Validation(_)));
}

#[tokio::test]
async fn test_unknown_validation_method_is_rejected() {
    let mut ticket_repo = MockTicketRepository::new();
    ticket_repo.expect_validate_ticket().times(0);

    let err = usecase(ticket_repo)
        .validate_ticket(
            &company_user(),
            ValidateTicketModel {
                qr_code: "TCK-123456".to_string(),
                location: None,
                validation_method: Some("telepathy".to_string()),
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, TicketError::Validation(_)));
}

#[tokio::test]
async fn test_cancelled_ticket_conflicts() {
    let mut ticket_repo = MockTicketRepository::new();
    ticket_repo
        .expect_validate_ticket()
        .returning(|_, number, _, _| {
            Ok(ValidationOutcome::Cancelled {
                ticket_number: number.to_string(),
            })
        });

    let err = usecase(ticket_repo)
        .validate_ticket(&company_user(), validate_model("TCK-777777"))
        .await
        .unwrap_err();

    assert!(matches!(err, TicketError::Cancelled { .. }));
    assert_eq!(err.status_code(), axum::http::StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_batch_over_cap_rejected_before_processing() {
    let mut ticket_repo = MockTicketRepository::new();
    ticket_repo.expect_batch_validate().times(0);

    let err = usecase(ticket_repo)
        .batch_validate(
            &company_user(),
            BatchValidateModel {
                qr_codes: (0..51).map(|i| format!("TCK-{:06}", i)).collect(),
                location: None,
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, TicketError::Validation(_)));
}

#[tokio::test]
async fn test_batch_empty_rejected() {
    let mut ticket_repo = MockTicketRepository::new();
    ticket_repo.expect_batch_validate().times(0);

    let err = usecase(ticket_repo)
        .batch_validate(
            &company_user(),
            BatchValidateModel {
                qr_codes: vec![],
                location: None,
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, TicketError::Validation(_)));
}

#[tokio::test]
async fn test_batch_isolates_item_failures() {
    let mut ticket_repo = MockTicketRepository::new();
    ticket_repo
        .expect_batch_validate()
        // Only the three parseable identifiers reach the repository.
        .withf(|_, numbers, _| numbers.len() == 3)
        .returning(|_, numbers, _| {
            Ok(vec![
                ValidationOutcome::Validated(validated_dto(&numbers[0], Utc::now())),
                ValidationOutcome::NotFound,
                ValidationOutcome::AlreadyUsed {
                    ticket_number: numbers[2].clone(),
                    used_at: Utc::now(),
                },
            ])
        });

    let result = usecase(ticket_repo)
        .batch_validate(
            &company_user(),
            BatchValidateModel {
                qr_codes: vec![
                    "TCK-000001".to_string(),
                    "TICKET:bad|payload".to_string(),
                    "TCK-000002".to_string(),
                    "TCK-000003".to_string(),
                ],
                location: Some("Gate B".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(result.summary.total, 4);
    assert_eq!(result.summary.successful, 1);
    assert_eq!(result.summary.failed, 3);

    assert!(result.results[0].success);
    assert!(!result.results[1].success);
    assert_eq!(
        result.results[1].error.as_deref(),
        Some("Invalid QR code format")
    );
    assert_eq!(result.results[2].error.as_deref(), Some("Ticket not found"));
    assert_eq!(result.results[3].error.as_deref(), Some("Already used"));
}

#[tokio::test]
async fn test_get_ticket_scopes_by_role() {
    let ticket_id = Uuid::new_v4();
    let customer = customer_user();

    let ticket = TicketEntity {
        id: ticket_id,
        order_id: Uuid::new_v4(),
        event_id: Uuid::new_v4(),
        ticket_type_id: Uuid::new_v4(),
        ticket_number: "TCK-121212".to_string(),
        qr_code: "TICKET:x|EVENT:y|TOKEN:TCK-121212".to_string(),
        event_name: "Summer Fest".to_string(),
        event_location: "Main Arena".to_string(),
        event_date: Utc::now(),
        holder_name: None,
        holder_email: None,
        seat_number: None,
        section: None,
        status: TicketStatus::Valid.to_string(),
        used_at: None,
        created_at: Utc::now(),
    };

    let mut ticket_repo = MockTicketRepository::new();
    ticket_repo
        .expect_find_for_customer()
        .times(1)
        .returning(move |_, _| Ok(Some(ticket.clone())));
    ticket_repo.expect_find_for_company().times(0);

    let dto = usecase(ticket_repo)
        .get_ticket(&customer, ticket_id)
        .await
        .unwrap();
    assert_eq!(dto.ticket_number, "TCK-121212");

    // An unknown ticket reads as missing, whoever asks.
    let mut missing_repo = MockTicketRepository::new();
    missing_repo
        .expect_find_for_company()
        .returning(|_, _| Ok(None));
    let err = usecase(missing_repo)
        .get_ticket(&company_user(), ticket_id)
        .await
        .unwrap_err();
    assert!(matches!(err, TicketError::NotFound));
}

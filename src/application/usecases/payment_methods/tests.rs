use super::*;

use crate::domain::entities::payment_methods::PaymentMethodEntity;
use crate::domain::repositories::payment_methods::MockPaymentMethodRepository;

fn usecase(
    payment_method_repo: MockPaymentMethodRepository,
) -> PaymentMethodUseCase<MockPaymentMethodRepository> {
    PaymentMethodUseCase::new(Arc::new(payment_method_repo))
}

fn card_model(is_default: bool) -> CreatePaymentMethodModel {
    CreatePaymentMethodModel {
        method_type: "credit-card".to_string(),
        provider: Some("visa".to_string()),
        card_type: Some("debit".to_string()),
        cardholder_name: Some("Jamie Doe".to_string()),
        card_number: Some("4111 1111 1111 1234".to_string()),
        expiry_month: Some(11),
        expiry_year: Some(2028),
        is_default,
    }
}

#[tokio::test]
async fn test_add_persists_only_last_four_digits() {
    let user_id = Uuid::new_v4();

    let mut payment_method_repo = MockPaymentMethodRepository::new();
    payment_method_repo
        .expect_insert()
        .times(1)
        .withf(|entity| {
            entity.card_last4.as_deref() == Some("1234") && entity.method_type == "credit-card"
        })
        .returning(|entity| {
            Ok(PaymentMethodEntity {
                id: entity.id,
                user_id: entity.user_id,
                method_type: entity.method_type,
                provider: entity.provider,
                card_type: entity.card_type,
                cardholder_name: entity.cardholder_name,
                card_last4: entity.card_last4,
                expiry_month: entity.expiry_month,
                expiry_year: entity.expiry_year,
                is_default: entity.is_default,
                is_active: entity.is_active,
                created_at: entity.created_at,
            })
        });

    let dto = usecase(payment_method_repo)
        .add(user_id, card_model(true))
        .await
        .unwrap();

    assert_eq!(dto.card_last4.as_deref(), Some("1234"));
    assert_eq!(dto.expiry_date.as_deref(), Some("11/28"));
    assert!(dto.is_default);
}

#[tokio::test]
async fn test_add_rejects_unknown_type() {
    let mut model = card_model(false);
    model.method_type = "crypto".to_string();

    let mut payment_method_repo = MockPaymentMethodRepository::new();
    payment_method_repo.expect_insert().times(0);

    let err = usecase(payment_method_repo)
        .add(Uuid::new_v4(), model)
        .await
        .unwrap_err();

    assert!(matches!(err, PaymentMethodError::Validation(_)));
}

#[tokio::test]
async fn test_add_rejects_bad_expiry_month() {
    let mut model = card_model(false);
    model.expiry_month = Some(13);

    let err = usecase(MockPaymentMethodRepository::new())
        .add(Uuid::new_v4(), model)
        .await
        .unwrap_err();

    assert!(matches!(err, PaymentMethodError::Validation(_)));
}

#[tokio::test]
async fn test_update_unknown_method_is_not_found() {
    let mut payment_method_repo = MockPaymentMethodRepository::new();
    payment_method_repo
        .expect_set_default()
        .returning(|_, _| Ok(false));

    let err = usecase(payment_method_repo)
        .update(
            Uuid::new_v4(),
            Uuid::new_v4(),
            UpdatePaymentMethodModel { is_default: true },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, PaymentMethodError::NotFound));
}

#[tokio::test]
async fn test_delete_unknown_method_is_not_found() {
    let mut payment_method_repo = MockPaymentMethodRepository::new();
    payment_method_repo
        .expect_soft_delete()
        .returning(|_, _| Ok(false));

    let err = usecase(payment_method_repo)
        .delete(Uuid::new_v4(), Uuid::new_v4())
        .await
        .unwrap_err();

    assert!(matches!(err, PaymentMethodError::NotFound));
}

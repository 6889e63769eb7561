use super::*;

use crate::auth::decode_access_token;
use crate::domain::entities::sessions::SessionEntity;
use crate::domain::repositories::sessions::MockSessionRepository;
use crate::domain::repositories::users::MockUserRepository;

const ACCESS_SECRET: &str = "unit-test-access-secret";
const REFRESH_SECRET: &str = "unit-test-refresh-secret";

fn usecase(
    user_repo: MockUserRepository,
    session_repo: MockSessionRepository,
) -> AuthUseCase<MockUserRepository, MockSessionRepository> {
    AuthUseCase::new(
        Arc::new(user_repo),
        Arc::new(session_repo),
        UserSecret {
            secret: ACCESS_SECRET.to_string(),
            refresh_secret: REFRESH_SECRET.to_string(),
        },
        TokenLifetimes {
            access_ttl_seconds: 900,
            refresh_ttl_seconds: 604_800,
        },
    )
}

fn sample_user(password_hash: &str, role: UserRole, is_active: bool) -> UserEntity {
    UserEntity {
        id: Uuid::new_v4(),
        email: "buyer@example.com".to_string(),
        password_hash: password_hash.to_string(),
        role: role.to_string(),
        first_name: "Jamie".to_string(),
        last_name: "Doe".to_string(),
        company_name: None,
        phone: None,
        avatar_url: None,
        is_active,
        email_verified: false,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn register_model(user_type: &str) -> RegisterUserModel {
    RegisterUserModel {
        email: "buyer@example.com".to_string(),
        password: "hunter2hunter2".to_string(),
        first_name: "Jamie".to_string(),
        last_name: "Doe".to_string(),
        user_type: user_type.to_string(),
        company_name: None,
        phone: None,
    }
}

fn active_session(user_id: Uuid, token_hash: &str) -> SessionEntity {
    let now = Utc::now();
    SessionEntity {
        id: Uuid::new_v4(),
        user_id,
        token_hash: token_hash.to_string(),
        device_info: None,
        ip_address: None,
        expires_at: now + Duration::days(7),
        created_at: now,
        last_used_at: now,
        is_active: true,
    }
}

#[tokio::test]
async fn test_register_returns_token_pair_and_persists_session() {
    let mut user_repo = MockUserRepository::new();
    user_repo.expect_find_by_email().returning(|_| Ok(None));
    user_repo.expect_register().returning(|entity| {
        Ok(UserEntity {
            id: entity.id,
            email: entity.email,
            password_hash: entity.password_hash,
            role: entity.role,
            first_name: entity.first_name,
            last_name: entity.last_name,
            company_name: entity.company_name,
            phone: entity.phone,
            avatar_url: None,
            is_active: entity.is_active,
            email_verified: entity.email_verified,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    });

    let mut session_repo = MockSessionRepository::new();
    session_repo
        .expect_create()
        .times(1)
        .withf(|session| session.is_active && session.expires_at > Utc::now())
        .returning(|_| Ok(Uuid::new_v4()));

    let result = usecase(user_repo, session_repo)
        .register(register_model("customer"), ClientMeta::default())
        .await
        .unwrap();

    assert_eq!(result.user.user_type, "customer");
    // The access token must decode against the access secret.
    let claims = decode_access_token(&result.token, ACCESS_SECRET).unwrap();
    assert_eq!(claims.sub, result.user.id.to_string());
    assert!(!result.refresh_token.is_empty());
    assert_ne!(result.token, result.refresh_token);
}

#[tokio::test]
async fn test_register_rejects_taken_email_before_any_write() {
    let mut user_repo = MockUserRepository::new();
    user_repo.expect_find_by_email().returning(|_| {
        Ok(Some(sample_user("irrelevant", UserRole::Customer, true)))
    });
    user_repo.expect_register().times(0);

    let session_repo = MockSessionRepository::new();

    let err = usecase(user_repo, session_repo)
        .register(register_model("customer"), ClientMeta::default())
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::EmailAlreadyRegistered));
    assert_eq!(err.status_code(), axum::http::StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_company_requires_company_name() {
    let err = usecase(MockUserRepository::new(), MockSessionRepository::new())
        .register(register_model("company"), ClientMeta::default())
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::Validation(_)));
}

#[tokio::test]
async fn test_register_rejects_unknown_user_type() {
    let err = usecase(MockUserRepository::new(), MockSessionRepository::new())
        .register(register_model("admin"), ClientMeta::default())
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::Validation(_)));
}

#[tokio::test]
async fn test_login_succeeds_with_correct_password() {
    let password_hash = hash_password("hunter2hunter2").unwrap();
    let user = sample_user(&password_hash, UserRole::Customer, true);

    let mut user_repo = MockUserRepository::new();
    let found = user.clone();
    user_repo
        .expect_find_by_email()
        .returning(move |_| Ok(Some(found.clone())));

    let mut session_repo = MockSessionRepository::new();
    session_repo
        .expect_create()
        .times(1)
        .returning(|_| Ok(Uuid::new_v4()));

    let result = usecase(user_repo, session_repo)
        .login(
            LoginModel {
                email: "buyer@example.com".to_string(),
                password: "hunter2hunter2".to_string(),
            },
            ClientMeta::default(),
        )
        .await
        .unwrap();

    assert_eq!(result.user.id, user.id);
}

#[tokio::test]
async fn test_login_close_password_still_fails() {
    let password_hash = hash_password("hunter2hunter2").unwrap();

    let mut user_repo = MockUserRepository::new();
    user_repo.expect_find_by_email().returning(move |_| {
        Ok(Some(sample_user(&password_hash, UserRole::Customer, true)))
    });

    let err = usecase(user_repo, MockSessionRepository::new())
        .login(
            LoginModel {
                email: "buyer@example.com".to_string(),
                password: "hunter2hunter3".to_string(),
            },
            ClientMeta::default(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::InvalidCredentials));
    assert_eq!(err.status_code(), axum::http::StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_unknown_email_fails_identically() {
    let mut user_repo = MockUserRepository::new();
    user_repo.expect_find_by_email().returning(|_| Ok(None));

    let err = usecase(user_repo, MockSessionRepository::new())
        .login(
            LoginModel {
                email: "nobody@example.com".to_string(),
                password: "whatever123".to_string(),
            },
            ClientMeta::default(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::InvalidCredentials));
}

#[tokio::test]
async fn test_login_deactivated_account_fails() {
    let password_hash = hash_password("hunter2hunter2").unwrap();

    let mut user_repo = MockUserRepository::new();
    user_repo.expect_find_by_email().returning(move |_| {
        Ok(Some(sample_user(&password_hash, UserRole::Customer, false)))
    });

    let err = usecase(user_repo, MockSessionRepository::new())
        .login(
            LoginModel {
                email: "buyer@example.com".to_string(),
                password: "hunter2hunter2".to_string(),
            },
            ClientMeta::default(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::AccountDeactivated));
}

#[tokio::test]
async fn test_refresh_succeeds_on_live_session() {
    let user = sample_user("irrelevant", UserRole::Customer, true);
    let refresh_token = mint_refresh_token(user.id, REFRESH_SECRET, 604_800).unwrap();
    let token_hash = hash_refresh_token(&refresh_token);
    let session = active_session(user.id, &token_hash);
    let session_id = session.id;

    let mut user_repo = MockUserRepository::new();
    let found = user.clone();
    user_repo
        .expect_find_by_id()
        .returning(move |_| Ok(Some(found.clone())));

    let mut session_repo = MockSessionRepository::new();
    session_repo
        .expect_find_active_by_token_hash()
        .withf(move |hash| hash == token_hash)
        .returning(move |_| Ok(Some(session.clone())));
    session_repo
        .expect_touch_last_used()
        .times(1)
        .withf(move |id, _| *id == session_id)
        .returning(|_, _| Ok(()));

    let refreshed = usecase(user_repo, session_repo)
        .refresh_access_token(&refresh_token)
        .await
        .unwrap();

    let claims = decode_access_token(&refreshed.token, ACCESS_SECRET).unwrap();
    assert_eq!(claims.sub, user.id.to_string());
}

#[tokio::test]
async fn test_refresh_fails_after_revocation_even_if_unexpired() {
    let user_id = Uuid::new_v4();
    let refresh_token = mint_refresh_token(user_id, REFRESH_SECRET, 604_800).unwrap();

    let mut session_repo = MockSessionRepository::new();
    // Revoked sessions are invisible to the active lookup.
    session_repo
        .expect_find_active_by_token_hash()
        .returning(|_| Ok(None));
    session_repo.expect_touch_last_used().times(0);

    let err = usecase(MockUserRepository::new(), session_repo)
        .refresh_access_token(&refresh_token)
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::InvalidToken));
}

#[tokio::test]
async fn test_refresh_fails_on_stored_expiry() {
    let user_id = Uuid::new_v4();
    let refresh_token = mint_refresh_token(user_id, REFRESH_SECRET, 604_800).unwrap();
    let token_hash = hash_refresh_token(&refresh_token);

    let mut session = active_session(user_id, &token_hash);
    session.expires_at = Utc::now() - Duration::hours(1);

    let mut session_repo = MockSessionRepository::new();
    session_repo
        .expect_find_active_by_token_hash()
        .returning(move |_| Ok(Some(session.clone())));
    session_repo.expect_touch_last_used().times(0);

    let err = usecase(MockUserRepository::new(), session_repo)
        .refresh_access_token(&refresh_token)
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::InvalidToken));
}

#[tokio::test]
async fn test_refresh_rejects_access_token_type() {
    // An access token signed with the refresh secret still fails on the
    // type marker.
    let forged = mint_access_token(
        Uuid::new_v4(),
        UserRole::Customer,
        "a@b.com",
        REFRESH_SECRET,
        900,
    )
    .unwrap();

    let err = usecase(MockUserRepository::new(), MockSessionRepository::new())
        .refresh_access_token(&forged)
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::InvalidToken));
}

#[tokio::test]
async fn test_logout_is_idempotent() {
    let refresh_token = mint_refresh_token(Uuid::new_v4(), REFRESH_SECRET, 604_800).unwrap();

    let mut session_repo = MockSessionRepository::new();
    let mut revoked_once = false;
    session_repo
        .expect_revoke_by_token_hash()
        .times(2)
        .returning(move |_| {
            let first = !revoked_once;
            revoked_once = true;
            Ok(first)
        });

    let usecase = usecase(MockUserRepository::new(), session_repo);
    assert!(usecase.logout(Some(&refresh_token)).await.unwrap());
    assert!(!usecase.logout(Some(&refresh_token)).await.unwrap());
}

#[tokio::test]
async fn test_logout_without_token_is_noop() {
    let session_repo = MockSessionRepository::new();
    let result = usecase(MockUserRepository::new(), session_repo)
        .logout(None)
        .await
        .unwrap();
    assert!(!result);
}

#[tokio::test]
async fn test_change_password_checks_current() {
    let password_hash = hash_password("old-password-1").unwrap();
    let user = sample_user(&password_hash, UserRole::Customer, true);
    let user_id = user.id;

    let mut user_repo = MockUserRepository::new();
    user_repo
        .expect_find_by_id()
        .returning(move |_| Ok(Some(user.clone())));
    user_repo.expect_update_password_hash().times(0);

    let err = usecase(user_repo, MockSessionRepository::new())
        .change_password(
            user_id,
            ChangePasswordModel {
                current_password: "wrong-password".to_string(),
                new_password: "new-password-12".to_string(),
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::Validation(_)));
}

//! Unit tests for the in-memory verification code repository

use chrono::{Duration, Utc};

use crate::domain::entities::verification_code::VerificationCode;
use crate::errors::DomainError;
use crate::repositories::verification_code::{MockVerificationCodeRepository, VerificationCodeRepository};

#[tokio::test]
async fn test_invalidate_unused_only_touches_phone() {
    let repo = MockVerificationCodeRepository::new();
    repo.create(VerificationCode::new("13800000001", "111111")).await.unwrap();
    repo.create(VerificationCode::new("13800000001", "222222")).await.unwrap();
    repo.create(VerificationCode::new("13800000002", "333333")).await.unwrap();

    let invalidated = repo.invalidate_unused("13800000001").await.unwrap();
    assert_eq!(invalidated, 2);

    assert!(repo.codes_for("13800000001").await.iter().all(|c| c.used));
    assert!(repo.codes_for("13800000002").await.iter().all(|c| !c.used));
}

#[tokio::test]
async fn test_find_latest_created_since() {
    let repo = MockVerificationCodeRepository::new();
    let now = Utc::now();
    repo.insert_raw(VerificationCode::issued_at("13800000001", "111111", now - Duration::seconds(90)))
        .await;
    repo.insert_raw(VerificationCode::issued_at("13800000001", "222222", now - Duration::seconds(20)))
        .await;
    repo.insert_raw(VerificationCode::issued_at("13800000001", "333333", now - Duration::seconds(40)))
        .await;

    let latest = repo
        .find_latest_created_since("13800000001", now - Duration::seconds(60))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(latest.code, "222222");

    let none = repo
        .find_latest_created_since("13800000001", now - Duration::seconds(10))
        .await
        .unwrap();
    assert!(none.is_none());
}

#[tokio::test]
async fn test_mark_used_is_one_shot() {
    let repo = MockVerificationCodeRepository::new();
    let code = repo.create(VerificationCode::new("13800000001", "123456")).await.unwrap();

    assert!(repo.mark_used(code.id).await.unwrap());
    assert!(!repo.mark_used(code.id).await.unwrap());
}

#[tokio::test]
async fn test_delete_expired_ignores_used_state() {
    let repo = MockVerificationCodeRepository::new();
    let now = Utc::now();
    let mut used = VerificationCode::issued_at("13800000001", "111111", now - Duration::minutes(6));
    used.mark_as_used();
    repo.insert_raw(used).await;
    repo.insert_raw(VerificationCode::issued_at("13800000001", "222222", now - Duration::minutes(7)))
        .await;
    repo.insert_raw(VerificationCode::issued_at("13800000001", "333333", now)).await;

    assert_eq!(repo.delete_expired(now).await.unwrap(), 2);
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_failing_store() {
    let repo = MockVerificationCodeRepository::new();
    repo.set_failing(true);

    let result = repo.invalidate_unused("13800000001").await;
    assert!(matches!(result, Err(DomainError::Storage { .. })));
}

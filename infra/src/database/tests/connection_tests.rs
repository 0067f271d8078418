//! Tests for lazy connection handling that need no running database

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;

use sf_shared::DatabaseConfig;

use crate::database::connection::LazyDatabase;
use crate::InfrastructureError;

#[tokio::test]
async fn test_invalid_url_leaves_handle_empty() {
    let db = LazyDatabase::new(DatabaseConfig::new("not-a-database-url"));

    let first = db.pool().await;
    match first {
        Err(InfrastructureError::Connect(cause)) => {
            assert!(matches!(*cause, InfrastructureError::Config(_)))
        }
        other => panic!("expected a config failure, got {:?}", other.map(|_| ())),
    }
    assert!(!db.is_initialized());

    // A later call makes a fresh attempt instead of caching the failure
    let second = db.pool().await;
    assert!(second.is_err());
    assert!(!db.is_initialized());
}

#[tokio::test]
async fn test_concurrent_failures_do_not_poison_handle() {
    let db = Arc::new(LazyDatabase::new(DatabaseConfig::new("not-a-database-url")));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let db = db.clone();
            tokio::spawn(async move { db.pool().await.is_err() })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap());
    }
    assert!(!db.is_initialized());
    assert!(!db.health_check().await);
}

/// Accepts TCP connections but never sends the MySQL greeting
async fn silent_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    format!("mysql://user:pass@{}/simple_form", addr)
}

#[tokio::test]
async fn test_concurrent_callers_share_pending_attempt() {
    let url = silent_server().await;
    let db = Arc::new(LazyDatabase::new(
        DatabaseConfig::new(url).with_connect_timeout(1),
    ));

    let started = Instant::now();
    let handles: Vec<_> = (0..3)
        .map(|_| {
            let db = db.clone();
            tokio::spawn(async move { db.pool().await.is_err() })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap());
    }

    // One timed-out attempt serves every caller instead of one per caller
    let elapsed = started.elapsed();
    assert!(elapsed < Duration::from_millis(1900), "callers waited {:?}", elapsed);
    assert!(!db.is_initialized());
}

#[tokio::test]
async fn test_health_check_answers_quickly_when_store_hangs() {
    let url = silent_server().await;
    let db = LazyDatabase::new(DatabaseConfig::new(url).with_connect_timeout(30));

    let answer = tokio::time::timeout(Duration::from_secs(5), db.health_check()).await;
    assert_eq!(answer, Ok(false));
}

#[tokio::test]
#[ignore = "requires a running MySQL instance (DATABASE_URL)"]
async fn test_connects_and_migrates() {
    dotenvy::dotenv().ok();
    let db = LazyDatabase::new(DatabaseConfig::from_env().with_max_connections(2));

    let pool = db.pool().await.expect("database should be reachable");
    assert!(pool.health_check().await.unwrap());
    assert!(db.is_initialized());
    assert!(pool.get_statistics().max_connections >= 1);

    db.close().await;
}

//! Delivery channel tests against a throwaway local HTTP endpoint

use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::Mutex;

use sf_core::services::verification::CodeDeliveryTrait;
use sf_shared::SmsConfig;

use super::*;

/// Serves one request with `status`, recording the request line
async fn one_shot_server(status: &'static str) -> (String, Arc<Mutex<Option<String>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    let seen = Arc::new(Mutex::new(None));
    let recorder = seen.clone();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buffer = vec![0u8; 4096];
        let read = socket.read(&mut buffer).await.unwrap();
        let request = String::from_utf8_lossy(&buffer[..read]).to_string();
        *recorder.lock().await = request.lines().next().map(str::to_owned);

        let response = format!(
            "HTTP/1.1 {}\r\ncontent-length: 2\r\nconnection: close\r\n\r\nok",
            status
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
    });

    (format!("http://{}/send/abc?token=t1", address), seen)
}

#[test]
fn test_request_url_sets_code_and_targets() {
    let delivery = PushCodeDelivery::new("https://push.example.com/send/abc?code=old&x=1", 5).unwrap();
    let url = delivery.request_url("13812345678", "123456");

    let pairs: Vec<(String, String)> = url.query_pairs().map(|(k, v)| (k.into_owned(), v.into_owned())).collect();
    assert_eq!(
        pairs,
        vec![
            ("x".to_string(), "1".to_string()),
            ("code".to_string(), "123456".to_string()),
            ("targets".to_string(), "13812345678".to_string()),
        ]
    );
}

#[test]
fn test_invalid_push_url_is_config_error() {
    let result = PushCodeDelivery::new("not a url", 5);
    assert!(matches!(result, Err(InfrastructureError::Config(_))));
}

#[tokio::test]
async fn test_push_success() {
    let (url, seen) = one_shot_server("200 OK").await;
    let delivery = PushCodeDelivery::new(&url, 5).unwrap();

    let message_id = delivery.send_verification_code("13812345678", "654321").await.unwrap();
    assert!(message_id.starts_with("push_"));

    let request_line = seen.lock().await.clone().unwrap();
    assert!(request_line.starts_with("GET /send/abc?"));
    assert!(request_line.contains("token=t1"));
    assert!(request_line.contains("code=654321"));
    assert!(request_line.contains("targets=13812345678"));
}

#[tokio::test]
async fn test_push_error_status_fails() {
    let (url, _) = one_shot_server("500 Internal Server Error").await;
    let delivery = PushCodeDelivery::new(&url, 5).unwrap();

    let error = delivery.send_verification_code("13812345678", "654321").await.unwrap_err();
    assert!(error.contains("500"));
}

#[tokio::test]
async fn test_console_delivery_counts_messages() {
    let delivery = ConsoleCodeDelivery::quiet();
    delivery.send_verification_code("13812345678", "111111").await.unwrap();
    delivery.send_verification_code("13812345678", "222222").await.unwrap();

    assert_eq!(delivery.get_message_count(), 2);
    assert_eq!(delivery.provider_name(), "console");
}

#[test]
fn test_factory_selects_channel() {
    let console = create_code_delivery(&SmsConfig::default()).unwrap();
    assert_eq!(console.provider_name(), "console");

    let push = create_code_delivery(&SmsConfig::default().with_push_url("https://push.example.com/x")).unwrap();
    assert_eq!(push.provider_name(), "push");
}

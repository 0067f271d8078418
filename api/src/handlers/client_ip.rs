use actix_web::HttpRequest;

/// Client address from forwarding headers, falling back to the peer address
///
/// Takes the first entry of `X-Forwarded-For`, then `X-Real-IP`, then the
/// socket peer. Returns `"unknown"` when none is available.
pub fn extract_client_ip(req: &HttpRequest) -> String {
    if let Some(forwarded) = req
        .headers()
        .get("X-Forwarded-For")
        .and_then(|value| value.to_str().ok())
    {
        if let Some(ip) = forwarded.split(',').next().map(str::trim).filter(|ip| !ip.is_empty()) {
            return ip.to_string();
        }
    }

    if let Some(real_ip) = req
        .headers()
        .get("X-Real-IP")
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
    {
        return real_ip.to_string();
    }

    req.peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_forwarded_for_wins() {
        let req = TestRequest::default()
            .insert_header(("X-Forwarded-For", "203.0.113.7, 10.0.0.1"))
            .insert_header(("X-Real-IP", "198.51.100.2"))
            .to_http_request();
        assert_eq!(extract_client_ip(&req), "203.0.113.7");
    }

    #[test]
    fn test_real_ip_fallback() {
        let req = TestRequest::default()
            .insert_header(("X-Real-IP", "198.51.100.2"))
            .to_http_request();
        assert_eq!(extract_client_ip(&req), "198.51.100.2");
    }

    #[test]
    fn test_peer_address_fallback() {
        let req = TestRequest::default()
            .peer_addr("192.0.2.10:51000".parse().unwrap())
            .to_http_request();
        assert_eq!(extract_client_ip(&req), "192.0.2.10");
    }

    #[test]
    fn test_unknown_without_any_source() {
        let req = TestRequest::default().to_http_request();
        assert_eq!(extract_client_ip(&req), "unknown");
    }
}

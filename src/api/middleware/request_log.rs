//! Per-request access log with client address and device class.

use axum::{
    extract::{ConnectInfo, Request},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use std::fmt;
use std::net::SocketAddr;
use std::time::Instant;

/// Coarse client platform derived from the User-Agent header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceType {
    Android,
    IPhone,
    Windows,
    Mac,
    Linux,
    Unknown,
}

impl DeviceType {
    pub fn from_user_agent(user_agent: &str) -> Self {
        // Android agents also mention Linux, iPhone agents mention Mac OS
        if user_agent.contains("Android") {
            Self::Android
        } else if user_agent.contains("iPhone") {
            Self::IPhone
        } else if user_agent.contains("Windows") {
            Self::Windows
        } else if user_agent.contains("Macintosh") {
            Self::Mac
        } else if user_agent.contains("Linux") {
            Self::Linux
        } else {
            Self::Unknown
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Android => "Android",
            Self::IPhone => "iPhone",
            Self::Windows => "Windows",
            Self::Mac => "Mac",
            Self::Linux => "Linux",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve the client address: X-Forwarded-For, then X-Real-IP, then the peer.
fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    if let Some(first) = header("X-Forwarded-For").and_then(|v| v.split(',').next()) {
        return first.trim().to_string();
    }
    if let Some(real_ip) = header("X-Real-IP") {
        return real_ip.to_string();
    }

    peer.map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Log method, path, status, latency, client IP and device for every request.
///
/// 5xx responses log at error, 4xx at warn, everything else at info.
pub async fn request_log_middleware(request: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let ip = client_ip(request.headers(), peer);
    let device = request
        .headers()
        .get(axum::http::header::USER_AGENT)
        .and_then(|h| h.to_str().ok())
        .map(DeviceType::from_user_agent)
        .unwrap_or(DeviceType::Unknown);

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let latency_ms = started.elapsed().as_millis() as u64;

    if response.status().is_server_error() {
        tracing::error!(%method, %path, status, latency_ms, %ip, %device, "request failed");
    } else if response.status().is_client_error() {
        tracing::warn!(%method, %path, status, latency_ms, %ip, %device, "request rejected");
    } else {
        tracing::info!(%method, %path, status, latency_ms, %ip, %device, "request handled");
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_device_type_from_user_agent() {
        let cases = [
            ("Mozilla/5.0 (Linux; Android 14; Pixel 8)", DeviceType::Android),
            ("Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)", DeviceType::IPhone),
            ("Mozilla/5.0 (Windows NT 10.0; Win64; x64)", DeviceType::Windows),
            ("Mozilla/5.0 (Macintosh; Intel Mac OS X 14_0)", DeviceType::Mac),
            ("Mozilla/5.0 (X11; Linux x86_64)", DeviceType::Linux),
            ("curl/8.4.0", DeviceType::Unknown),
        ];

        for (agent, expected) in cases {
            assert_eq!(DeviceType::from_user_agent(agent), expected, "{agent}");
        }
    }

    #[test]
    fn test_client_ip_prefers_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert("X-Forwarded-For", HeaderValue::from_static("10.0.0.1, 10.0.0.2"));
        headers.insert("X-Real-IP", HeaderValue::from_static("10.0.0.9"));

        assert_eq!(client_ip(&headers, None), "10.0.0.1");
    }

    #[test]
    fn test_client_ip_fallbacks() {
        let mut headers = HeaderMap::new();
        let peer: SocketAddr = "192.168.1.5:4000".parse().unwrap();

        assert_eq!(client_ip(&headers, Some(peer)), "192.168.1.5");
        assert_eq!(client_ip(&headers, None), "unknown");

        headers.insert("X-Real-IP", HeaderValue::from_static("10.0.0.9"));
        assert_eq!(client_ip(&headers, Some(peer)), "10.0.0.9");
    }
}

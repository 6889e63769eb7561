use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::{Arc, Mutex};

use axum::extract::{ConnectInfo, Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use tracing::warn;

/// Coarse fixed-window request counter keyed by client address. Process-local
/// by design: it resets on restart and is not shared between instances. The
/// handle is created in `http_serve::start` and passed into the middleware —
/// there is no process-wide singleton.
pub struct RateLimiter {
    requests_per_minute: u32,
    windows: Mutex<HashMap<IpAddr, (i64, u32)>>,
}

impl RateLimiter {
    pub fn new(requests_per_minute: u32) -> Self {
        Self {
            requests_per_minute,
            windows: Mutex::new(HashMap::new()),
        }
    }

    pub fn try_acquire(&self, client: IpAddr) -> bool {
        let minute = Utc::now().timestamp() / 60;
        let mut windows = self
            .windows
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let entry = windows.entry(client).or_insert((minute, 0));
        if entry.0 != minute {
            *entry = (minute, 0);
        }
        if entry.1 >= self.requests_per_minute {
            return false;
        }
        entry.1 += 1;
        true
    }
}

pub async fn limit_by_client_addr(
    State(limiter): State<Arc<RateLimiter>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Response {
    if !limiter.try_acquire(addr.ip()) {
        warn!(client = %addr.ip(), "http: rate limit exceeded");
        return (
            StatusCode::TOO_MANY_REQUESTS,
            "Too many requests".to_string(),
        )
            .into_response();
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_caps_and_resets_per_client() {
        let limiter = RateLimiter::new(3);
        let client: IpAddr = "10.0.0.1".parse().unwrap();
        let other: IpAddr = "10.0.0.2".parse().unwrap();

        assert!(limiter.try_acquire(client));
        assert!(limiter.try_acquire(client));
        assert!(limiter.try_acquire(client));
        assert!(!limiter.try_acquire(client));

        // Another client has its own window.
        assert!(limiter.try_acquire(other));
    }
}

use actix_web::HttpRequest;

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, SystemTime};

/// Allowance for one kind of request per client address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    pub scope: &'static str,
    pub max_requests: usize,
    pub window: Duration,
}

impl RateLimit {
    pub const LOGIN: RateLimit = RateLimit {
        scope: "login",
        max_requests: 5,
        window: Duration::from_secs(300),
    };

    pub const REGISTRATION: RateLimit = RateLimit {
        scope: "register",
        max_requests: 10,
        window: Duration::from_secs(3600),
    };
}

/// Sliding-window rate limiter kept in process memory.
pub struct RateLimiter {
    requests: Mutex<HashMap<String, Vec<SystemTime>>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            requests: Mutex::new(HashMap::new()),
        }
    }

    /// Records one request for `key` and reports whether it fits the window.
    pub fn check_rate_limit(&self, key: &str, max_requests: usize, window: Duration) -> bool {
        let now = SystemTime::now();
        let mut requests = self
            .requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let entry = requests.entry(key.to_string()).or_default();

        entry.retain(|&time| now.duration_since(time).unwrap_or(Duration::from_secs(0)) < window);

        if entry.len() >= max_requests {
            return false;
        }

        entry.push(now);

        requests.retain(|_, times| !times.is_empty());

        true
    }

    /// Applies `limit` to the client that sent `req`.
    pub fn allow(&self, req: &HttpRequest, limit: RateLimit) -> bool {
        let key = client_key(req, limit.scope);
        let allowed = self.check_rate_limit(&key, limit.max_requests, limit.window);

        if !allowed {
            tracing::warn!(%key, "rate limit exceeded");
        }

        allowed
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

pub fn client_key(req: &HttpRequest, scope: &str) -> String {
    let client_ip = req
        .connection_info()
        .realip_remote_addr()
        .unwrap_or("unknown")
        .to_string();

    format!("{}:{}", scope, client_ip)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_after_the_allowance_is_spent() {
        let limiter = RateLimiter::new();
        let window = Duration::from_secs(60);

        assert!(limiter.check_rate_limit("login:1.2.3.4", 2, window));
        assert!(limiter.check_rate_limit("login:1.2.3.4", 2, window));
        assert!(!limiter.check_rate_limit("login:1.2.3.4", 2, window));
        assert!(limiter.check_rate_limit("login:5.6.7.8", 2, window));
    }

    #[test]
    fn zero_window_never_blocks() {
        let limiter = RateLimiter::new();

        for _ in 0..10 {
            assert!(limiter.check_rate_limit("k", 1, Duration::ZERO));
        }
    }
}

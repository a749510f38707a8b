//! Sliding-window rate limiter
//!
//! Limits requests per client IP over a fixed window. Two instances are
//! used at the HTTP layer: a strict one for signup/login attempts and a
//! looser one for authenticated API traffic.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Per-IP sliding window rate limiter
pub struct RateLimiter {
    /// Request timestamps by client IP
    requests: Arc<RwLock<HashMap<IpAddr, Vec<DateTime<Utc>>>>>,
    /// Window length
    window: Duration,
    /// Maximum requests per window
    max_requests: usize,
}

impl RateLimiter {
    /// Create a new rate limiter allowing `max_requests` per `window`.
    pub fn new(window: Duration, max_requests: usize) -> Self {
        Self {
            requests: Arc::new(RwLock::new(HashMap::new())),
            window,
            max_requests,
        }
    }

    /// Check whether a request from `ip` is allowed and record it if so.
    ///
    /// Rejected requests are not recorded, so a limited client does not
    /// keep pushing its own window forward by retrying.
    pub async fn allow(&self, ip: IpAddr) -> bool {
        let mut requests = self.requests.write().await;
        let now = Utc::now();
        let cutoff = now - self.window;

        let entries = requests.entry(ip).or_insert_with(Vec::new);
        entries.retain(|time| *time > cutoff);

        if entries.len() >= self.max_requests {
            return false;
        }

        entries.push(now);
        true
    }

    /// Drop stale entries (should be called periodically).
    pub async fn cleanup(&self) {
        let cutoff = Utc::now() - self.window;

        let mut requests = self.requests.write().await;
        requests.retain(|_, times| {
            times.retain(|time| *time > cutoff);
            !times.is_empty()
        });
    }

    /// Number of IPs currently tracked.
    #[cfg(test)]
    async fn tracked_ips(&self) -> usize {
        self.requests.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn ip(s: &str) -> IpAddr {
        IpAddr::from_str(s).unwrap()
    }

    #[tokio::test]
    async fn test_allows_up_to_limit() {
        let limiter = RateLimiter::new(Duration::minutes(15), 5);
        let client = ip("127.0.0.1");

        for _ in 0..5 {
            assert!(limiter.allow(client).await);
        }

        // Sixth request within the window is rejected
        assert!(!limiter.allow(client).await);
    }

    #[tokio::test]
    async fn test_rejected_requests_do_not_extend_window() {
        let limiter = RateLimiter::new(Duration::minutes(15), 2);
        let client = ip("127.0.0.1");

        assert!(limiter.allow(client).await);
        assert!(limiter.allow(client).await);

        // Repeated rejections keep the recorded count at the limit
        for _ in 0..10 {
            assert!(!limiter.allow(client).await);
        }
    }

    #[tokio::test]
    async fn test_limits_are_per_ip() {
        let limiter = RateLimiter::new(Duration::minutes(15), 1);

        assert!(limiter.allow(ip("10.0.0.1")).await);
        assert!(!limiter.allow(ip("10.0.0.1")).await);

        // A different client is unaffected
        assert!(limiter.allow(ip("10.0.0.2")).await);
    }

    #[tokio::test]
    async fn test_window_expiry() {
        // Zero-length window: every recorded request is already stale
        let limiter = RateLimiter::new(Duration::zero(), 1);
        let client = ip("127.0.0.1");

        assert!(limiter.allow(client).await);
        assert!(limiter.allow(client).await);
    }

    #[tokio::test]
    async fn test_cleanup_drops_stale_ips() {
        let limiter = RateLimiter::new(Duration::zero(), 5);

        limiter.allow(ip("10.0.0.1")).await;
        limiter.allow(ip("10.0.0.2")).await;
        assert_eq!(limiter.tracked_ips().await, 2);

        limiter.cleanup().await;
        assert_eq!(limiter.tracked_ips().await, 0);
    }
}

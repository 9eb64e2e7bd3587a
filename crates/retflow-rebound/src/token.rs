//! In-process cache for the partner bearer token.
//!
//! The Rebound API issues short-lived client-credentials tokens. One token is
//! live at a time; callers check the cache before hitting the token endpoint
//! again. Absence (empty or expired) is a normal return value, never an error,
//! and an expired entry is left in place until the next `store` or `clear`.

use chrono::Utc;
use tokio::sync::Mutex;

/// A bearer token together with its computed expiry instant.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub access_token: String,
    /// Epoch milliseconds after which the token is no longer usable.
    pub expires_at_ms: i64,
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at_ms: i64,
}

/// Single-slot token cache. Construct one per process (or per test) and share
/// it behind an `Arc`; `store` is last-write-wins, which is safe under races
/// because token issuance is idempotent.
#[derive(Debug, Default)]
pub struct TokenCache {
    slot: Mutex<Option<CachedToken>>,
}

impl TokenCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites the cached token unconditionally.
    pub async fn store(&self, token: impl Into<String>, expires_at_ms: i64) {
        let mut slot = self.slot.lock().await;
        *slot = Some(CachedToken {
            value: token.into(),
            expires_at_ms,
        });
    }

    /// Returns the cached token only while it is unexpired.
    pub async fn get(&self) -> Option<String> {
        let slot = self.slot.lock().await;
        slot.as_ref()
            .filter(|t| Utc::now().timestamp_millis() < t.expires_at_ms)
            .map(|t| t.value.clone())
    }

    /// True iff a token is cached and unexpired.
    pub async fn is_valid(&self) -> bool {
        self.get().await.is_some()
    }

    /// Resets to the empty state.
    pub async fn clear(&self) {
        let mut slot = self.slot.lock().await;
        *slot = None;
    }
}

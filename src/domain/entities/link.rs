//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A shortened URL link with click-tracking metadata.
///
/// Represents the mapping between a short code and a target URL. The `code`
/// and `url` fields are immutable after creation; only `clicks` and
/// `last_clicked_at` change over the link's lifetime.
#[derive(Debug, Clone, FromRow)]
pub struct Link {
    pub id: i64,
    pub code: String,
    pub url: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub last_clicked_at: Option<DateTime<Utc>>,
}

/// Input data for creating a new link.
///
/// `id`, `clicks`, and timestamps are assigned by the storage layer.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub code: String,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_link_has_no_clicks() {
        let link = Link {
            id: 1,
            code: "abc123".to_string(),
            url: "https://example.com".to_string(),
            clicks: 0,
            created_at: Utc::now(),
            last_clicked_at: None,
        };

        assert_eq!(link.clicks, 0);
        assert!(link.last_clicked_at.is_none());
    }

    #[test]
    fn test_new_link_creation() {
        let new_link = NewLink {
            code: "xyz789".to_string(),
            url: "https://rust-lang.org".to_string(),
        };

        assert_eq!(new_link.code, "xyz789");
        assert_eq!(new_link.url, "https://rust-lang.org");
    }
}

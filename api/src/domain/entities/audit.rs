//! Audit metadata shared by every persisted entity

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Who created or last touched a record, and when.
///
/// Stamped explicitly by the service layer: `created` on insert, `touch` on
/// every subsequent write. Creation also fills the update pair so a fresh
/// record reads the same way it would after a no-op update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditFields {
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<String>,
}

impl AuditFields {
    pub fn created(at: DateTime<Utc>, by: &str) -> Self {
        Self {
            created_at: at,
            created_by: by.to_string(),
            updated_at: Some(at),
            updated_by: Some(by.to_string()),
        }
    }

    /// Record a modification. The creation pair is never rewritten.
    pub fn touch(&mut self, at: DateTime<Utc>, by: &str) {
        self.updated_at = Some(at);
        self.updated_by = Some(by.to_string());
    }
}

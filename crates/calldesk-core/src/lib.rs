pub mod agent;
pub mod labels;
pub mod legacy;
pub mod summary;
pub mod transcript;

pub use agent::{Agent, NewAgent};
pub use labels::*;
pub use legacy::{is_legacy, normalize_legacy};
pub use summary::{Insights, PolicyDetails, Summary, SummaryRecord};
pub use transcript::{Message, NewTranscript, Transcript};

use serde::{Deserialize, Serialize};

/// Labels in first-seen order, without duplicates. Equality ignores order;
/// serializes as a JSON array.
pub type LabelSet<T> = indexmap::IndexSet<T>;

/// Store-owned bookkeeping, flattened into every persisted record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Timestamps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Timestamps {
    /// Keep an existing `created_at`, always refresh `updated_at`.
    pub fn touch(&mut self, now: &str) {
        if self.created_at.is_none() {
            self.created_at = Some(now.to_string());
        }
        self.updated_at = Some(now.to_string());
    }
}

/// Current UTC time as RFC 3339.
pub fn now_rfc3339() -> String {
    let now = time::OffsetDateTime::now_utc();
    now.format(&time::format_description::well_known::Rfc3339)
        .expect("RFC3339 formatting should not fail")
}

/// Fresh entity id (UUID v4, hyphenated lowercase).
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Parse an RFC 3339 timestamp; `None` when absent or malformed.
pub fn parse_rfc3339(ts: Option<&str>) -> Option<time::OffsetDateTime> {
    ts.and_then(|s| {
        time::OffsetDateTime::parse(s, &time::format_description::well_known::Rfc3339).ok()
    })
}

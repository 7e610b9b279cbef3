//! Webhook payload assembly

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::alert::AlertContent;

/// One alert in the receiver's webhook format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPayload {
    pub labels: BTreeMap<String, String>,
    pub annotations: BTreeMap<String, String>,
    pub starts_at: String,
    #[serde(rename = "generatorURL")]
    pub generator_url: String,
    /// Absent, not null, while the alert is still firing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<String>,
}

/// Format a timestamp as RFC 3339 in UTC with second precision
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
}

impl NotificationPayload {
    pub fn new(
        content: &AlertContent<'_>,
        labels: BTreeMap<String, String>,
        annotations: BTreeMap<String, String>,
        generator_url: &str,
    ) -> Self {
        Self {
            labels,
            annotations,
            starts_at: format_timestamp(content.starts_at),
            generator_url: generator_url.to_string(),
            ends_at: content.ends_at().map(format_timestamp),
        }
    }
}

/// Serialize alerts as the compact JSON array the receiver expects
pub fn serialize_payloads(payloads: &[NotificationPayload]) -> crate::Result<String> {
    Ok(serde_json::to_string(payloads)?)
}

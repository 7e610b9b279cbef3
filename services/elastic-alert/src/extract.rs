//! Field extraction from the representative hit

use std::collections::BTreeMap;

use crate::document::Document;

/// Maximum length, in characters, of each well-known extracted field
pub const MAX_FIELD_LENGTH: usize = 1024;

const MESSAGE_FIELD: &str = "@message";
const PLAIN_MESSAGE_FIELD: &str = "message";
const STACK_TRACE_FIELD: &str = "@stackTrace";
const APP_NAME_FIELD: &str = "@appname";
const ENV_FIELD: &str = "@env";

/// Well-known fields pulled from a log document, plus every string field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    pub message: String,
    pub stack_trace: String,
    pub app_name: String,
    pub env: String,
    /// All string-valued source fields, untruncated
    pub extras: BTreeMap<String, String>,
}

/// Cut `value` to at most `max` characters, never splitting a code point
pub fn truncate_chars(value: &str, max: usize) -> &str {
    match value.char_indices().nth(max) {
        Some((byte_idx, _)) => &value[..byte_idx],
        None => value,
    }
}

fn bounded(value: Option<&str>) -> String {
    value
        .map(|v| truncate_chars(v, MAX_FIELD_LENGTH).to_string())
        .unwrap_or_default()
}

/// Extract the well-known fields and extras from a document
pub fn extract_fields(document: &Document) -> ExtractedFields {
    let message = document
        .get_str(MESSAGE_FIELD)
        .or_else(|| document.get_str(PLAIN_MESSAGE_FIELD));

    let extras = document
        .string_fields()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    let fields = ExtractedFields {
        message: bounded(message),
        stack_trace: bounded(document.get_str(STACK_TRACE_FIELD)),
        app_name: bounded(document.get_str(APP_NAME_FIELD)),
        env: bounded(document.get_str(ENV_FIELD)),
        extras,
    };

    tracing::debug!(
        "Extracted fields from {:?}: appname='{}', env='{}', message {} chars, {} extras",
        document.id(),
        fields.app_name,
        fields.env,
        fields.message.chars().count(),
        fields.extras.len()
    );

    fields
}

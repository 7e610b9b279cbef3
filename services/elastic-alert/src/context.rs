//! Render context and output label construction
//!
//! Both maps start from their own copy of the rule labels. The render
//! context is the wide one fed to annotation templates; output labels are
//! the narrow set sent to the receiver.

use std::collections::BTreeMap;

use crate::alert::{Match, Rule};
use crate::extract::ExtractedFields;

pub type RenderContext = BTreeMap<String, String>;

pub const VALUE_KEY: &str = "value";
pub const GENERATOR_URL_KEY: &str = "generatorURL";
pub const ERROR_MSG_KEY: &str = "errorMsg";
pub const APP_NAME_KEY: &str = "appname";
pub const ENV_KEY: &str = "env";
pub const STACK_TRACE_KEY: &str = "newStackTrace";

/// Merge, lowest precedence first: rule labels, hit count, generator URL,
/// extracted fields, then document extras.
pub fn build_render_context(
    rule: &Rule,
    matched: &Match,
    generator_url: &str,
    fields: &ExtractedFields,
) -> RenderContext {
    let mut data = rule.query.labels.clone();
    data.insert(VALUE_KEY.to_string(), matched.hits.to_string());
    data.insert(GENERATOR_URL_KEY.to_string(), generator_url.to_string());
    data.insert(STACK_TRACE_KEY.to_string(), fields.stack_trace.clone());
    data.insert(ERROR_MSG_KEY.to_string(), fields.message.clone());
    data.insert(APP_NAME_KEY.to_string(), fields.app_name.clone());
    data.insert(ENV_KEY.to_string(), fields.env.clone());

    for (key, value) in &fields.extras {
        if let Some(previous) = data.insert(key.clone(), value.clone()) {
            if previous != *value {
                tracing::debug!("Document field '{}' overrides context value", key);
            }
        }
    }

    data
}

/// Rule labels plus the extracted error message
pub fn build_output_labels(rule: &Rule, fields: &ExtractedFields) -> BTreeMap<String, String> {
    let mut labels = rule.query.labels.clone();
    labels.insert(ERROR_MSG_KEY.to_string(), fields.message.clone());
    labels
}

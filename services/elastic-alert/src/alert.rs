//! Rules, matches and the alert compilation unit

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::EsConfig;

/// Static alerting rule, owned by the rule registry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub unique_id: String,
    #[serde(default)]
    pub file_path: String,
    #[serde(default)]
    pub query: RuleQuery,
}

/// Label and annotation definitions of a rule
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleQuery {
    /// Literal labels
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    /// Annotation templates, rendered per alert
    #[serde(default)]
    pub annotations: BTreeMap<String, String>,
}

/// Result of evaluating a rule
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// Matched document ids, in evaluation order
    pub ids: Vec<String>,
    /// Total number of hits
    #[serde(default)]
    pub hits: u64,
}

/// Lifecycle of an alert; the resolution time lives only here
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertState {
    Pending,
    Resolved { ends_at: DateTime<Utc> },
}

impl fmt::Display for AlertState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertState::Pending => write!(f, "Pending"),
            AlertState::Resolved { .. } => write!(f, "Resolved"),
        }
    }
}

/// A single compilation unit. Borrows its rule and match; never mutates them.
#[derive(Debug, Clone, Copy)]
pub struct AlertContent<'a> {
    pub rule: &'a Rule,
    pub matched: &'a Match,
    pub starts_at: DateTime<Utc>,
    pub state: AlertState,
}

impl<'a> AlertContent<'a> {
    pub fn pending(rule: &'a Rule, matched: &'a Match, starts_at: DateTime<Utc>) -> Self {
        Self {
            rule,
            matched,
            starts_at,
            state: AlertState::Pending,
        }
    }

    pub fn resolved(
        rule: &'a Rule,
        matched: &'a Match,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
    ) -> Self {
        Self {
            rule,
            matched,
            starts_at,
            state: AlertState::Resolved { ends_at },
        }
    }

    pub fn has_resolved(&self) -> bool {
        matches!(self.state, AlertState::Resolved { .. })
    }

    pub fn ends_at(&self) -> Option<DateTime<Utc>> {
        match self.state {
            AlertState::Pending => None,
            AlertState::Resolved { ends_at } => Some(ends_at),
        }
    }

    /// Stable key for suppressing duplicate notifications of this match
    pub fn dedup_key(&self) -> String {
        crate::dedup::dedup_key(&self.matched.ids)
    }
}

/// Where to fetch the documents behind a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertSampleMessage {
    #[serde(default)]
    pub es: Option<EsConfig>,
    pub index: String,
    #[serde(default)]
    pub ids: Vec<String>,
}

/// Compiled alert handed to delivery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertMessage {
    #[serde(rename = "id")]
    pub unique_id: String,
    pub path: String,
    /// JSON-encoded notification payload array
    pub payload: String,
    #[serde(rename = "StartsAt")]
    pub starts_at: DateTime<Utc>,
}

//! Alertmanager webhook payload model.
//!
//! Field names are decoded the way Alertmanager spells them (camelCase,
//! `externalURL`, `generatorURL`) and serialized as snake_case so templates
//! see `group_labels`, `generator_url` and friends.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sorted label/annotation map.
pub type KeyValue = BTreeMap<String, String>;

/// Lifecycle state of an alert or an alert group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Firing,
    Resolved,
}

impl fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertStatus::Firing => write!(f, "firing"),
            AlertStatus::Resolved => write!(f, "resolved"),
        }
    }
}

/// A single alert inside a webhook batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct Alert {
    pub status: AlertStatus,
    #[serde(default)]
    pub labels: KeyValue,
    #[serde(default)]
    pub annotations: KeyValue,
    #[serde(default)]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ends_at: Option<DateTime<Utc>>,
    /// Link back to the expression graph that produced the alert.
    #[serde(default, rename(deserialize = "generatorURL"))]
    pub generator_url: String,
    #[serde(default)]
    pub fingerprint: String,
}

impl Alert {
    pub fn is_firing(&self) -> bool {
        self.status == AlertStatus::Firing
    }
}

/// One inbound webhook invocation: a group of alerts plus the labels shared
/// by the group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct WebhookMessage {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub group_key: String,
    #[serde(default)]
    pub truncated_alerts: u64,
    pub status: AlertStatus,
    #[serde(default)]
    pub receiver: String,
    #[serde(default)]
    pub group_labels: KeyValue,
    #[serde(default)]
    pub common_labels: KeyValue,
    #[serde(default)]
    pub common_annotations: KeyValue,
    #[serde(default, rename(deserialize = "externalURL"))]
    pub external_url: String,
    #[serde(default)]
    pub alerts: Vec<Alert>,
}

impl WebhookMessage {
    /// Firing alerts, in the order they were received.
    pub fn firing(&self) -> Vec<&Alert> {
        self.alerts.iter().filter(|a| a.is_firing()).collect()
    }

    /// Resolved alerts, in the order they were received.
    pub fn resolved(&self) -> Vec<&Alert> {
        self.alerts.iter().filter(|a| !a.is_firing()).collect()
    }
}

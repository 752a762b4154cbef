use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single alert event as handed over by the alerting pipeline.
///
/// The serde shape matches the pipeline's webhook payload: camelCase
/// timestamp keys, `labels` and `annotations` as flat string maps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    status: AlertStatus,
    starts_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ends_at: Option<DateTime<Utc>>,
    #[serde(default)]
    labels: BTreeMap<String, String>,
    #[serde(default)]
    annotations: BTreeMap<String, String>,
}

impl Alert {
    pub fn builder() -> AlertBuilder {
        AlertBuilder {
            status: AlertStatus::Firing,
            starts_at: Utc::now(),
            ends_at: None,
            labels: BTreeMap::new(),
            annotations: BTreeMap::new(),
        }
    }

    pub fn status(&self) -> AlertStatus {
        self.status
    }

    pub fn starts_at(&self) -> DateTime<Utc> {
        self.starts_at
    }

    /// End timestamp. Only meaningful for resolved alerts.
    pub fn ends_at(&self) -> Option<DateTime<Utc>> {
        self.ends_at
    }

    pub fn label(&self, name: &str) -> Option<&str> {
        self.labels.get(name).map(String::as_str)
    }

    pub fn annotation(&self, name: &str) -> Option<&str> {
        self.annotations.get(name).map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Firing,
    Resolved,
}

impl AlertStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertStatus::Firing => "firing",
            AlertStatus::Resolved => "resolved",
        }
    }
}

pub struct AlertBuilder {
    status: AlertStatus,
    starts_at: DateTime<Utc>,
    ends_at: Option<DateTime<Utc>>,
    labels: BTreeMap<String, String>,
    annotations: BTreeMap<String, String>,
}

impl AlertBuilder {
    pub fn status(mut self, status: AlertStatus) -> Self {
        self.status = status;
        self
    }

    pub fn starts_at(mut self, starts_at: DateTime<Utc>) -> Self {
        self.starts_at = starts_at;
        self
    }

    pub fn ends_at(mut self, ends_at: DateTime<Utc>) -> Self {
        self.ends_at.replace(ends_at);
        self
    }

    pub fn label(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(name.into(), value.into());
        self
    }

    pub fn annotation(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotations.insert(name.into(), value.into());
        self
    }

    pub fn build(self) -> Alert {
        self.into()
    }
}

impl From<AlertBuilder> for Alert {
    fn from(builder: AlertBuilder) -> Self {
        Self {
            status: builder.status,
            starts_at: builder.starts_at,
            ends_at: builder.ends_at,
            labels: builder.labels,
            annotations: builder.annotations,
        }
    }
}

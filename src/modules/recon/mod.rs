pub mod email;
pub mod phone;
pub mod username;

use std::collections::BTreeMap;

use chrono::{SecondsFormat, Utc};
use serde::{Serialize, Serializer};

/// Tri-state existence verdict; `Unknown` is never collapsed into a bool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exists {
    Yes,
    No,
    Unknown,
}

// Reports render the verdict as true / false / null.
impl Serialize for Exists {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Exists::Yes => serializer.serialize_bool(true),
            Exists::No => serializer.serialize_bool(false),
            Exists::Unknown => serializer.serialize_none(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProbeOutcome {
    pub url: Option<String>,
    pub http_status: Option<u16>,
    pub exists: Exists,
    pub note: Option<String>,
}

impl ProbeOutcome {
    pub fn unknown(note: impl Into<String>) -> Self {
        Self {
            url: None,
            http_status: None,
            exists: Exists::Unknown,
            note: Some(note.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UsernameReport {
    pub username: String,
    pub checked: BTreeMap<String, ProbeOutcome>,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct PhoneReport {
    pub phone: String,
    pub cleaned: String,
    pub checked: BTreeMap<String, ProbeOutcome>,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BreachRecord {
    pub name: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EmailReport {
    pub email: String,
    pub breaches: Vec<BreachRecord>,
    pub errors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub timestamp: String,
}

pub fn now_ts() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exists_serializes_tri_state() {
        assert_eq!(serde_json::to_string(&Exists::Yes).unwrap(), "true");
        assert_eq!(serde_json::to_string(&Exists::No).unwrap(), "false");
        assert_eq!(serde_json::to_string(&Exists::Unknown).unwrap(), "null");
    }
}

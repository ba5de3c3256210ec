use std::fmt;

use serde::{Deserialize, Serialize};

/// A uniquely identifying ID for a JSON-RPC request.
/// Can be a string or a number, but never null.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    String(String),
    Number(i64),
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestId::String(s) => write!(f, "{}", s),
            RequestId::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<i64> for RequestId {
    fn from(n: i64) -> Self {
        RequestId::Number(n)
    }
}

impl From<&str> for RequestId {
    fn from(s: &str) -> Self {
        RequestId::String(s.to_string())
    }
}

impl From<String> for RequestId {
    fn from(s: String) -> Self {
        RequestId::String(s)
    }
}

impl RequestId {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            RequestId::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            RequestId::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// The `id` slot of an incoming request.
///
/// JSON-RPC 2.0 distinguishes a missing `id` field from `"id": null`. Both
/// mark the request as a notification, but they are different wire shapes and
/// the difference must stay observable, so the slot is a tri-state rather
/// than a nested `Option`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum IdSlot {
    /// No `id` field at all.
    #[default]
    Absent,
    /// `"id": null`.
    Null,
    /// A string or number id.
    Id(RequestId),
}

impl IdSlot {
    /// True when the field was missing entirely. Used by serde to skip the
    /// field on the wire.
    pub fn is_absent(&self) -> bool {
        matches!(self, IdSlot::Absent)
    }

    /// A request with an absent or null id is a notification and must never
    /// produce a response.
    pub fn is_notification(&self) -> bool {
        matches!(self, IdSlot::Absent | IdSlot::Null)
    }

    pub fn as_id(&self) -> Option<&RequestId> {
        match self {
            IdSlot::Id(id) => Some(id),
            _ => None,
        }
    }
}

impl From<RequestId> for IdSlot {
    fn from(id: RequestId) -> Self {
        IdSlot::Id(id)
    }
}

impl Serialize for IdSlot {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            // Absent is normally skipped at the field level via
            // `skip_serializing_if`; fall back to null if it isn't.
            IdSlot::Absent | IdSlot::Null => serializer.serialize_none(),
            IdSlot::Id(id) => id.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for IdSlot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // Only reached when the field is present; an absent field takes the
        // `Default` path instead.
        let id = Option::<RequestId>::deserialize(deserializer)?;
        Ok(match id {
            Some(id) => IdSlot::Id(id),
            None => IdSlot::Null,
        })
    }
}

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Record identifier as sent by the backend: numeric or string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

pub type UserId = RecordId;

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId::Number(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        let value = value.trim();
        value
            .parse::<i64>()
            .map(RecordId::Number)
            .unwrap_or_else(|_| RecordId::Text(value.to_string()))
    }
}

/// Profile of the signed-in user.
///
/// Opaque to the session layer beyond being stored and handed back; fields
/// the backend adds are kept in `extra` and round-trip untouched.
///
/// The id is read from `id`, or from `_id` when `id` is absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UserProfileWire")]
pub struct UserProfile {
    pub id: UserId,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Deserialize)]
struct UserProfileWire {
    #[serde(default)]
    id: Option<UserId>,
    #[serde(default, rename = "_id")]
    document_id: Option<UserId>,
    #[serde(default)]
    username: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    gender: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl TryFrom<UserProfileWire> for UserProfile {
    type Error = &'static str;

    fn try_from(wire: UserProfileWire) -> Result<Self, Self::Error> {
        let id = wire.id.or(wire.document_id).ok_or("missing field `id`")?;
        Ok(Self {
            id,
            username: wire.username,
            email: wire.email,
            gender: wire.gender,
            extra: wire.extra,
        })
    }
}

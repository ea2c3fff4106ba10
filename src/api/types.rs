//! Response shapes for the endpoint groups.
//!
//! Known fields are typed; everything else the backend sends lands in
//! `extra` so hosts can still display it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::session::RecordId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrugCategory {
    #[serde(alias = "_id")]
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One reference pronunciation recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrugSound {
    #[serde(default)]
    pub gender: String,
    pub file: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drug {
    #[serde(alias = "_id")]
    pub id: RecordId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub molecular_formula: Option<String>,
    #[serde(default)]
    pub categories: Vec<RecordId>,
    #[serde(default, alias = "description", skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(default)]
    pub sounds: Vec<DrugSound>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A drug on the user's learning list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningEntry {
    #[serde(alias = "_id")]
    pub id: RecordId,
    #[serde(default, alias = "drugId", skip_serializing_if = "Option::is_none")]
    pub drug_id: Option<RecordId>,
    #[serde(default, alias = "isLearned", alias = "learned")]
    pub completed: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    #[serde(default, alias = "userId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<RecordId>,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Score returned by the evaluation backend, 0 to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

//! The signed-in user's learning list.

use serde::Serialize;
use serde_json::Value;

use crate::session::RecordId;
use crate::transport::{ApiRequest, TransportClient, TransportError};

use super::types::LearningEntry;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AddBody<'a> {
    drug_id: &'a RecordId,
}

pub async fn add(transport: &TransportClient, drug_id: &RecordId) -> Result<LearningEntry, TransportError> {
    let request = ApiRequest::post("/learning").json(&AddBody { drug_id })?;
    transport.send(request).await
}

pub async fn list(transport: &TransportClient) -> Result<Vec<LearningEntry>, TransportError> {
    transport.send(ApiRequest::get("/learning")).await
}

pub async fn mark_learned(
    transport: &TransportClient,
    learning_id: &RecordId,
) -> Result<Option<LearningEntry>, TransportError> {
    transport
        .send(ApiRequest::patch(format!("/learning/{}/complete", learning_id)))
        .await
}

pub async fn remove(transport: &TransportClient, learning_id: &RecordId) -> Result<(), TransportError> {
    transport
        .send::<Option<Value>>(ApiRequest::delete(format!("/learning/{}", learning_id)))
        .await?;
    Ok(())
}

/// Progress summary; its shape is owned by the backend.
pub async fn progress(transport: &TransportClient) -> Result<Value, TransportError> {
    transport.send(ApiRequest::get("/learning/progress")).await
}

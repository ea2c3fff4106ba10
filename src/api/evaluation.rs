//! Pronunciation recordings and their evaluation.
//!
//! Scoring happens on the backend; this module only uploads recordings and
//! reads results back.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::multipart::{Form, Part};
use serde_json::Value;

use crate::session::RecordId;
use crate::transport::{ApiRequest, TransportClient, TransportError};

use super::types::EvaluationResult;

const RECORDING_MIME: &str = "audio/m4a";

fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}

pub(crate) fn recording_file_name(millis: u128) -> String {
    format!("recording_{}.m4a", millis)
}

pub(crate) fn recording_form(drug_id: &RecordId, audio: Vec<u8>, file_name: String) -> Result<Form, TransportError> {
    let part = Part::bytes(audio)
        .file_name(file_name)
        .mime_str(RECORDING_MIME)
        .map_err(|e| TransportError::request_build(format!("Invalid audio part: {}", e)))?;
    Ok(Form::new()
        .part("audio", part)
        .text("drugId", drug_id.to_string()))
}

/// Upload a recording held in memory.
pub async fn submit_recording(
    transport: &TransportClient,
    drug_id: &RecordId,
    audio: Vec<u8>,
) -> Result<EvaluationResult, TransportError> {
    let form = recording_form(drug_id, audio, recording_file_name(unix_millis()))?;
    transport
        .send(ApiRequest::post("/evaluation").multipart(form))
        .await
}

/// Upload a recording from disk.
pub async fn submit_recording_file(
    transport: &TransportClient,
    drug_id: &RecordId,
    path: &Path,
) -> Result<EvaluationResult, TransportError> {
    let audio = tokio::fs::read(path).await.map_err(|e| {
        TransportError::request_build(format!("Failed to read recording '{}': {}", path.display(), e))
    })?;
    submit_recording(transport, drug_id, audio).await
}

/// Tips for one drug; free-form, owned by the backend.
pub async fn tips(transport: &TransportClient, drug_id: &RecordId) -> Result<Value, TransportError> {
    transport
        .send(ApiRequest::get(format!("/evaluation/tips/{}", drug_id)))
        .await
}

pub async fn history(transport: &TransportClient) -> Result<Vec<EvaluationResult>, TransportError> {
    transport.send(ApiRequest::get("/evaluation/history")).await
}

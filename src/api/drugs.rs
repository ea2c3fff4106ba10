//! Drug catalogue: categories, per-category listings, details, search.

use crate::session::RecordId;
use crate::transport::{ApiRequest, TransportClient, TransportError};

use super::types::{Drug, DrugCategory};

pub async fn categories(transport: &TransportClient) -> Result<Vec<DrugCategory>, TransportError> {
    transport.send(ApiRequest::get("/drugs/categories")).await
}

pub async fn by_category(
    transport: &TransportClient,
    category_id: &RecordId,
) -> Result<Vec<Drug>, TransportError> {
    transport
        .send(ApiRequest::get(format!("/drugs/category/{}", category_id)))
        .await
}

pub async fn details(transport: &TransportClient, drug_id: &RecordId) -> Result<Drug, TransportError> {
    transport
        .send(ApiRequest::get(format!("/drugs/{}", drug_id)))
        .await
}

/// Search by name. The query is URL-encoded.
pub async fn search(transport: &TransportClient, query: &str) -> Result<Vec<Drug>, TransportError> {
    transport
        .send(ApiRequest::get("/drugs/search").query("q", query))
        .await
}

//! Community leaderboard and activity feed.

use serde_json::Value;

use crate::session::RecordId;
use crate::transport::{ApiRequest, TransportClient, TransportError};

use super::types::LeaderboardEntry;

pub async fn leaderboard(transport: &TransportClient) -> Result<Vec<LeaderboardEntry>, TransportError> {
    transport.send(ApiRequest::get("/community/leaderboard")).await
}

pub async fn user_rank(
    transport: &TransportClient,
    user_id: &RecordId,
) -> Result<LeaderboardEntry, TransportError> {
    transport
        .send(ApiRequest::get(format!("/community/rank/{}", user_id)))
        .await
}

pub async fn recent_activity(transport: &TransportClient) -> Result<Value, TransportError> {
    transport.send(ApiRequest::get("/community/activity")).await
}

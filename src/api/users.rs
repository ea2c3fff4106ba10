//! User profiles beyond the signed-in session.

use std::path::Path;

use reqwest::multipart::{Form, Part};

use crate::session::{UserId, UserProfile};
use crate::transport::{ApiRequest, TransportClient, TransportError};

const AVATAR_MIME: &str = "image/jpeg";

pub async fn profile(transport: &TransportClient, user_id: &UserId) -> Result<UserProfile, TransportError> {
    transport
        .send(ApiRequest::get(format!("/users/{}", user_id)))
        .await
}

/// Replace the avatar with a JPEG read from `path`.
pub async fn update_avatar(
    transport: &TransportClient,
    user_id: &UserId,
    path: &Path,
) -> Result<UserProfile, TransportError> {
    let image = tokio::fs::read(path).await.map_err(|e| {
        TransportError::request_build(format!("Failed to read avatar '{}': {}", path.display(), e))
    })?;
    let part = Part::bytes(image)
        .file_name(format!("avatar_{}.jpg", user_id))
        .mime_str(AVATAR_MIME)
        .map_err(|e| TransportError::request_build(format!("Invalid avatar part: {}", e)))?;

    transport
        .send(ApiRequest::patch(format!("/users/{}/avatar", user_id)).multipart(Form::new().part("avatar", part)))
        .await
}

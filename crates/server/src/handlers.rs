//! Webhook, reload and health endpoints.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use ding_core::WebhookMessage;
use tracing::{error, info, warn};

use crate::state::AppState;

type HandlerResult = Result<(StatusCode, String), (StatusCode, String)>;

/// Relay one Alertmanager webhook to the robot behind `profile`.
///
/// 404 for an unknown profile, 400 for an undecodable payload, 500 when the
/// notification cannot be built or delivered or DingTalk rejects it.
pub(crate) async fn send_notification(
    State(state): State<Arc<AppState>>,
    Path(profile): Path<String>,
    body: Bytes,
) -> HandlerResult {
    let Some(url) = state.profiles.get(&profile) else {
        warn!(profile = %profile, "unknown profile");
        return Err((StatusCode::NOT_FOUND, "Profile not found".to_string()));
    };

    let message: WebhookMessage = serde_json::from_slice(&body).map_err(|e| {
        error!(profile = %profile, error = %e, "cannot decode webhook payload");
        (StatusCode::BAD_REQUEST, "Bad Request".to_string())
    })?;

    let notification = state.builder.build(&message).map_err(|e| {
        error!(profile = %profile, error = %e, "failed to build notification");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to build notification".to_string(),
        )
    })?;

    let ack = state.client.send(url, &notification).await.map_err(|e| {
        error!(profile = %profile, error = %e, "failed to send notification");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to send notification".to_string(),
        )
    })?;

    if !ack.is_success() {
        error!(
            profile = %profile,
            errcode = ack.errcode,
            errmsg = %ack.errmsg,
            "DingTalk rejected notification"
        );
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            "Unable to talk to DingTalk".to_string(),
        ));
    }

    info!(
        profile = %profile,
        alerts = message.alerts.len(),
        mentions = notification.at.at_mobiles.len(),
        "notification delivered"
    );
    Ok((StatusCode::OK, "OK".to_string()))
}

/// Re-read the mention file. The old directory stays active on failure.
pub(crate) async fn reload(State(state): State<Arc<AppState>>) -> HandlerResult {
    let Some(path) = state.mention_file.as_deref() else {
        return Err((
            StatusCode::BAD_REQUEST,
            "No mention file configured".to_string(),
        ));
    };

    match state.mentions.load(path) {
        Ok(keywords) => {
            info!(path = %path.display(), keywords, "reloaded mention directory");
            Ok((StatusCode::OK, "OK".to_string()))
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "mention reload failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to reload mention file: {e}"),
            ))
        }
    }
}

pub(crate) async fn healthy() -> &'static str {
    "OK"
}

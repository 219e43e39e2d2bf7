//! DingTalk robot webhook client.
//!
//! One POST per notification. No retries: the caller decides what to do
//! with a failure.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;

use crate::error::NotifyError;
use crate::message::{DingTalkResponse, Notification};

/// Delivers notifications to robot webhook URLs.
#[derive(Debug, Clone)]
pub struct DingTalkClient {
    /// Shared HTTP client (connection pooling).
    client: reqwest::Client,
}

impl DingTalkClient {
    /// Create a client whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(NotifyError::Request)?;
        Ok(Self { client })
    }

    /// Wrap an already configured HTTP client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// POST `notification` to `url` and decode the robot's acknowledgment.
    ///
    /// Anything but HTTP 200 is [`NotifyError::UnacceptableStatus`] and the
    /// body is not decoded. A 200 response whose `errcode` is non-zero is
    /// returned as `Ok`; check [`DingTalkResponse::is_success`].
    pub async fn send(
        &self,
        url: &str,
        notification: &Notification,
    ) -> Result<DingTalkResponse, NotifyError> {
        let body = serde_json::to_vec(notification).map_err(NotifyError::Encode)?;

        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .build()
            .map_err(NotifyError::Request)?;

        let response = self
            .client
            .execute(request)
            .await
            .map_err(NotifyError::Transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(NotifyError::UnacceptableStatus {
                code: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(NotifyError::Transport)?;
        let ack: DingTalkResponse =
            serde_json::from_slice(&bytes).map_err(|source| NotifyError::Decode {
                what: "response from DingTalk",
                source,
            })?;

        tracing::debug!(
            %status,
            errcode = ack.errcode,
            errmsg = %ack.errmsg,
            "DingTalk notification delivered"
        );

        Ok(ack)
    }
}

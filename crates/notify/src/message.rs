//! DingTalk robot message and response types.

use serde::{Deserialize, Serialize};

/// Robot message type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Markdown,
}

/// An outbound robot message.
///
/// Serializes to the markdown schema:
/// `{"msgtype":"markdown","markdown":{"title":..,"text":..},"at":{"atMobiles":[..]}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(rename = "msgtype")]
    pub msg_type: MessageType,
    pub markdown: Markdown,
    pub at: At,
    /// One button per firing alert, linking to its source graph. The markdown
    /// schema has no place for them, so they never go over the wire.
    #[serde(skip)]
    pub buttons: Vec<Button>,
}

impl Notification {
    pub fn markdown(
        title: String,
        text: String,
        at_mobiles: Vec<String>,
        buttons: Vec<Button>,
    ) -> Self {
        Self {
            msg_type: MessageType::Markdown,
            markdown: Markdown { title, text },
            at: At { at_mobiles },
            buttons,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Markdown {
    pub title: String,
    pub text: String,
}

/// Mobile numbers to highlight in the group chat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct At {
    #[serde(default)]
    pub at_mobiles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub title: String,
    #[serde(rename = "actionURL")]
    pub action_url: String,
}

/// Robot acknowledgment. `errcode` 0 means the message was accepted; the
/// HTTP status is 200 for most rejections too.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DingTalkResponse {
    #[serde(default)]
    pub errcode: i64,
    #[serde(default)]
    pub errmsg: String,
}

impl DingTalkResponse {
    pub fn is_success(&self) -> bool {
        self.errcode == 0
    }
}

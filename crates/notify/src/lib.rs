//! DingTalk notification pipeline for Alertmanager webhooks.
//!
//! This crate provides:
//! - `MentionDirectory`: keyword → mobile number map, swapped wholesale on reload
//! - `TemplateEngine`: minijinja rendering of the title and content templates
//! - `NotificationBuilder`: turns an alert batch into a markdown `Notification`
//! - `DingTalkClient`: single-attempt delivery to a robot webhook URL

pub mod builder;
pub mod client;
pub mod error;
pub mod mentions;
pub mod message;
pub mod templating;

pub use builder::NotificationBuilder;
pub use client::DingTalkClient;
pub use error::{NotifyError, NotifyErrorKind};
pub use mentions::MentionDirectory;
pub use message::{At, Button, DingTalkResponse, Markdown, MessageType, Notification};
pub use templating::TemplateEngine;

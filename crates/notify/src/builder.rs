//! Turns an Alertmanager batch into a DingTalk markdown notification.

use std::sync::Arc;

use ding_core::WebhookMessage;

use crate::error::NotifyError;
use crate::mentions::MentionDirectory;
use crate::message::{Button, Notification};
use crate::templating::{TemplateEngine, CONTENT_TEMPLATE, TITLE_TEMPLATE};

/// Builds notifications from alert batches.
///
/// Holds the template engine and a handle to the shared mention directory,
/// so a directory reload is visible to the next `build` call.
#[derive(Debug, Clone)]
pub struct NotificationBuilder {
    templates: Arc<TemplateEngine>,
    mentions: MentionDirectory,
}

impl NotificationBuilder {
    pub fn new(templates: Arc<TemplateEngine>, mentions: MentionDirectory) -> Self {
        Self {
            templates,
            mentions,
        }
    }

    pub fn mentions(&self) -> &MentionDirectory {
        &self.mentions
    }

    /// Render title and body, attach one graph button per firing alert and
    /// mention every target whose keyword appears in the rendered body.
    ///
    /// Keywords are matched against the body as rendered, not against the
    /// ` @target ` annotations appended here.
    pub fn build(&self, message: &WebhookMessage) -> Result<Notification, NotifyError> {
        let title = self.templates.execute_text_string(TITLE_TEMPLATE, message)?;
        let mut text = self.templates.execute_text_string(CONTENT_TEMPLATE, message)?;

        let buttons = message
            .firing()
            .into_iter()
            .enumerate()
            .map(|(i, alert)| Button {
                title: format!("Graph for alert #{}", i + 1),
                action_url: alert.generator_url.clone(),
            })
            .collect();

        let at_mobiles = self.mentions.matches(&text);
        for target in &at_mobiles {
            text.push_str(" @");
            text.push_str(target);
            text.push(' ');
        }

        Ok(Notification::markdown(title, text, at_mobiles, buttons))
    }
}

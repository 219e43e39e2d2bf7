//! Minijinja rendering of notification titles and bodies.
//!
//! Templates are registered by name. Two defaults ship with the crate,
//! [`TITLE_TEMPLATE`] and [`CONTENT_TEMPLATE`]; a template directory can
//! override either of them or add helpers, one `*.tmpl` file per template,
//! named after the file stem.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use ding_core::{Alert, WebhookMessage};
use serde::Serialize;

use crate::error::NotifyError;

/// Name of the template that renders the message title.
pub const TITLE_TEMPLATE: &str = "ding.link.title";
/// Name of the template that renders the markdown body.
pub const CONTENT_TEMPLATE: &str = "ding.link.content";

const TEMPLATE_EXTENSION: &str = "tmpl";

/// What a template sees when it renders.
///
/// The webhook message fields sit at the top level (`status`, `receiver`,
/// `group_labels`, `alerts`, ...), alongside precomputed views that
/// templates cannot derive themselves.
#[derive(Debug, Serialize)]
pub struct TemplateData<'a> {
    #[serde(flatten)]
    message: &'a WebhookMessage,
    /// Firing alerts in original order.
    firing: Vec<&'a Alert>,
    /// Resolved alerts in original order.
    resolved: Vec<&'a Alert>,
    /// Common labels that are not also group labels.
    extra_labels: BTreeMap<&'a str, &'a str>,
}

impl<'a> TemplateData<'a> {
    pub fn new(message: &'a WebhookMessage) -> Self {
        let extra_labels = message
            .common_labels
            .iter()
            .filter(|(name, _)| !message.group_labels.contains_key(*name))
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect();

        Self {
            message,
            firing: message.firing(),
            resolved: message.resolved(),
            extra_labels,
        }
    }
}

/// Named-template renderer.
#[derive(Debug)]
pub struct TemplateEngine {
    env: minijinja::Environment<'static>,
}

impl TemplateEngine {
    /// Create an engine with the built-in title and content templates.
    pub fn with_defaults() -> Result<Self, NotifyError> {
        let mut env = Self::build_env();
        env.add_template(TITLE_TEMPLATE, include_str!("../templates/ding.link.title.tmpl"))?;
        env.add_template(
            CONTENT_TEMPLATE,
            include_str!("../templates/ding.link.content.tmpl"),
        )?;
        Ok(Self { env })
    }

    /// Create an engine with the defaults plus every `*.tmpl` file in `dir`.
    ///
    /// A file named `ding.link.title.tmpl` replaces the default title
    /// template. Syntax errors surface here rather than on first render.
    pub fn from_dir(dir: &Path) -> Result<Self, NotifyError> {
        let mut engine = Self::with_defaults()?;

        let io_err = |source| NotifyError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let mut paths = Vec::new();
        for entry in fs::read_dir(dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            let is_template = path.is_file()
                && path
                    .extension()
                    .and_then(|e| e.to_str())
                    .map(|e| e == TEMPLATE_EXTENSION)
                    .unwrap_or(false);
            if is_template {
                paths.push(path);
            }
        }
        paths.sort();

        for path in paths {
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let source = fs::read_to_string(&path).map_err(|source| NotifyError::Io {
                path: path.clone(),
                source,
            })?;
            tracing::debug!(template = name, path = %path.display(), "registering template");
            engine.add_template(name.to_string(), source)?;
        }

        Ok(engine)
    }

    /// Register (or replace) a named template.
    pub fn add_template(&mut self, name: String, source: String) -> Result<(), NotifyError> {
        self.env.add_template_owned(name, source)?;
        Ok(())
    }

    /// Render the template registered as `name` against `message`.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Template`] if no such template exists or
    /// rendering fails.
    pub fn execute_text_string(
        &self,
        name: &str,
        message: &WebhookMessage,
    ) -> Result<String, NotifyError> {
        let template = self.env.get_template(name)?;
        Ok(template.render(TemplateData::new(message))?)
    }

    /// Check that the templates the notification builder needs are present.
    pub fn validate(&self) -> Result<(), NotifyError> {
        for name in [TITLE_TEMPLATE, CONTENT_TEMPLATE] {
            self.env.get_template(name)?;
        }
        Ok(())
    }

    fn build_env() -> minijinja::Environment<'static> {
        let mut env = minijinja::Environment::new();
        // Block tags sit on their own lines in the markdown templates.
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);

        // Explicit versions so label values render the same with or
        // without the `builtins` feature.
        env.add_filter("lower", lower_filter);
        env.add_filter("upper", upper_filter);
        env
    }
}

/// Custom filter: lowercase a string.
fn lower_filter(value: String) -> String {
    value.to_lowercase()
}

/// Custom filter: uppercase a string.
fn upper_filter(value: String) -> String {
    value.to_uppercase()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use ding_core::AlertStatus;

    use super::*;

    fn labels(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn alert(status: AlertStatus, instance: &str) -> Alert {
        Alert {
            status,
            labels: labels(&[("alertname", "HighLoad"), ("instance", instance)]),
            annotations: labels(&[("summary", "load is high")]),
            starts_at: None,
            ends_at: None,
            generator_url: format!("http://prometheus/graph?instance={instance}"),
            fingerprint: String::new(),
        }
    }

    fn sample_message() -> WebhookMessage {
        WebhookMessage {
            version: "4".to_string(),
            group_key: "{}:{alertname=\"HighLoad\"}".to_string(),
            truncated_alerts: 0,
            status: AlertStatus::Firing,
            receiver: "ding".to_string(),
            group_labels: labels(&[("alertname", "HighLoad")]),
            common_labels: labels(&[("alertname", "HighLoad"), ("severity", "page")]),
            common_annotations: BTreeMap::new(),
            external_url: "http://alertmanager:9093".to_string(),
            alerts: vec![
                alert(AlertStatus::Firing, "a:9100"),
                alert(AlertStatus::Resolved, "b:9100"),
                alert(AlertStatus::Firing, "c:9100"),
            ],
        }
    }

    #[test]
    fn default_title() {
        let engine = TemplateEngine::with_defaults().unwrap();
        let title = engine
            .execute_text_string(TITLE_TEMPLATE, &sample_message())
            .unwrap();
        assert_eq!(title, "[FIRING:2] HighLoad (page)");
    }

    #[test]
    fn default_title_resolved_without_extra_labels() {
        let engine = TemplateEngine::with_defaults().unwrap();
        let mut msg = sample_message();
        msg.status = AlertStatus::Resolved;
        msg.common_labels = msg.group_labels.clone();

        let title = engine.execute_text_string(TITLE_TEMPLATE, &msg).unwrap();
        assert_eq!(title, "[RESOLVED] HighLoad");
    }

    #[test]
    fn default_content_lists_firing_alerts_only() {
        let engine = TemplateEngine::with_defaults().unwrap();
        let body = engine
            .execute_text_string(CONTENT_TEMPLATE, &sample_message())
            .unwrap();

        assert!(body.starts_with(
            "#### \\[FIRING:2\\] **[HighLoad](http://alertmanager:9093/#/alerts?receiver=ding)**"
        ));
        assert!(body.contains("> - instance: a:9100\n"));
        assert!(body.contains("> - instance: c:9100\n"));
        assert!(!body.contains("b:9100"));
        assert!(body.contains("> - summary: load is high\n"));
        assert!(body.contains(
            "**Source:** [http://prometheus/graph?instance=a:9100](http://prometheus/graph?instance=a:9100)"
        ));
        assert_eq!(body.matches("**Labels**").count(), 2);
    }

    #[test]
    fn empty_batch_renders() {
        let engine = TemplateEngine::with_defaults().unwrap();
        let mut msg = sample_message();
        msg.alerts.clear();

        let body = engine.execute_text_string(CONTENT_TEMPLATE, &msg).unwrap();
        assert!(body.starts_with("#### \\[FIRING:0\\]"));
        assert!(!body.contains("**Labels**"));
    }

    #[test]
    fn unknown_template_is_template_error() {
        let engine = TemplateEngine::with_defaults().unwrap();
        match engine.execute_text_string("ding.missing", &sample_message()) {
            Err(NotifyError::Template(_)) => {}
            other => panic!("expected Template error, got: {other:?}"),
        }
    }

    #[test]
    fn added_template_sees_precomputed_views() {
        let mut engine = TemplateEngine::with_defaults().unwrap();
        engine
            .add_template(
                "summary".to_string(),
                "{{ receiver }} / {{ firing | length }} / {{ resolved | length }}".to_string(),
            )
            .unwrap();
        assert_eq!(
            engine.execute_text_string("summary", &sample_message()).unwrap(),
            "ding / 2 / 1"
        );
    }

    #[test]
    fn lower_and_upper_filters() {
        let mut engine = TemplateEngine::with_defaults().unwrap();
        engine
            .add_template(
                "case".to_string(),
                "{{ common_labels.severity | upper }}/{{ group_labels.alertname | lower }}"
                    .to_string(),
            )
            .unwrap();
        assert_eq!(
            engine.execute_text_string("case", &sample_message()).unwrap(),
            "PAGE/highload"
        );
    }

    #[test]
    fn render_failure_is_template_error() {
        let mut engine = TemplateEngine::with_defaults().unwrap();
        engine
            .add_template(
                "include".to_string(),
                "{% include \"ding.not.registered\" %}".to_string(),
            )
            .unwrap();
        let err = engine
            .execute_text_string("include", &sample_message())
            .unwrap_err();
        assert_eq!(err.kind(), crate::NotifyErrorKind::Template);
    }

    #[test]
    fn from_dir_overrides_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join("ding.link.title.tmpl"),
            "{{ receiver }}: {{ firing | length }} firing",
        )
        .unwrap();
        std::fs::write(tmp.path().join("notes.txt"), "ignored").unwrap();

        let engine = TemplateEngine::from_dir(tmp.path()).unwrap();
        engine.validate().unwrap();

        let msg = sample_message();
        assert_eq!(
            engine.execute_text_string(TITLE_TEMPLATE, &msg).unwrap(),
            "ding: 2 firing"
        );
        assert!(engine
            .execute_text_string(CONTENT_TEMPLATE, &msg)
            .unwrap()
            .starts_with("#### "));
    }

    #[test]
    fn from_dir_reports_syntax_errors() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("ding.link.content.tmpl"), "{{ unclosed").unwrap();

        let err = TemplateEngine::from_dir(tmp.path()).unwrap_err();
        assert_eq!(err.kind(), crate::NotifyErrorKind::Template);
    }

    #[test]
    fn from_missing_dir_is_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = TemplateEngine::from_dir(&tmp.path().join("nope")).unwrap_err();
        assert_eq!(err.kind(), crate::NotifyErrorKind::Io);
    }
}

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use ding_notify::{DingTalkClient, MentionDirectory, NotificationBuilder, TemplateEngine};
use tracing::info;

use crate::cli::Cli;

pub struct AppState {
    /// Profile name → robot webhook URL.
    pub profiles: BTreeMap<String, String>,
    pub builder: NotificationBuilder,
    pub client: DingTalkClient,
    /// Same directory the builder matches against; reloads land here.
    pub mentions: MentionDirectory,
    /// Source of the mention directory, re-read on `/-/reload`.
    pub mention_file: Option<PathBuf>,
}

impl AppState {
    /// Assemble state from parsed CLI options: templates, the mention
    /// directory and the HTTP client. Fails fast on any bad input.
    pub fn from_cli(cli: &Cli) -> anyhow::Result<Self> {
        let profiles = ding_core::config::profile_map(&cli.profiles)?;

        let templates = match &cli.template_dir {
            Some(dir) => TemplateEngine::from_dir(dir)?,
            None => TemplateEngine::with_defaults()?,
        };
        templates.validate()?;

        let mentions = MentionDirectory::new();
        if let Some(path) = &cli.mention_file {
            let keywords = mentions.load(path)?;
            info!(path = %path.display(), keywords, "loaded mention directory");
        }

        let client = DingTalkClient::new(Duration::from_secs(cli.timeout_secs))?;

        Ok(Self {
            profiles,
            builder: NotificationBuilder::new(Arc::new(templates), mentions.clone()),
            client,
            mentions,
            mention_file: cli.mention_file.clone(),
        })
    }

    pub fn log_summary(&self) {
        info!("Config loaded:");
        for name in self.profiles.keys() {
            info!("  profile:  {}", name);
        }
        info!(
            "  mentions: {} keywords from {}",
            self.mentions.len(),
            self.mention_file
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(none)".to_string())
        );
    }
}

//! Command-line and environment configuration.

use std::path::PathBuf;

use clap::Parser;
use ding_core::Profile;

/// Relays Alertmanager webhooks to DingTalk group robots.
#[derive(Parser, Debug)]
#[command(name = "ding-server", version, about)]
pub struct Cli {
    /// Address to listen on for webhook requests.
    #[arg(long, env = "DING_LISTEN_ADDRESS", default_value = "0.0.0.0:8060")]
    pub listen_address: String,

    /// Robot profile as `name=webhook_url`. Repeat for several robots;
    /// the env var takes a comma-separated list.
    #[arg(
        long = "profile",
        env = "DING_PROFILES",
        value_delimiter = ',',
        required = true
    )]
    pub profiles: Vec<Profile>,

    /// Timeout for each request to DingTalk, in seconds.
    #[arg(long, env = "DING_TIMEOUT_SECS", default_value_t = 5)]
    pub timeout_secs: u64,

    /// Directory of `*.tmpl` files overriding or extending the built-in templates.
    #[arg(long, env = "DING_TEMPLATE_DIR")]
    pub template_dir: Option<PathBuf>,

    /// JSON file mapping keywords to mobile numbers to @-mention.
    #[arg(long, env = "DING_MENTION_FILE")]
    pub mention_file: Option<PathBuf>,
}

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

/// A named DingTalk robot endpoint, given on the command line as `name=url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub url: String,
}

impl FromStr for Profile {
    type Err = CoreError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        parse_profile(spec)
    }
}

/// Parse a `name=url` profile spec.
///
/// The name must be non-empty and the URL must be an absolute http(s) URL.
/// Only the first `=` separates name from URL, since robot URLs carry
/// `?access_token=...` query strings.
pub fn parse_profile(spec: &str) -> Result<Profile, CoreError> {
    let invalid = |reason: &str| CoreError::InvalidProfile {
        spec: spec.to_string(),
        reason: reason.to_string(),
    };

    let (name, url) = spec
        .split_once('=')
        .ok_or_else(|| invalid("expected name=url"))?;
    let name = name.trim();
    let url = url.trim();

    if name.is_empty() {
        return Err(invalid("profile name must not be empty"));
    }

    let parsed = url::Url::parse(url).map_err(|e| invalid(&e.to_string()))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(invalid("webhook URL must be http or https"));
    }

    Ok(Profile {
        name: name.to_string(),
        url: url.to_string(),
    })
}

/// Collect profiles into a name → URL map, rejecting duplicate names.
pub fn profile_map(profiles: &[Profile]) -> Result<BTreeMap<String, String>, CoreError> {
    let mut map = BTreeMap::new();
    for profile in profiles {
        if map
            .insert(profile.name.clone(), profile.url.clone())
            .is_some()
        {
            return Err(CoreError::DuplicateProfile(profile.name.clone()));
        }
    }
    Ok(map)
}

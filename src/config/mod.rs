use std::{collections::HashSet, fs, path::Path};

use serde::Deserialize;

use crate::core::error::OspreyError;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36 OSINTTool/1.0";

/// One catalog entry; the template carries a `{username}`, `{phone}` or
/// `{phone_or_username}` placeholder substituted before probing.
#[derive(Debug, Clone, Deserialize)]
pub struct ProbeTarget {
    pub name: String,
    pub url_template: String,
}

fn target(name: &str, url_template: &str) -> ProbeTarget {
    ProbeTarget {
        name: name.to_string(),
        url_template: url_template.to_string(),
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_platforms")]
    pub platforms: Vec<ProbeTarget>,
    #[serde(default = "default_messaging")]
    pub messaging: Vec<ProbeTarget>,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            platforms: default_platforms(),
            messaging: default_messaging(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_platforms() -> Vec<ProbeTarget> {
    vec![
        // mainstream social
        target("twitter", "https://twitter.com/{username}"),
        target("instagram", "https://www.instagram.com/{username}/"),
        target("facebook", "https://www.facebook.com/{username}"),
        target("linkedin", "https://www.linkedin.com/in/{username}"),
        target("github", "https://github.com/{username}"),
        target("reddit", "https://www.reddit.com/user/{username}"),
        target("youtube", "https://www.youtube.com/{username}"),
        target("tiktok", "https://www.tiktok.com/@{username}"),
        target("pinterest", "https://www.pinterest.com/{username}/"),
        // streaming / gaming
        target("steam", "https://steamcommunity.com/id/{username}"),
        target("twitch", "https://www.twitch.tv/{username}"),
        target("itchio", "https://{username}.itch.io/"),
        target("roblox", "https://www.roblox.com/users/{username}/profile"),
        // forums / developer / work
        target("hackernews", "https://news.ycombinator.com/user?id={username}"),
        target("stackoverflow", "https://stackoverflow.com/users/{username}"),
        target("medium", "https://medium.com/@{username}"),
        target("keybase", "https://keybase.io/{username}"),
        target("crunchbase", "https://www.crunchbase.com/person/{username}"),
        // image / portfolio
        target("imgur", "https://imgur.com/user/{username}"),
        target("deviantart", "https://www.deviantart.com/{username}"),
        target("behance", "https://www.behance.net/{username}"),
        target("dribbble", "https://dribbble.com/{username}"),
        // misc
        target("vk", "https://vk.com/{username}"),
        // user-provided instance may be required
        target("mastodon", "https://{username}.social"),
    ]
}

fn default_messaging() -> Vec<ProbeTarget> {
    vec![
        // reachable page is not definitive for account existence
        target("whatsapp", "https://wa.me/{phone}"),
        target("telegram", "https://t.me/{phone_or_username}"),
        target("signal", "https://signal.me/#p/{phone}"),
        // legacy API, may not work
        target("skype", "https://api.skype.com/users/{phone_or_username}"),
    ]
}

pub fn load_config(path: Option<&Path>) -> Result<AppConfig, OspreyError> {
    let Some(path) = path else {
        return Ok(AppConfig::default());
    };
    if !path.exists() {
        return Ok(AppConfig::default());
    }

    let content = fs::read_to_string(path)?;
    let cfg: AppConfig =
        toml::from_str(&content).map_err(|e| OspreyError::Config(e.to_string()))?;
    validate(&cfg)?;
    Ok(cfg)
}

fn validate(cfg: &AppConfig) -> Result<(), OspreyError> {
    for catalog in [&cfg.platforms, &cfg.messaging] {
        let mut seen = HashSet::new();
        for entry in catalog {
            if !seen.insert(entry.name.as_str()) {
                return Err(OspreyError::Config(format!(
                    "duplicate catalog entry: {}",
                    entry.name
                )));
            }
        }
    }
    Ok(())
}

// Lines are passed through uninterpreted; normalization happens when a
// proxy is acquired. An unreadable file is a warning, not an error.
pub fn load_proxies(path: &Path) -> Vec<String> {
    match fs::read_to_string(path) {
        Ok(content) => content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect(),
        Err(err) => {
            tracing::warn!("could not load proxy file {}: {err}", path.display());
            Vec::new()
        }
    }
}

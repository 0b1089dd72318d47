use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use url::Url;

use upnext_core::sections::{DisplaySettings, DEFAULT_UPCOMING_COUNT};

#[derive(Debug, Deserialize)]
pub struct Config {
    /// Base URL of the scheduling service API
    pub api_base_url: String,

    /// Static bearer token for the Authorization header
    pub api_token: String,

    /// Web app URL for the "open in browser" actions.
    /// Defaults to the origin of `api_base_url`.
    #[serde(default)]
    pub web_app_url: Option<String>,

    /// How many upcoming events to show in the TODAY section.
    /// Accepts a number or a string; anything unparsable falls back to 5.
    #[serde(default)]
    pub upcoming_count: Option<CountValue>,

    /// Show events you declined or never responded to
    #[serde(default)]
    pub show_declined: bool,
}

/// Plugin hosts hand settings around as strings, so the count may arrive
/// quoted.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CountValue {
    Int(i64),
    Str(String),
}

impl Config {
    /// Resolved upcoming-events count, falling back to the default on
    /// non-numeric or non-positive values.
    pub fn upcoming_count(&self) -> usize {
        let parsed = match &self.upcoming_count {
            Some(CountValue::Int(n)) => Some(*n),
            Some(CountValue::Str(s)) => s.trim().parse::<i64>().ok(),
            None => None,
        };
        match parsed {
            Some(n) if n > 0 => n as usize,
            _ => DEFAULT_UPCOMING_COUNT,
        }
    }

    pub fn display_settings(&self) -> DisplaySettings {
        DisplaySettings {
            upcoming_count: self.upcoming_count(),
            include_declined: self.show_declined,
        }
    }

    /// URL of the service's web app, derived from the API base when not
    /// configured explicitly.
    pub fn web_app_url(&self) -> Result<Url> {
        if let Some(configured) = &self.web_app_url {
            return Url::parse(configured)
                .with_context(|| format!("Invalid web_app_url '{}'", configured));
        }

        let api = Url::parse(&self.api_base_url)
            .with_context(|| format!("Invalid api_base_url '{}'", self.api_base_url))?;
        let origin = format!(
            "{}://{}",
            api.scheme(),
            api.host_str().context("api_base_url has no host")?
        );
        Url::parse(&origin).context("Failed to derive web app URL from api_base_url")
    }
}

/// Get the config directory path (~/.config/upnext)
pub fn config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .context("Could not determine config directory")?
        .join("upnext");
    Ok(config_dir)
}

/// Get the config file path (~/.config/upnext/config.toml)
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Load config from ~/.config/upnext/config.toml
pub fn load_config() -> Result<Config> {
    let path = config_path()?;

    if !path.exists() {
        anyhow::bail!(
            "Config file not found at {}\n\n\
            Create it with your scheduling service credentials:\n\n\
            api_base_url = \"https://api.your-scheduler.com/v1\"\n\
            api_token = \"your-api-token\"\n\
            upcoming_count = 5\n\
            show_declined = false\n",
            path.display()
        );
    }

    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;

    let config: Config = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

    Ok(config)
}

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use time::UtcOffset;
use time::macros::format_description;

/// How the chat list shows the time of the latest item
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ChatTime {
    /// `HH:MM`
    #[default]
    Clock,
    /// `5m`, `3h`, `2d`
    Relative,
}

impl ChatTime {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "clock" => Ok(Self::Clock),
            "relative" => Ok(Self::Relative),
            _ => bail!("invalid chat_time: must be clock or relative"),
        }
    }
}

impl std::fmt::Display for ChatTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = match self {
            ChatTime::Clock => "clock",
            ChatTime::Relative => "relative",
        };
        write!(f, "{value}")
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Config {
    /// Export root holding `index.json` and `days/`
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Where prerendered day pages are written
    #[serde(default = "default_html_dir")]
    pub html_dir: PathBuf,

    /// Directory holding `assets/`, `styles/` and `public/` for the live viewer
    #[serde(default = "default_web_root")]
    pub web_root: PathBuf,

    /// Live viewer listen address
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Icon base URL as seen from a prerendered page
    #[serde(default = "default_assets_href")]
    pub assets_href: String,

    /// Stylesheet base URL as seen from a prerendered page
    #[serde(default = "default_styles_href")]
    pub styles_href: String,

    /// Prefix for avatar and media paths in prerendered pages
    #[serde(default = "default_public_href")]
    pub public_href: String,

    #[serde(default)]
    pub chat_time: ChatTime,

    /// Fixed offset such as `+02:00`; the local offset when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utc_offset: Option<String>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("output/data")
}

fn default_html_dir() -> PathBuf {
    PathBuf::from("output/html-days")
}

fn default_web_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_assets_href() -> String {
    "../../assets".to_string()
}

fn default_styles_href() -> String {
    "../../styles".to_string()
}

fn default_public_href() -> String {
    "../public".to_string()
}

pub fn config_path() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME not set")?;
    Ok(PathBuf::from(home).join(".snapview").join("config.toml"))
}

/// Parse `+HH:MM`, `-HH:MM`, `Z` or `UTC`
pub fn parse_offset(value: &str) -> Result<UtcOffset> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("z") || value.eq_ignore_ascii_case("utc") {
        return Ok(UtcOffset::UTC);
    }
    UtcOffset::parse(
        value,
        format_description!("[offset_hour sign:mandatory]:[offset_minute]"),
    )
    .with_context(|| format!("invalid utc_offset {value:?}: expected +HH:MM"))
}

impl Config {
    /// Load config from ~/.snapview/config.toml, returning defaults if file doesn't exist
    pub fn load() -> Result<Self> {
        let path = config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Save config to ~/.snapview/config.toml
    pub fn save(&self) -> Result<PathBuf> {
        let path = config_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config")?;
        fs::write(&path, content).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Update one key from its string form
    pub fn set(&mut self, key: &str, value: String) -> Result<()> {
        match key {
            "data_dir" | "data" => self.data_dir = PathBuf::from(value),
            "html_dir" | "out" => self.html_dir = PathBuf::from(value),
            "web_root" => self.web_root = PathBuf::from(value),
            "bind" => self.bind = value,
            "assets_href" => self.assets_href = value,
            "styles_href" => self.styles_href = value,
            "public_href" => self.public_href = value,
            "chat_time" => self.chat_time = ChatTime::parse(&value)?,
            "utc_offset" | "offset" => {
                if value.trim().is_empty() || value == "local" {
                    self.utc_offset = None;
                } else {
                    parse_offset(&value)?;
                    self.utc_offset = Some(value);
                }
            }
            _ => bail!("unknown config key: {key}"),
        }
        Ok(())
    }

    /// Configured offset, else the local one, else UTC.
    ///
    /// Call before any threads are spawned: the local offset cannot be read
    /// safely afterwards.
    pub fn resolve_offset(&self) -> Result<UtcOffset> {
        match self.utc_offset.as_deref() {
            Some(value) => parse_offset(value),
            None => Ok(UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            html_dir: default_html_dir(),
            web_root: default_web_root(),
            bind: default_bind(),
            assets_href: default_assets_href(),
            styles_href: default_styles_href(),
            public_href: default_public_href(),
            chat_time: ChatTime::default(),
            utc_offset: None,
        }
    }
}

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

pub const PRODUCTION_URL: &str = "https://neurologic.onrender.com";
pub const LOCAL_URL: &str = "http://127.0.0.1:8000";
pub const BASE_URL_ENV: &str = "NEUROLOGIC_BASE_URL";
pub const DEFAULT_CONFIG_PATH: &str = "~/.config/neurologic/config.toml";

/// Deployment presets for the backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    #[default]
    Production,
    Local,
}

impl Target {
    pub fn base_url(&self) -> &'static str {
        match self {
            Target::Production => PRODUCTION_URL,
            Target::Local => LOCAL_URL,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default)]
    pub target: Target,
    /// Explicit URL; wins over `target`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Values that come from outside the config file.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub env_base_url: Option<String>,
    pub local: bool,
}

impl Overrides {
    pub fn from_env(base_url: Option<String>, local: bool) -> Self {
        Self {
            base_url,
            env_base_url: std::env::var(BASE_URL_ENV).ok(),
            local,
        }
    }
}

/// Where the effective base URL came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UrlSource {
    Flag,
    Env,
    LocalFlag,
    File,
    Preset(Target),
}

impl fmt::Display for UrlSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UrlSource::Flag => f.write_str("--base-url"),
            UrlSource::Env => f.write_str(BASE_URL_ENV),
            UrlSource::LocalFlag => f.write_str("--local"),
            UrlSource::File => f.write_str("config file base_url"),
            UrlSource::Preset(Target::Production) => f.write_str("production preset"),
            UrlSource::Preset(Target::Local) => f.write_str("local preset"),
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl Config {
    pub fn default_path() -> PathBuf {
        Self::expand_path(DEFAULT_CONFIG_PATH)
    }

    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let s = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        let cfg: Config =
            toml::from_str(&s).with_context(|| format!("parse {}", path.display()))?;
        Ok(cfg)
    }

    /// A missing file is the default config; an unreadable one is an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create {}", parent.display()))?;
        }
        let s = toml::to_string_pretty(self).with_context(|| "serialize toml")?;
        std::fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }

    /// Precedence: flag, env var, `--local`, file `base_url`, file `target`.
    pub fn resolve_base_url(&self, overrides: &Overrides) -> (String, UrlSource) {
        if let Some(url) = non_blank(&overrides.base_url) {
            return (url.to_string(), UrlSource::Flag);
        }
        if let Some(url) = non_blank(&overrides.env_base_url) {
            return (url.to_string(), UrlSource::Env);
        }
        if overrides.local {
            return (LOCAL_URL.to_string(), UrlSource::LocalFlag);
        }
        if let Some(url) = non_blank(&self.backend.base_url) {
            return (url.to_string(), UrlSource::File);
        }
        let target = self.backend.target;
        (target.base_url().to_string(), UrlSource::Preset(target))
    }
}

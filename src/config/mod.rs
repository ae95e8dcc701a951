use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct EffectiveConfig {
    pub ui: UiConfig,
    pub render: RenderConfig,
    pub log: LogConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_path: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UiConfig {
    pub color: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty_json: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogConfig {
    pub enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub const fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("invalid output format: {other} (expected text|json)")),
        }
    }
}

impl Default for EffectiveConfig {
    fn default() -> Self {
        Self {
            ui: UiConfig { color: true },
            render: RenderConfig {
                format: OutputFormat::Text,
                pretty_json: true,
            },
            log: LogConfig { enabled: false },
            config_path: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    ui: Option<RawUiConfig>,
    render: Option<RawRenderConfig>,
    log: Option<RawLogConfig>,
}

#[derive(Debug, Deserialize)]
struct RawUiConfig {
    color: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct RawRenderConfig {
    format: Option<OutputFormat>,
    pretty_json: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct RawLogConfig {
    enabled: Option<bool>,
}

pub fn effective_home_dir() -> Result<PathBuf> {
    std::env::var_os("HOME")
        .filter(|home| !home.is_empty())
        .map(PathBuf::from)
        .ok_or_else(|| anyhow::anyhow!("HOME is not set"))
}

pub fn config_dir(home_dir: &Path) -> PathBuf {
    home_dir.join(".config/sosindex")
}

pub fn default_config_path(home_dir: &Path) -> PathBuf {
    config_dir(home_dir).join("config.toml")
}

pub fn load(config_path: Option<&Path>, home_dir: &Path) -> Result<EffectiveConfig> {
    let mut cfg = EffectiveConfig::default();

    let explicit = config_path.is_some();
    let path = config_path
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| default_config_path(home_dir));

    if path.exists() {
        let s = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let raw: RawConfig = toml::from_str(&s)
            .with_context(|| format!("failed to parse config file (TOML): {}", path.display()))?;
        apply_raw_config(&mut cfg, raw);
        cfg.config_path = Some(path.display().to_string());
    } else if explicit {
        return Err(anyhow::anyhow!(
            "config file not found: {}",
            path.display()
        ));
    }

    apply_env_overrides(&mut cfg)?;

    Ok(cfg)
}

fn apply_raw_config(cfg: &mut EffectiveConfig, raw: RawConfig) {
    if let Some(ui) = raw.ui {
        if let Some(color) = ui.color {
            cfg.ui.color = color;
        }
    }

    if let Some(render) = raw.render {
        if let Some(format) = render.format {
            cfg.render.format = format;
        }
        if let Some(pretty_json) = render.pretty_json {
            cfg.render.pretty_json = pretty_json;
        }
    }

    if let Some(log) = raw.log {
        if let Some(enabled) = log.enabled {
            cfg.log.enabled = enabled;
        }
    }
}

fn apply_env_overrides(cfg: &mut EffectiveConfig) -> Result<()> {
    if let Ok(v) = std::env::var("SOSINDEX_UI_COLOR") {
        cfg.ui.color = parse_bool(&v).with_context(|| "SOSINDEX_UI_COLOR")?;
    }
    if let Ok(v) = std::env::var("SOSINDEX_RENDER_FORMAT") {
        cfg.render.format = v
            .parse::<OutputFormat>()
            .map_err(anyhow::Error::msg)
            .with_context(|| "SOSINDEX_RENDER_FORMAT")?;
    }
    if let Ok(v) = std::env::var("SOSINDEX_RENDER_PRETTY_JSON") {
        cfg.render.pretty_json =
            parse_bool(&v).with_context(|| "SOSINDEX_RENDER_PRETTY_JSON")?;
    }
    if let Ok(v) = std::env::var("SOSINDEX_LOG_ENABLED") {
        cfg.log.enabled = parse_bool(&v).with_context(|| "SOSINDEX_LOG_ENABLED")?;
    }

    Ok(())
}

fn parse_bool(s: &str) -> Result<bool> {
    let s = s.trim().to_ascii_lowercase();
    match s.as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(anyhow::anyhow!(
            "invalid boolean: {s} (expected true|false|1|0|yes|no|on|off)"
        )),
    }
}

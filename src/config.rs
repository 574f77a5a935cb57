//! Optional configuration: a `config.toml` under the platform config
//! directory can override the dashboard theme colors. Missing or partial
//! files fall back to the defaults.

use color_eyre::eyre::eyre;
use color_eyre::Result;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub theme: ThemeConfig,
}

/// Raw theme section of the config file: color names/hex strings keyed by
/// theme slot, merged over the defaults.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ThemeConfig {
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

pub struct ConfigManager {
    pub config_dir: PathBuf,
}

impl ConfigManager {
    pub fn new(app_name: &str) -> Result<Self> {
        let base =
            dirs::config_dir().ok_or_else(|| eyre!("could not determine config directory"))?;
        Ok(Self {
            config_dir: base.join(app_name),
        })
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Reads `config.toml` if it exists; otherwise returns the defaults.
    pub fn load_config(&self) -> Result<AppConfig> {
        let path = self.config_file();
        if !path.exists() {
            return Ok(AppConfig::default());
        }
        let content = std::fs::read_to_string(&path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }
}

/// Resolved colors used during rendering, looked up by slot name.
#[derive(Clone, Debug)]
pub struct Theme {
    pub colors: HashMap<String, Color>,
}

impl Theme {
    pub fn from_config(config: &ThemeConfig) -> Result<Theme> {
        let mut colors = default_colors();
        for (name, value) in &config.colors {
            let color = value
                .parse::<Color>()
                .map_err(|_| eyre!("invalid color '{}' for theme key '{}'", value, name))?;
            colors.insert(name.clone(), color);
        }
        Ok(Theme { colors })
    }

    pub fn get(&self, name: &str) -> Color {
        self.colors.get(name).copied().unwrap_or(Color::Reset)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            colors: default_colors(),
        }
    }
}

fn default_colors() -> HashMap<String, Color> {
    [
        ("title", Color::Cyan),
        ("subtitle", Color::DarkGray),
        ("section_title", Color::Cyan),
        ("card_border", Color::DarkGray),
        ("kpi_title", Color::Gray),
        ("kpi_value", Color::White),
        ("bar_views", Color::Blue),
        ("bar_engagement", Color::Green),
        ("table_header", Color::Cyan),
        ("text_primary", Color::White),
        ("text_secondary", Color::DarkGray),
    ]
    .into_iter()
    .map(|(name, color)| (name.to_string(), color))
    .collect()
}

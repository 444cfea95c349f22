//! Studio settings management
//!
//! This module provides settings persistence, loading, and updating
//! for the design studio.

use crate::Result;
use design_model::TextDefaults;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main studio settings container
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StudioSettings {
    /// Canvas editing settings
    pub editing: EditingSettings,
    /// Cart and shipping settings
    pub checkout: CheckoutSettings,
    /// Design download settings
    pub export: ExportSettings,
    /// Catalog file replacing the built-in catalog
    pub catalog_path: Option<PathBuf>,
}

/// Canvas editing settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EditingSettings {
    /// Undo steps kept per surface; unbounded when absent
    pub history_limit: Option<usize>,
    /// Zoom level a new canvas opens at
    pub default_zoom: f64,
    /// Template for new text elements
    pub text_defaults: TextDefaults,
}

impl Default for EditingSettings {
    fn default() -> Self {
        Self {
            history_limit: None,
            default_zoom: 1.0,
            text_defaults: TextDefaults::default(),
        }
    }
}

/// Cart and shipping settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CheckoutSettings {
    /// Sales tax rate applied to the subtotal
    pub tax_rate: f64,
    pub shipping: ShippingSettings,
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        Self {
            tax_rate: 0.0725,
            shipping: ShippingSettings::default(),
        }
    }
}

/// Which shipping quote provider to use
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "provider", rename_all = "snake_case")]
pub enum ShippingSettings {
    /// Random quotes; a seed makes them reproducible
    Simulated { seed: Option<u64> },
    FlatRate { rate: f64 },
}

impl Default for ShippingSettings {
    fn default() -> Self {
        Self::Simulated { seed: None }
    }
}

/// Design download settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExportSettings {
    /// Preview image handed out instead of a rendered file
    pub preview_url: String,
    /// Prefix of downloaded file names
    pub file_prefix: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            preview_url: "https://picsum.photos/800/800".to_string(),
            file_prefix: "sharjays".to_string(),
        }
    }
}

/// Settings manager for loading, saving, and updating studio settings
pub struct SettingsManager {
    /// Path to the settings file
    settings_path: PathBuf,
    /// Current settings (cached)
    current: StudioSettings,
}

impl SettingsManager {
    /// Create a new settings manager with the given app data directory
    pub fn new(app_data_dir: PathBuf) -> Self {
        Self::from_path(app_data_dir.join("settings.json"))
    }

    /// Create a settings manager for an explicit settings file
    pub fn from_path(settings_path: impl Into<PathBuf>) -> Self {
        Self {
            settings_path: settings_path.into(),
            current: StudioSettings::default(),
        }
    }

    /// Get the path to the settings file
    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    /// Load settings from disk, or return defaults if file doesn't exist
    pub async fn load(&mut self) -> Result<&StudioSettings> {
        self.current = if self.settings_path.exists() {
            let content = tokio::fs::read_to_string(&self.settings_path).await?;
            parse_or_default(&content)
        } else {
            StudioSettings::default()
        };
        Ok(&self.current)
    }

    /// Load settings synchronously (for use during startup)
    pub fn load_sync(&mut self) -> Result<&StudioSettings> {
        self.current = if self.settings_path.exists() {
            let content = std::fs::read_to_string(&self.settings_path)?;
            parse_or_default(&content)
        } else {
            StudioSettings::default()
        };
        Ok(&self.current)
    }

    /// Save current settings to disk
    pub async fn save(&self) -> Result<()> {
        if let Some(parent) = self.settings_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(&self.current)?;
        tokio::fs::write(&self.settings_path, content).await?;
        Ok(())
    }

    /// Save settings synchronously
    pub fn save_sync(&self) -> Result<()> {
        if let Some(parent) = self.settings_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&self.current)?;
        std::fs::write(&self.settings_path, content)?;
        Ok(())
    }

    /// Get current settings
    pub fn get(&self) -> &StudioSettings {
        &self.current
    }

    /// Update settings and save to disk
    pub async fn update(&mut self, settings: StudioSettings) -> Result<()> {
        self.current = settings;
        self.save().await
    }

    /// Update settings synchronously
    pub fn update_sync(&mut self, settings: StudioSettings) -> Result<()> {
        self.current = settings;
        self.save_sync()
    }

    /// Reset settings to defaults synchronously
    pub fn reset_sync(&mut self) -> Result<&StudioSettings> {
        self.current = StudioSettings::default();
        self.save_sync()?;
        Ok(&self.current)
    }
}

fn parse_or_default(content: &str) -> StudioSettings {
    match serde_json::from_str::<StudioSettings>(content) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("Failed to parse settings file, using defaults: {}", e);
            StudioSettings::default()
        }
    }
}

//! Display preferences.
//!
//! Preferences are a plain value handed to the rendering layer at startup.
//! Persistence goes through [`load_preferences`] and [`save_preferences`]
//! only; nothing else reads or writes the file.

use crate::error::AccessError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Lower bound for the brightness and contrast sliders
pub const MIN_LEVEL: f64 = 0.75;
/// Upper bound for the brightness and contrast sliders
pub const MAX_LEVEL: f64 = 1.25;

/// Background theme
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Cream,
    Pastel,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Cream => "cream",
            Theme::Pastel => "pastel",
            Theme::Dark => "dark",
        }
    }
}

/// User display and speech preferences
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub theme: Theme,
    pub large_text: bool,
    pub brightness: f64,
    pub contrast: f64,
    #[serde(alias = "ttsOn")]
    pub tts_enabled: bool,
    pub stt_enabled: bool,
    #[serde(alias = "bgCustom")]
    pub bg_hex: Option<String>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::Cream,
            large_text: true,
            brightness: 1.0,
            contrast: 1.0,
            tts_enabled: true,
            stt_enabled: true,
            bg_hex: None,
        }
    }
}

fn is_hex_color(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };
    digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit())
}

fn clamp_level(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(MIN_LEVEL, MAX_LEVEL)
    } else {
        1.0
    }
}

impl Preferences {
    /// Bring every field back into its valid range
    pub fn normalized(mut self) -> Self {
        self.brightness = clamp_level(self.brightness);
        self.contrast = clamp_level(self.contrast);
        if !self.bg_hex.as_deref().is_some_and(is_hex_color) {
            self.bg_hex = None;
        }
        self
    }

    /// Style properties the rendering layer applies to the document root
    pub fn css_variables(&self) -> Vec<(&'static str, String)> {
        let mut vars = vec![
            ("data-theme", self.theme.as_str().to_string()),
            ("--brightness", self.brightness.to_string()),
            ("--contrast", self.contrast.to_string()),
        ];
        if let Some(bg) = &self.bg_hex {
            vars.push(("--bg-custom", bg.clone()));
        }
        if self.large_text {
            vars.push(("font-size", "18px".to_string()));
        }
        vars
    }
}

/// Load preferences from `path`.
///
/// A missing or unreadable file yields the defaults; fields absent from the
/// file keep their default values.
pub fn load_preferences(path: &Path) -> Preferences {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!("Could not read preferences {}: {}", path.display(), e);
            }
            return Preferences::default();
        }
    };

    match serde_json::from_str::<Preferences>(&raw) {
        Ok(prefs) => prefs.normalized(),
        Err(e) => {
            tracing::warn!("Ignoring corrupt preferences {}: {}", path.display(), e);
            Preferences::default()
        }
    }
}

/// Persist preferences to `path`, creating parent directories as needed.
pub fn save_preferences(path: &Path, prefs: &Preferences) -> Result<(), AccessError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(&prefs.clone().normalized())?;
    std::fs::write(path, json)?;
    Ok(())
}

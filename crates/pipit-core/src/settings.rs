//! Module settings.
//!
//! Loaded from a TOML file; every field has a default so a partial (or
//! absent) file is fine. The host's settings UI exposes
//! `auto_enable_captions` as its one visible option.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::caption_url::{
    CaptionUrlDeriver, DEFAULT_CAPTION_SUBDOMAIN, DEFAULT_LANGUAGE, DEFAULT_VIDEO_SUBDOMAIN,
};
use crate::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Turn captions on automatically when a default track was discovered.
    pub auto_enable_captions: bool,
    pub captions: CaptionSettings,
    pub probe: ProbeSettings,
    pub activator: ActivatorSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_enable_captions: true,
            captions: CaptionSettings::default(),
            probe: ProbeSettings::default(),
            activator: ActivatorSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptionSettings {
    /// Host label the video assets live under.
    pub video_subdomain: String,
    /// Host label the caption files live under.
    pub caption_subdomain: String,
    /// Language tag baked into the derived caption filename.
    pub language: String,
    /// Display label for the attached track.
    pub label: String,
}

impl Default for CaptionSettings {
    fn default() -> Self {
        Self {
            video_subdomain: DEFAULT_VIDEO_SUBDOMAIN.to_string(),
            caption_subdomain: DEFAULT_CAPTION_SUBDOMAIN.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            label: "Deutsch".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeSettings {
    /// Overall HEAD request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self { timeout_ms: 5_000 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivatorSettings {
    /// Pause between DOM lookups while the caption controls render.
    pub poll_interval_ms: u64,
    /// Lookup budget before the activator gives up silently.
    pub max_attempts: u32,
    /// Pause before the one-shot auto-enable of the default track.
    pub auto_enable_delay_ms: u64,
}

impl Default for ActivatorSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: 250,
            max_attempts: 20,
            auto_enable_delay_ms: 500,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let settings: Settings = toml::from_str(&content)?;
        tracing::debug!(path = %path.as_ref().display(), "loaded settings");
        Ok(settings)
    }

    /// Build the URL deriver configured by these settings.
    pub fn caption_url_deriver(&self) -> Result<CaptionUrlDeriver> {
        CaptionUrlDeriver::new(
            self.captions.video_subdomain.as_str(),
            self.captions.caption_subdomain.as_str(),
            self.captions.language.as_str(),
        )
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe.timeout_ms)
    }
}

impl ActivatorSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn auto_enable_delay(&self) -> Duration {
        Duration::from_millis(self.auto_enable_delay_ms)
    }
}

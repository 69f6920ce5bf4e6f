use url::Url;

use crate::{Error, Result};

pub const DEFAULT_VIDEO_SUBDOMAIN: &str = "videos";
pub const DEFAULT_CAPTION_SUBDOMAIN: &str = "images";
pub const DEFAULT_LANGUAGE: &str = "de";

const VIDEO_EXTENSION: &str = ".mp4";
const CAPTION_EXTENSION: &str = "vtt";

/// Normalize a protocol-relative media reference to an explicit secure URL.
/// Already-absolute references pass through unchanged.
pub fn normalize_video_url(raw: &str) -> String {
    if raw.starts_with("//") {
        format!("https:{raw}")
    } else {
        raw.to_string()
    }
}

/// Derives a caption-file URL from a video URL by swapping the host label
/// and the extension:
///
/// `scheme://videos.<domain>/<path>.mp4` → `https://images.<domain>/<path>-de.vtt`
///
/// This is a deliberate allow-list, not a generic transform: anything that
/// does not match the expected scheme, host label, and extension derives to
/// nothing.
#[derive(Debug, Clone)]
pub struct CaptionUrlDeriver {
    video_subdomain: String,
    caption_subdomain: String,
    language: String,
}

impl Default for CaptionUrlDeriver {
    fn default() -> Self {
        Self {
            video_subdomain: DEFAULT_VIDEO_SUBDOMAIN.to_string(),
            caption_subdomain: DEFAULT_CAPTION_SUBDOMAIN.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl CaptionUrlDeriver {
    /// Create a deriver with explicit host labels and language tag.
    ///
    /// Labels must be single host labels (non-empty, no dots); the language
    /// tag must be non-empty.
    pub fn new(
        video_subdomain: impl Into<String>,
        caption_subdomain: impl Into<String>,
        language: impl Into<String>,
    ) -> Result<Self> {
        let video_subdomain = video_subdomain.into();
        let caption_subdomain = caption_subdomain.into();
        let language = language.into();

        for label in [&video_subdomain, &caption_subdomain] {
            if label.is_empty() || label.contains('.') {
                return Err(Error::InvalidCaptionSource(format!(
                    "'{label}' is not a single host label"
                )));
            }
        }
        if language.is_empty() {
            return Err(Error::InvalidCaptionSource(
                "language tag must not be empty".to_string(),
            ));
        }

        Ok(Self {
            video_subdomain,
            caption_subdomain,
            language,
        })
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Derive the caption URL for `video_url`, or `None` when the input does
    /// not match the allow-listed shape. Pure; no side effects.
    pub fn derive(&self, video_url: &str) -> Option<String> {
        let url = Url::parse(video_url).ok()?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return None;
        }

        let host = url.host_str()?;
        let domain = host.strip_prefix(&format!("{}.", self.video_subdomain))?;

        let stem = url.path().strip_suffix(VIDEO_EXTENSION)?;
        if stem.is_empty() || stem == "/" {
            return None;
        }

        Some(format!(
            "https://{}.{}{}-{}.{}",
            self.caption_subdomain, domain, stem, self.language, CAPTION_EXTENSION
        ))
    }
}

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::models::upload::LinkId;

pub const DEFAULT_BASE_URL: &str = "https://streamwo.com";
pub const UPLOAD_PATH: &str = "/upload_file.php";
pub const SHARE_PATH: &str = "/file/";
pub const ACCEPTED_MIME_TYPE: &str = "video/mp4";
pub const MAX_VIDEO_SIZE: u64 = 512 * 0x100000;

const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StreamwoConfig {
    #[serde(rename = "baseUrl", default = "default_base_url")]
    pub base_url: String,
    /// Fail the upload when the home page carries no `link_id` instead of
    /// submitting an empty one.
    #[serde(rename = "requireLinkId", default)]
    pub require_link_id: bool,
    #[serde(rename = "connectTimeoutSecs", default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_connect_timeout() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

impl Default for StreamwoConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            require_link_id: false,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl StreamwoConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from `STREAMWO_*` variables resolved by `lookup`,
    /// keeping defaults for unset or unparsable values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let base_url = lookup("STREAMWO_BASE_URL").unwrap_or(defaults.base_url);

        let require_link_id = lookup("STREAMWO_REQUIRE_LINK_ID")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(defaults.require_link_id);

        let connect_timeout_secs = lookup("STREAMWO_CONNECT_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(defaults.connect_timeout_secs);

        Self {
            base_url,
            require_link_id,
            connect_timeout_secs,
        }
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        serde_json::from_str(&raw)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn home_url(&self) -> String {
        format!("{}/", self.base())
    }

    pub fn upload_url(&self) -> String {
        format!("{}{}", self.base(), UPLOAD_PATH)
    }

    pub fn share_url(&self, link_id: &LinkId) -> String {
        format!("{}{}{}", self.base(), SHARE_PATH, link_id)
    }
}

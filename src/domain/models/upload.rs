use std::{fmt, path::PathBuf};

use serde::Serialize;

/// Session token scraped from the Streamwo home page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LinkId(String);

impl LinkId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Terminal result of one upload attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum UploadOutcome {
    #[serde(rename_all = "camelCase")]
    Uploaded {
        file: PathBuf,
        link_id: LinkId,
        url: String,
    },
    Failed { file: PathBuf, error: String },
}

impl UploadOutcome {
    pub fn failed(file: impl Into<PathBuf>, error: impl ToString) -> Self {
        UploadOutcome::Failed {
            file: file.into(),
            error: error.to_string(),
        }
    }

    pub fn file(&self) -> &PathBuf {
        match self {
            UploadOutcome::Uploaded { file, .. } | UploadOutcome::Failed { file, .. } => file,
        }
    }

    pub fn is_uploaded(&self) -> bool {
        matches!(self, UploadOutcome::Uploaded { .. })
    }
}

/// Notification published while an upload runs.
///
/// `Progress` only occurs before the single terminal `Uploaded` or `Failed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadEvent {
    /// `bytes_total` is the size of the video file, not of the whole
    /// multipart body; `bytes_sent` never exceeds it.
    Progress {
        file: PathBuf,
        bytes_sent: u64,
        bytes_total: u64,
    },
    Uploaded {
        file: PathBuf,
        link_id: LinkId,
        url: String,
    },
    Failed {
        file: PathBuf,
        error: String,
    },
}

impl UploadEvent {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, UploadEvent::Progress { .. })
    }
}

impl From<UploadOutcome> for UploadEvent {
    fn from(outcome: UploadOutcome) -> Self {
        match outcome {
            UploadOutcome::Uploaded { file, link_id, url } => {
                UploadEvent::Uploaded { file, link_id, url }
            }
            UploadOutcome::Failed { file, error } => UploadEvent::Failed { file, error },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_serializes_with_status_tag() {
        let uploaded = UploadOutcome::Uploaded {
            file: PathBuf::from("clip.mp4"),
            link_id: LinkId::new("abc123"),
            url: "https://streamwo.com/file/abc123".to_string(),
        };
        let json = serde_json::to_value(&uploaded).unwrap();
        assert_eq!(json["status"], "uploaded");
        assert_eq!(json["linkId"], "abc123");
        assert_eq!(json["url"], "https://streamwo.com/file/abc123");

        let failed = UploadOutcome::failed("clip.mp4", "boom");
        let json = serde_json::to_value(&failed).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["error"], "boom");
    }

    #[test]
    fn only_progress_is_non_terminal() {
        let progress = UploadEvent::Progress {
            file: PathBuf::from("clip.mp4"),
            bytes_sent: 1,
            bytes_total: 2,
        };
        assert!(!progress.is_terminal());
        assert!(UploadEvent::from(UploadOutcome::failed("clip.mp4", "boom")).is_terminal());
    }
}

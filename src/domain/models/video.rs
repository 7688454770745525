use std::path::{Path, PathBuf};

/// Types registered under another name in the shared-mime-info database.
const MIME_ALIASES: &[(&str, &str)] = &[
    ("video/x-m4v", "video/mp4"),
    ("video/x-f4v", "video/mp4"),
];

/// Extensions `mime_guess` does not know about.
const EXTRA_EXTENSIONS: &[(&str, &str)] = &[("lrv", "video/mp4")];

fn resolve_mime_type(file_name: &str) -> String {
    let extension = Path::new(file_name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase());

    if let Some(extension) = extension.as_deref() {
        if let Some((_, mime)) = EXTRA_EXTENSIONS.iter().find(|(ext, _)| *ext == extension) {
            return mime.to_string();
        }
    }

    let guessed = mime_guess::from_path(file_name).first_or_octet_stream();
    let essence = guessed.essence_str();

    MIME_ALIASES
        .iter()
        .find(|(alias, _)| *alias == essence)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or_else(|| essence.to_string())
}

/// A local video selected for upload.
///
/// Size and MIME type are snapshotted when the handle is built; the file
/// itself is only opened once the upload request is being sent.
#[derive(Debug, Clone)]
pub struct VideoFile {
    path: PathBuf,
    file_name: String,
    size: u64,
    mime_type: String,
}

impl VideoFile {
    pub fn new(path: impl Into<PathBuf>, size: u64) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mime_type = resolve_mime_type(&file_name);

        Self {
            path,
            file_name,
            size,
            mime_type,
        }
    }

    pub async fn from_path(path: impl Into<PathBuf>) -> std::io::Result<Self> {
        let path = path.into();
        let metadata = tokio::fs::metadata(&path).await?;

        if !metadata.is_file() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} is not a regular file", path.display()),
            ));
        }

        Ok(Self::new(path, metadata.len()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn validate_size(&self, max_size: u64) -> bool {
        self.size <= max_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_type_is_inferred_from_file_name() {
        assert_eq!(VideoFile::new("/videos/goal.mp4", 10).mime_type(), "video/mp4");
        assert_eq!(VideoFile::new("/videos/GOAL.MP4", 10).mime_type(), "video/mp4");
        assert_eq!(VideoFile::new("/videos/goal.m4v", 10).mime_type(), "video/mp4");
        assert_eq!(VideoFile::new("/videos/goal.f4v", 10).mime_type(), "video/mp4");
        assert_eq!(VideoFile::new("/videos/goal.lrv", 10).mime_type(), "video/mp4");
        assert_eq!(VideoFile::new("/videos/GOAL.LRV", 10).mime_type(), "video/mp4");
        assert_eq!(VideoFile::new("/videos/goal.webm", 10).mime_type(), "video/webm");
        assert_eq!(
            VideoFile::new("/videos/goal", 10).mime_type(),
            "application/octet-stream"
        );
    }

    #[test]
    fn size_limit_is_inclusive() {
        let video = VideoFile::new("clip.mp4", 1024);
        assert!(video.validate_size(1024));
        assert!(!video.validate_size(1023));
    }

    #[tokio::test]
    async fn from_path_reads_size_and_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("highlight.mp4");
        std::fs::write(&path, vec![7u8; 4096]).unwrap();

        let video = VideoFile::from_path(&path).await.unwrap();

        assert_eq!(video.size(), 4096);
        assert_eq!(video.file_name(), "highlight.mp4");
        assert_eq!(video.mime_type(), "video/mp4");
        assert_eq!(video.path(), path.as_path());
    }

    #[tokio::test]
    async fn from_path_rejects_missing_files_and_directories() {
        let dir = tempfile::tempdir().unwrap();

        assert!(VideoFile::from_path(dir.path().join("missing.mp4"))
            .await
            .is_err());
        assert!(VideoFile::from_path(dir.path()).await.is_err());
    }
}

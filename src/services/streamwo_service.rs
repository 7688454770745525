use async_trait::async_trait;
use futures::StreamExt;
use reqwest::{multipart, Body, Client};
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::io::ReaderStream;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    application::{error::UploadError, services::VideoHostService},
    domain::{
        config::streamwo::{StreamwoConfig, ACCEPTED_MIME_TYPE, MAX_VIDEO_SIZE},
        models::{
            upload::{LinkId, UploadEvent, UploadOutcome},
            video::VideoFile,
        },
    },
    services::{events::EventSink, link_id::extract_link_id},
};

const READ_CHUNK_SIZE: usize = 64 * 1024;

pub struct StreamwoService {
    client: Client,
    config: StreamwoConfig,
}

impl StreamwoService {
    /// `client` is shared with the caller; uploads issued through clones of
    /// it reuse the same connection pool.
    pub fn new(client: Client, config: StreamwoConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &StreamwoConfig {
        &self.config
    }

    fn validate(video: &VideoFile) -> Result<(), UploadError> {
        if video.mime_type() != ACCEPTED_MIME_TYPE {
            return Err(UploadError::UnsupportedFileType);
        }

        if !video.validate_size(MAX_VIDEO_SIZE) {
            return Err(UploadError::FileTooBig);
        }

        Ok(())
    }

    async fn fetch_link_id(&self, attempt: Uuid) -> Result<LinkId, UploadError> {
        let url = self.config.home_url();
        debug!(%attempt, "Fetching Streamwo home page: {}", url);

        let home_page = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        match extract_link_id(&home_page) {
            Some(link_id) if !link_id.is_empty() => Ok(link_id),
            _ if self.config.require_link_id => Err(UploadError::LinkIdNotFound),
            _ => {
                warn!(%attempt, "No link_id found on Streamwo home page, uploading with an empty one");
                Ok(LinkId::default())
            }
        }
    }

    async fn post_video(
        &self,
        video: &VideoFile,
        link_id: &LinkId,
        sink: &EventSink,
        attempt: Uuid,
    ) -> Result<(), UploadError> {
        let file = tokio::fs::File::open(video.path()).await?;
        let bytes_total = video.size();

        let mut reporter = sink.progress_reporter(bytes_total);
        let stream = ReaderStream::with_capacity(file, READ_CHUNK_SIZE).map(move |chunk| {
            if let Ok(bytes) = &chunk {
                reporter.advance(bytes.len() as u64);
            }
            chunk
        });

        let body = Body::wrap_stream(stream);
        let video_part = multipart::Part::stream_with_length(body, bytes_total)
            .file_name(video.file_name().to_string())
            .mime_str(video.mime_type())
            .map_err(|e| UploadError::Internal(e.to_string()))?;

        let form = multipart::Form::new()
            .part("upload_file", video_part)
            .text("link_id", link_id.to_string());

        let url = self.config.upload_url();
        debug!(%attempt, "Posting {} bytes to {}", bytes_total, url);

        self.client
            .post(&url)
            .multipart(form)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }

    async fn try_upload(
        &self,
        video: &VideoFile,
        sink: &EventSink,
        attempt: Uuid,
    ) -> Result<LinkId, UploadError> {
        Self::validate(video)?;

        let link_id = self.fetch_link_id(attempt).await?;
        self.post_video(video, &link_id, sink, attempt).await?;

        Ok(link_id)
    }
}

#[async_trait]
impl VideoHostService for StreamwoService {
    async fn upload_video(
        &self,
        video: &VideoFile,
        events: UnboundedSender<UploadEvent>,
    ) -> UploadOutcome {
        let attempt = Uuid::new_v4();
        let file = video.path().to_path_buf();
        let sink = EventSink::new(file.clone(), events);

        info!(%attempt, "Uploading {} ({} bytes) to Streamwo", video.file_name(), video.size());

        let outcome = match self.try_upload(video, &sink, attempt).await {
            Ok(link_id) => {
                let url = self.config.share_url(&link_id);
                info!(%attempt, "Uploaded {} to {}", video.file_name(), url);
                UploadOutcome::Uploaded { file, link_id, url }
            }
            Err(e) => {
                if e.is_validation() {
                    warn!(%attempt, "Rejected {}: {}", video.file_name(), e);
                } else {
                    warn!(%attempt, "Upload of {} failed: {}", video.file_name(), e);
                }
                UploadOutcome::failed(file, e)
            }
        };

        sink.finish(outcome)
    }
}

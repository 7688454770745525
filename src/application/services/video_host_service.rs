use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedSender;

use crate::domain::models::{
    upload::{UploadEvent, UploadOutcome},
    video::VideoFile,
};

#[async_trait]
pub trait VideoHostService: Send + Sync {
    /// Uploads `video` and returns its terminal outcome.
    ///
    /// Progress and the terminal event are also published on `events`; the
    /// terminal event is always the last one sent for this call.
    async fn upload_video(
        &self,
        video: &VideoFile,
        events: UnboundedSender<UploadEvent>,
    ) -> UploadOutcome;
}

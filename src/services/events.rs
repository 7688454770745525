use std::{
    path::PathBuf,
    sync::{Arc, Mutex, MutexGuard},
};

use tokio::sync::mpsc::UnboundedSender;

use crate::domain::models::upload::{UploadEvent, UploadOutcome};

type SharedSender = Arc<Mutex<Option<UnboundedSender<UploadEvent>>>>;

fn lock(sender: &SharedSender) -> MutexGuard<'_, Option<UnboundedSender<UploadEvent>>> {
    sender.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Owns the event channel of a single upload attempt.
///
/// The terminal event is sent by [`EventSink::finish`], or by `Drop` if the
/// attempt is abandoned first. Either way the sender is taken out under the
/// lock, so progress reporters still held by the transport go quiet.
pub struct EventSink {
    file: PathBuf,
    sender: SharedSender,
}

impl EventSink {
    pub fn new(file: PathBuf, sender: UnboundedSender<UploadEvent>) -> Self {
        Self {
            file,
            sender: Arc::new(Mutex::new(Some(sender))),
        }
    }

    pub fn progress_reporter(&self, bytes_total: u64) -> ProgressReporter {
        ProgressReporter {
            file: self.file.clone(),
            sender: Arc::clone(&self.sender),
            bytes_sent: 0,
            bytes_total,
        }
    }

    pub fn finish(self, outcome: UploadOutcome) -> UploadOutcome {
        if let Some(sender) = lock(&self.sender).take() {
            let _ = sender.send(outcome.clone().into());
        }
        outcome
    }
}

impl Drop for EventSink {
    fn drop(&mut self) {
        if let Some(sender) = lock(&self.sender).take() {
            let _ = sender.send(UploadEvent::Failed {
                file: self.file.clone(),
                error: "Upload cancelled".to_string(),
            });
        }
    }
}

/// Counts bytes handed to the transport and publishes cumulative progress.
pub struct ProgressReporter {
    file: PathBuf,
    sender: SharedSender,
    bytes_sent: u64,
    bytes_total: u64,
}

impl ProgressReporter {
    pub fn advance(&mut self, chunk_len: u64) {
        self.bytes_sent = self
            .bytes_sent
            .saturating_add(chunk_len)
            .min(self.bytes_total);

        if let Some(sender) = lock(&self.sender).as_ref() {
            let _ = sender.send(UploadEvent::Progress {
                file: self.file.clone(),
                bytes_sent: self.bytes_sent,
                bytes_total: self.bytes_total,
            });
        }
    }
}

use std::{process::ExitCode, sync::Arc, time::Duration};

use streamwo_uploader::{
    create_video_host_service, StreamwoConfig, UploadEvent, UploadOutcome, VideoFile,
    VideoHostService,
};
use tokio::{sync::mpsc, task::JoinSet};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

async fn log_progress(mut events: mpsc::UnboundedReceiver<UploadEvent>) {
    let mut last_decile = 0;

    while let Some(event) = events.recv().await {
        match event {
            UploadEvent::Progress {
                file,
                bytes_sent,
                bytes_total,
            } => {
                if bytes_total == 0 {
                    continue;
                }
                let decile = bytes_sent * 10 / bytes_total;
                if decile > last_decile {
                    last_decile = decile;
                    info!(
                        "{}: {}% ({}/{} bytes)",
                        file.display(),
                        decile * 10,
                        bytes_sent,
                        bytes_total
                    );
                }
            }
            UploadEvent::Uploaded { .. } | UploadEvent::Failed { .. } => break,
        }
    }
}

async fn upload_one(service: Arc<dyn VideoHostService>, path: String) -> UploadOutcome {
    let video = match VideoFile::from_path(&path).await {
        Ok(video) => video,
        Err(e) => {
            error!("Cannot open {}: {}", path, e);
            return UploadOutcome::failed(path, format!("Cannot read video file: {}", e));
        }
    };

    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let progress = tokio::spawn(log_progress(events_rx));

    let outcome = service.upload_video(&video, events_tx).await;
    if let Err(e) = progress.await {
        error!("Progress logger for {} failed: {}", video.file_name(), e);
    }

    outcome
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        eprintln!("usage: streamwo-uploader <video.mp4>...");
        return ExitCode::from(2);
    }

    let config = match std::env::var("STREAMWO_CONFIG") {
        Ok(config_path) => StreamwoConfig::from_json_file(&config_path)
            .expect("ERROR: STREAMWO_CONFIG must point to a valid JSON config file"),
        Err(_) => StreamwoConfig::from_env(),
    };

    info!("Uploading {} file(s) to {}", paths.len(), config.base_url);

    let client = reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .build()
        .expect("Failed to build HTTP client");

    let service = create_video_host_service(client, config);

    let mut uploads = JoinSet::new();
    for path in paths {
        uploads.spawn(upload_one(Arc::clone(&service), path));
    }

    let mut all_uploaded = true;
    while let Some(joined) = uploads.join_next().await {
        match joined {
            Ok(outcome) => {
                all_uploaded &= outcome.is_uploaded();
                match serde_json::to_string(&outcome) {
                    Ok(line) => println!("{}", line),
                    Err(e) => error!("Cannot serialize outcome: {}", e),
                }
            }
            Err(e) => {
                all_uploaded = false;
                error!("Upload task failed: {}", e);
            }
        }
    }

    if all_uploaded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

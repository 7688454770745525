mod error;
mod events;
mod link_id;
mod streamwo_service;

pub use link_id::extract_link_id;
pub use streamwo_service::StreamwoService;

use std::sync::Arc;

use reqwest::Client;

use crate::{application::services::VideoHostService, domain::config::streamwo::StreamwoConfig};

pub fn create_video_host_service(
    client: Client,
    config: StreamwoConfig,
) -> Arc<dyn VideoHostService> {
    Arc::new(StreamwoService::new(client, config))
}

//! Client for uploading MP4 videos to Streamwo.
//!
//! An upload fetches the Streamwo home page to scrape its `link_id` token,
//! then posts the video together with that token as a multipart form.

pub mod application;
pub mod domain;
pub mod services;

pub use application::{error::UploadError, services::VideoHostService};
pub use domain::{
    config::streamwo::StreamwoConfig,
    models::{
        upload::{LinkId, UploadEvent, UploadOutcome},
        video::VideoFile,
    },
};
pub use services::{create_video_host_service, extract_link_id, StreamwoService};

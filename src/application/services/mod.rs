mod video_host_service;

pub use video_host_service::VideoHostService;

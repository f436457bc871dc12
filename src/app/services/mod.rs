pub mod codec_service;
pub mod record_service;

pub mod codec_controller;
pub mod record_controller;

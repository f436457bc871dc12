use crate::app::controllers::{codec_controller, record_controller};
use actix_web::web;

pub fn setup_routes(cfg: &mut web::ServiceConfig) -> &mut web::ServiceConfig {
    cfg.service((
        codec_controller::encode_string,
        codec_controller::decode_string,
        codec_controller::encode_cid_fields,
        codec_controller::decode_cid_fields,
        codec_controller::hash,
        codec_controller::parse_struct_dump,
        record_controller::find_campaign,
        record_controller::find_auction,
    ))
}

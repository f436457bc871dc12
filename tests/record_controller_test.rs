use std::sync::Arc;

use actix_web::{http::StatusCode, test, web, App};
use aleo_vote_codec_actix::app::config::AppConfig;
use aleo_vote_codec_actix::app::init::initialize;
use aleo_vote_codec_actix::app::repository::memory_repository::InMemoryRecordSource;
use aleo_vote_codec_actix::app::repository::traits::RecordSource;
use aleo_vote_codec_actix::app::utils::field_codec::{encode_cid_to_fields, encode_string_to_field};
use serde_json::Value;

const CID: &str = "bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi";

fn seeded_source() -> Arc<dyn RecordSource> {
    let source = InMemoryRecordSource::new();
    let fields = encode_cid_to_fields(CID).unwrap();
    let title = encode_string_to_field("Fund the bridge").unwrap();

    let campaign = format!(
        "{{\n  creator: aleo1creator,\n  title: {},\n  metadata_cid: {{\n    part1: {},\n    part2: {}\n  }},\n  option_count: 3u8,\n  total_votes: 42u64,\n  end_block: 900u32,\n  active: true\n}}",
        title, fields.part1, fields.part2
    );
    source.insert("campaigns", "1field", &campaign).unwrap();
    source.insert("campaigns", "2field", "{ }").unwrap();

    let auction = format!(
        "{{ creator: aleo1seller, metadata_cid: {{ part1: {}, part2: {} }}, reserve_price: 100u64, highest_bid: 250u64, bid_count: 4u32, closed: false }}",
        fields.part1, fields.part2
    );
    source.insert("auctions", "5field", &auction).unwrap();
    Arc::new(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn test_get_campaign() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::from(seeded_source()))
                .app_data(web::Data::new(AppConfig::default()))
                .configure(initialize),
        )
        .await;

        let req = test::TestRequest::get().uri("/campaign/1field").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["id"], "1field");
        assert_eq!(body["creator"], "aleo1creator");
        assert_eq!(body["title"], "Fund the bridge");
        assert_eq!(body["metadataCid"], CID);
        assert_eq!(body["totalVotes"], 42);
        assert_eq!(body["endBlock"], 900);
        assert_eq!(body["active"], true);
    }

    #[actix_web::test]
    async fn test_missing_and_empty_campaigns() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::from(seeded_source()))
                .app_data(web::Data::new(AppConfig::default()))
                .configure(initialize),
        )
        .await;

        let req = test::TestRequest::get().uri("/campaign/99field").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Failed to get campaign");

        let req = test::TestRequest::get().uri("/campaign/2field").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get().uri("/campaign/bad%20key").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_get_auction() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::from(seeded_source()))
                .app_data(web::Data::new(AppConfig::default()))
                .configure(initialize),
        )
        .await;

        let req = test::TestRequest::get().uri("/auction/5field").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["creator"], "aleo1seller");
        assert_eq!(body["metadataCid"], CID);
        assert_eq!(body["highestBid"], 250);
        assert_eq!(body["bidCount"], 4);
        assert_eq!(body["closed"], false);
        assert_eq!(body["title"], "");
    }

    #[actix_web::test]
    async fn test_mapping_names_come_from_config() {
        let config = AppConfig {
            campaign_mapping: "auctions".to_string(),
            ..AppConfig::default()
        };
        let app = test::init_service(
            App::new()
                .app_data(web::Data::from(seeded_source()))
                .app_data(web::Data::new(config))
                .configure(initialize),
        )
        .await;

        let req = test::TestRequest::get().uri("/campaign/5field").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["creator"], "aleo1seller");
    }
}

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use aleo_vote_codec_actix::app::config::AppConfig;
use aleo_vote_codec_actix::app::init::initialize;
use aleo_vote_codec_actix::app::repository::rpc_repository::RpcRecordSource;
use aleo_vote_codec_actix::app::repository::traits::RecordSource;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = AppConfig::from_env()?;
    let source: Arc<dyn RecordSource> = Arc::new(RpcRecordSource::new(
        &config.rpc_url,
        &config.network,
        &config.program_id,
    ));
    let source_data = web::Data::from(source);
    let bind = (config.bind_addr.clone(), config.port);
    let allowed_origin = config.allowed_origin.clone();
    let config_data = web::Data::new(config);

    log::info!(
        "serving {} on {}:{}",
        config_data.program_id,
        bind.0,
        bind.1
    );

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&allowed_origin)
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec!["Content-Type", "Origin", "Accept"])
            .max_age(3600);

        App::new()
            .wrap(cors)
            .app_data(source_data.clone())
            .app_data(config_data.clone())
            .configure(initialize)
    })
    .bind(bind)?
    .run()
    .await
}

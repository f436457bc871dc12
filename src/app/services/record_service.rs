use std::io::{Error, ErrorKind};

use actix_web::web;

use crate::app::config::AppConfig;
use crate::app::entities::{auction_entity::Auction, campaign_entity::Campaign};
use crate::app::repository::traits::RecordSource;
use crate::app::utils::struct_parser::{parse_struct, ParsedRecord};

/// Fetches and projects one campaign.
/// NotFound when the key is absent or the stored struct is empty.
pub async fn get_campaign(
    source: web::Data<dyn RecordSource>,
    config: web::Data<AppConfig>,
    id: &str,
) -> Result<Campaign, Error> {
    let record = fetch_record(source.get_ref(), &config.campaign_mapping, id).await?;
    Ok(Campaign::from_record(id, &record))
}

pub async fn get_auction(
    source: web::Data<dyn RecordSource>,
    config: web::Data<AppConfig>,
    id: &str,
) -> Result<Auction, Error> {
    let record = fetch_record(source.get_ref(), &config.auction_mapping, id).await?;
    Ok(Auction::from_record(id, &record))
}

async fn fetch_record(
    source: &dyn RecordSource,
    mapping: &str,
    key: &str,
) -> Result<ParsedRecord, Error> {
    let dump = match source.fetch(mapping, key).await {
        Ok(Some(dump)) => dump,
        Ok(None) => {
            return Err(Error::new(
                ErrorKind::NotFound,
                format!("{} not found in {}", key, mapping),
            ))
        }
        Err(e) => {
            log::warn!("failed to fetch {}/{}: {}", mapping, key, e);
            return Err(Error::new(ErrorKind::Other, e.to_string()));
        }
    };
    log::info!("fetched {}/{}", mapping, key);

    match parse_struct(&dump) {
        Some(record) => Ok(record),
        None => Err(Error::new(
            ErrorKind::NotFound,
            format!("{} in {} holds an empty struct", key, mapping),
        )),
    }
}

/// Mapping keys are Aleo literals such as `12field` or `3u64`.
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key.len() <= 128
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'.')
}

use std::env;
use std::io::{Error, ErrorKind};

use crate::app::utils::field_codec::FieldHasher;

/// Runtime settings, read from the environment. `main` loads `.env` first.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub port: u16,
    pub allowed_origin: String,
    pub rpc_url: String,
    pub network: String,
    pub program_id: String,
    pub campaign_mapping: String,
    pub auction_mapping: String,
    pub hasher: FieldHasher,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            bind_addr: "127.0.0.1".to_string(),
            port: 8080,
            allowed_origin: "http://localhost:3000".to_string(),
            rpc_url: "https://api.explorer.provable.com/v1".to_string(),
            network: "testnet".to_string(),
            program_id: "vote_auction.aleo".to_string(),
            campaign_mapping: "campaigns".to_string(),
            auction_mapping: "auctions".to_string(),
            hasher: FieldHasher::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, Error> {
        let defaults = AppConfig::default();

        let port = match env::var("PORT") {
            Ok(port) => port.parse::<u16>().map_err(|e| {
                Error::new(ErrorKind::InvalidInput, format!("Invalid PORT: {}", e))
            })?,
            Err(_) => defaults.port,
        };

        let hasher = match env::var("FIELD_HASH_MODULUS") {
            Ok(modulus) => FieldHasher::from_decimal(&modulus).map_err(|e| {
                Error::new(
                    ErrorKind::InvalidInput,
                    format!("Invalid FIELD_HASH_MODULUS: {}", e),
                )
            })?,
            Err(_) => defaults.hasher,
        };

        Ok(AppConfig {
            bind_addr: env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            port,
            allowed_origin: env::var("ALLOWED_ORIGIN").unwrap_or(defaults.allowed_origin),
            rpc_url: env::var("ALEO_RPC_URL").unwrap_or(defaults.rpc_url),
            network: env::var("ALEO_NETWORK").unwrap_or(defaults.network),
            program_id: env::var("PROGRAM_ID").unwrap_or(defaults.program_id),
            campaign_mapping: env::var("CAMPAIGN_MAPPING").unwrap_or(defaults.campaign_mapping),
            auction_mapping: env::var("AUCTION_MAPPING").unwrap_or(defaults.auction_mapping),
            hasher,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test owns these variables so parallel tests never see them half set.
    #[test]
    fn from_env_reads_process_environment() {
        env::set_var("CAMPAIGN_MAPPING", "campaigns_v2");
        env::set_var("PORT", "9090");
        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.campaign_mapping, "campaigns_v2");
        assert_eq!(config.port, 9090);
        assert_eq!(config.auction_mapping, AppConfig::default().auction_mapping);

        env::set_var("PORT", "not-a-port");
        let err = AppConfig::from_env().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);

        env::remove_var("CAMPAIGN_MAPPING");
        env::remove_var("PORT");
    }
}

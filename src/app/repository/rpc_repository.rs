use async_trait::async_trait;
use reqwest::Client;

use super::traits::{RecordSource, SourceError, SourceResult};

/// Reads public mapping values through an Aleo node's REST API:
/// `GET {endpoint}/{network}/program/{program}/mapping/{mapping}/{key}`.
pub struct RpcRecordSource {
    client: Client,
    endpoint: String,
    network: String,
    program_id: String,
}

impl RpcRecordSource {
    pub fn new(endpoint: &str, network: &str, program_id: &str) -> Self {
        RpcRecordSource {
            client: Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            network: network.to_string(),
            program_id: program_id.to_string(),
        }
    }

    pub fn mapping_url(&self, mapping: &str, key: &str) -> String {
        format!(
            "{}/{}/program/{}/mapping/{}/{}",
            self.endpoint, self.network, self.program_id, mapping, key
        )
    }
}

#[async_trait]
impl RecordSource for RpcRecordSource {
    async fn fetch(&self, mapping: &str, key: &str) -> SourceResult<Option<String>> {
        let url = self.mapping_url(mapping, key);
        log::debug!("fetching {}", url);

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => return Err(SourceError::Transport(e.to_string())),
        };

        if !response.status().is_success() {
            return Err(SourceError::Rpc {
                status: response.status().as_u16(),
            });
        }

        // The node answers with a JSON string holding the struct dump, or null.
        match response.json::<Option<String>>().await {
            Ok(body) => Ok(body),
            Err(e) => Err(SourceError::InvalidBody(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_mapping_url() {
        let source = RpcRecordSource::new("https://api.example.com/v1/", "testnet", "vote_auction.aleo");
        assert_eq!(
            source.mapping_url("campaigns", "1field"),
            "https://api.example.com/v1/testnet/program/vote_auction.aleo/mapping/campaigns/1field"
        );
    }
}

use serde::{Deserialize, Serialize};

use crate::app::utils::field_codec::{decode_field_to_string, decode_fields_to_cid};
use crate::app::utils::struct_parser::{ParsedRecord, CID_PART1_KEY, CID_PART2_KEY};

/// A voting campaign as stored in the program's `campaigns` mapping.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Campaign {
    #[serde(rename = "id")]
    pub id: String,

    #[serde(rename = "creator")]
    pub creator: String,

    /// Empty when the stored title could not be decoded.
    #[serde(rename = "title")]
    pub title: String,

    /// Empty when the metadata CID is unavailable.
    #[serde(rename = "metadataCid")]
    pub metadata_cid: String,

    #[serde(rename = "optionCount")]
    pub option_count: u64,

    #[serde(rename = "totalVotes")]
    pub total_votes: u64,

    #[serde(rename = "endBlock")]
    pub end_block: Option<u64>,

    #[serde(rename = "active")]
    pub active: bool,
}

impl Campaign {
    pub fn from_record(id: &str, record: &ParsedRecord) -> Self {
        Campaign {
            id: id.to_string(),
            creator: record.get("creator").unwrap_or_default().to_string(),
            title: record.get("title").map(decode_field_to_string).unwrap_or_default(),
            metadata_cid: metadata_cid(record),
            option_count: record.get_u64("option_count").unwrap_or(0),
            total_votes: record.get_u64("total_votes").unwrap_or(0),
            end_block: record.get_u64("end_block"),
            active: record.get_bool("active").unwrap_or(false),
        }
    }
}

pub(crate) fn metadata_cid(record: &ParsedRecord) -> String {
    match (record.get(CID_PART1_KEY), record.get(CID_PART2_KEY)) {
        (Some(part1), Some(part2)) => decode_fields_to_cid(part1, part2),
        _ => String::new(),
    }
}

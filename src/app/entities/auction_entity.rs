use serde::{Deserialize, Serialize};

use super::campaign_entity::metadata_cid;
use crate::app::utils::field_codec::decode_field_to_string;
use crate::app::utils::struct_parser::ParsedRecord;

/// A sealed-bid auction as stored in the program's `auctions` mapping.
/// Individual bids stay private; only aggregates are public.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Auction {
    #[serde(rename = "id")]
    pub id: String,

    #[serde(rename = "creator")]
    pub creator: String,

    #[serde(rename = "title")]
    pub title: String,

    #[serde(rename = "metadataCid")]
    pub metadata_cid: String,

    #[serde(rename = "reservePrice")]
    pub reserve_price: u64,

    #[serde(rename = "highestBid")]
    pub highest_bid: u64,

    #[serde(rename = "bidCount")]
    pub bid_count: u64,

    #[serde(rename = "endBlock")]
    pub end_block: Option<u64>,

    #[serde(rename = "closed")]
    pub closed: bool,
}

impl Auction {
    pub fn from_record(id: &str, record: &ParsedRecord) -> Self {
        Auction {
            id: id.to_string(),
            creator: record.get("creator").unwrap_or_default().to_string(),
            title: record.get("title").map(decode_field_to_string).unwrap_or_default(),
            metadata_cid: metadata_cid(record),
            reserve_price: record.get_u64("reserve_price").unwrap_or(0),
            highest_bid: record.get_u64("highest_bid").unwrap_or(0),
            bid_count: record.get_u64("bid_count").unwrap_or(0),
            end_block: record.get_u64("end_block"),
            closed: record.get_bool("closed").unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::utils::struct_parser::parse_struct;

    #[test]
    fn projects_auction_with_fallback_cid() {
        let dump = "{ creator: aleo1seller, part1: 24833field, part2: 0field, reserve_price: 100u64, highest_bid: 250u64, bid_count: 4u32, closed: true }";
        let record = parse_struct(dump).unwrap();
        let auction = Auction::from_record("3field", &record);

        assert_eq!(auction.creator, "aleo1seller");
        // "a" + "" decodes exactly: both halves carry a length tag
        assert_eq!(auction.metadata_cid, "a");
        assert_eq!(auction.reserve_price, 100);
        assert_eq!(auction.highest_bid, 250);
        assert_eq!(auction.bid_count, 4);
        assert!(auction.closed);
        assert_eq!(auction.end_block, None);
    }
}

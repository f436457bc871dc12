pub mod auction_entity;
pub mod campaign_entity;

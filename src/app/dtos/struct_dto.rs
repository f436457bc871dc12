use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::app::utils::struct_parser::ParsedRecord;

#[derive(Serialize, Deserialize, Validate, Debug)]
pub struct ParseStructDto {
    #[validate(length(max = 65536, message = "Struct dump must not exceed 65536 characters"))]
    pub text: String,
}

/// `record` is null when the dump had nothing between its braces.
#[derive(Serialize, Debug)]
pub struct ParseStructResponseDto {
    pub record: Option<ParsedRecord>,
}

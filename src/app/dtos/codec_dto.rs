use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::app::utils::field_codec::{FieldValue, FIELD_SUFFIX, MAX_CID_LENGTH};

fn validate_field_literal(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    let digits = value.strip_suffix(FIELD_SUFFIX).unwrap_or(value);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        Err(ValidationError::new(
            "Field must be decimal digits, optionally followed by 'field'",
        ))
    } else {
        Ok(())
    }
}

/// Measured on the trimmed CID, which is what gets encoded.
fn validate_cid_length(cid: &str) -> Result<(), ValidationError> {
    let length = cid.trim().chars().count();
    if length == 0 || length > MAX_CID_LENGTH {
        Err(ValidationError::new("CID must be between 1 and 62 characters"))
    } else {
        Ok(())
    }
}

/// The 31-byte limit is enforced by the codec, not by validation.
#[derive(Serialize, Deserialize, Debug)]
pub struct EncodeStringDto {
    pub text: String,
}

#[derive(Serialize, Deserialize, Validate, Debug)]
pub struct DecodeFieldDto {
    #[validate(custom = "validate_field_literal")]
    pub field: String,
}

#[derive(Serialize, Deserialize, Validate, Debug)]
pub struct EncodeCidDto {
    #[validate(custom = "validate_cid_length")]
    pub cid: String,
}

#[derive(Serialize, Deserialize, Validate, Debug)]
pub struct DecodeCidDto {
    #[validate(custom = "validate_field_literal")]
    pub part1: String,

    #[validate(custom = "validate_field_literal")]
    pub part2: String,
}

/// Any text hashes, the empty string included.
#[derive(Serialize, Deserialize, Debug)]
pub struct HashDto {
    pub input: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct FieldResponseDto {
    pub field: FieldValue,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct TextResponseDto {
    pub text: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct CidFieldsResponseDto {
    pub part1: FieldValue,
    pub part2: FieldValue,
}

/// `available` is false when the stored halves did not yield a CID.
#[derive(Serialize, Deserialize, Debug)]
pub struct CidResponseDto {
    pub cid: String,
    pub available: bool,
}

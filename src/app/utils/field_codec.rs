//! Packing of short strings and IPFS CIDs into Aleo `field` literals.
//!
//! A packed string is `big_endian(bytes) << 8 | byte_length`, rendered as
//! `<digits>field`. At most 31 bytes fit in one value, which keeps the result
//! below the field modulus. CIDs are split into two such values.
//!
//! Every decode path soft-fails to an empty string: values read back from the
//! chain may come from an older encoder (no length tag) or be unrelated
//! integers, and a page must still render.

use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;
use num_traits::Zero;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::app::errors::CodecError;

pub const MAX_PACKED_BYTES: usize = 31;
pub const MAX_CID_LENGTH: usize = 2 * MAX_PACKED_BYTES;
pub const FIELD_SUFFIX: &str = "field";

/// More than this many printable bytes out of 31 marks a legacy value as text.
const LEGACY_PRINTABLE_THRESHOLD: usize = 20;

const KNOWN_CID_PREFIXES: [&str; 3] = ["Qm", "bafy", "bafk"];
const RECOVERY_PREFIXES: [&str; 4] = ["bafkrei", "bafybei", "bafkree", "bafybee"];
const RECOVERY_MIN_CLEANED: usize = 30;
const RECOVERY_LENGTH_WINDOW: std::ops::RangeInclusive<usize> = 50..=65;

/// Aleo scalar field modulus,
/// 2111115437357092606062206234695386632838870926408408195193685246394721360383.
const ALEO_SCALAR_MODULUS_BE: [u8; 32] = [
    0x04, 0xaa, 0xd9, 0x57, 0xa6, 0x8b, 0x29, 0x55, 0x98, 0x2d, 0x13, 0x47, 0x97, 0x0d, 0xec, 0x00,
    0x52, 0x93, 0xa3, 0xaf, 0xc4, 0x3c, 0x8a, 0xfe, 0xb9, 0x5a, 0xee, 0x9a, 0xc3, 0x3f, 0xd9, 0xff,
];

/// A field element as it appears in Aleo literals: `<digits>field`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FieldValue(BigUint);

impl FieldValue {
    pub fn value(&self) -> &BigUint {
        &self.0
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0, FIELD_SUFFIX)
    }
}

impl FromStr for FieldValue {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .trim()
            .strip_suffix(FIELD_SUFFIX)
            .ok_or_else(|| CodecError::MalformedField(s.to_string()))?;
        parse_decimal(digits)
            .map(FieldValue)
            .ok_or_else(|| CodecError::MalformedField(s.to_string()))
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// The two halves of an encoded CID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CidFields {
    pub part1: FieldValue,
    pub part2: FieldValue,
}

/// Which decoder recognised a field value as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeMethod {
    /// Current encoder: low byte carries the byte length.
    LengthTagged,
    /// Legacy encoder: 31 raw bytes with no length tag.
    FixedWidth,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub text: String,
    pub method: DecodeMethod,
}

pub fn encode_string_to_field(input: &str) -> Result<FieldValue, CodecError> {
    let bytes = input.as_bytes();
    if bytes.len() > MAX_PACKED_BYTES {
        return Err(CodecError::ValueTooLarge {
            size: bytes.len(),
            max: MAX_PACKED_BYTES,
        });
    }
    let packed = (BigUint::from_bytes_be(bytes) << 8u32) + BigUint::from(bytes.len() as u8);
    Ok(FieldValue(packed))
}

/// Decodes a packed string, returning "" when the value is not recognisable text.
///
/// Accepts `<digits>field` as well as bare digits, since struct dumps are
/// usually read with their type suffix already stripped.
pub fn decode_field_to_string(field: &str) -> String {
    decode_field(field).map(|decoded| decoded.text).unwrap_or_default()
}

/// Like [`decode_field_to_string`], but reports which decoder succeeded.
pub fn decode_field(field: &str) -> Option<DecodedText> {
    let value = parse_field_digits(field)?;
    if value.is_zero() {
        // Zero is how the empty string encodes.
        return Some(DecodedText {
            text: String::new(),
            method: DecodeMethod::LengthTagged,
        });
    }
    if let Some(text) = decode_length_tagged(&value) {
        return Some(DecodedText {
            text,
            method: DecodeMethod::LengthTagged,
        });
    }
    log::debug!("length-tagged decode rejected {}, trying fixed-width", field.trim());
    decode_fixed_width(&value).map(|text| DecodedText {
        text,
        method: DecodeMethod::FixedWidth,
    })
}

pub fn encode_cid_to_fields(cid: &str) -> Result<CidFields, CodecError> {
    let (first, second) = split_cid(cid);
    let fields = CidFields {
        part1: encode_string_to_field(first)?,
        part2: encode_string_to_field(second)?,
    };

    let check1 = decode_field_to_string(&fields.part1.to_string());
    let check2 = decode_field_to_string(&fields.part2.to_string());
    if check1 != first || check2 != second {
        log::warn!(
            "CID encode/decode mismatch for {}: got {:?} + {:?}",
            cid,
            check1,
            check2
        );
    }
    Ok(fields)
}

/// Rebuilds a CID from its two stored halves, or "" when nothing plausible
/// comes out. An empty result means "metadata unavailable".
pub fn decode_fields_to_cid(part1: &str, part2: &str) -> String {
    let first = decode_field(part1);
    let second = decode_field(part2);

    let exact = matches!(
        (&first, &second),
        (Some(a), Some(b)) if a.method == DecodeMethod::LengthTagged && b.method == DecodeMethod::LengthTagged
    );
    let mut cid = first.map(|d| d.text).unwrap_or_default();
    cid.push_str(&second.map(|d| d.text).unwrap_or_default());

    if cid.is_empty() {
        return cid;
    }
    if exact || has_known_cid_prefix(&cid) {
        return cid;
    }
    match recover_cid(&cid) {
        Some(recovered) => {
            log::debug!("recovered CID {} from {:?}", recovered, cid);
            recovered
        }
        None => String::new(),
    }
}

pub fn has_known_cid_prefix(cid: &str) -> bool {
    KNOWN_CID_PREFIXES.iter().any(|prefix| cid.starts_with(prefix))
}

/// Best-effort repair of a base32 CID that lost its multibase/codec prefix.
/// Lossy by nature; never part of the exact round trip.
pub fn recover_cid(garbled: &str) -> Option<String> {
    let cleaned: String = garbled
        .chars()
        .filter(|c| matches!(c, 'a'..='z' | '2'..='7'))
        .collect();
    if cleaned.len() <= RECOVERY_MIN_CLEANED {
        return None;
    }
    RECOVERY_PREFIXES
        .iter()
        .map(|prefix| format!("{}{}", prefix, cleaned))
        .find(|candidate| RECOVERY_LENGTH_WINDOW.contains(&candidate.len()))
}

/// Reduces arbitrary text to a field element, used as a pseudonymous lookup
/// key. This is a modular reduction, not a cryptographic hash: there is no
/// collision resistance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldHasher {
    modulus: BigUint,
}

impl FieldHasher {
    pub fn new(modulus: BigUint) -> Result<Self, CodecError> {
        if modulus.is_zero() {
            return Err(CodecError::InvalidModulus);
        }
        Ok(FieldHasher { modulus })
    }

    pub fn from_decimal(modulus: &str) -> Result<Self, CodecError> {
        let modulus = parse_decimal(modulus.trim()).ok_or(CodecError::InvalidModulus)?;
        Self::new(modulus)
    }

    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    pub fn hash_to_field(&self, input: &str) -> FieldValue {
        let acc = input.bytes().fold(BigUint::zero(), |acc, byte| {
            (acc * 256u32 + u32::from(byte)) % &self.modulus
        });
        FieldValue(acc)
    }
}

impl Default for FieldHasher {
    fn default() -> Self {
        FieldHasher {
            modulus: BigUint::from_bytes_be(&ALEO_SCALAR_MODULUS_BE),
        }
    }
}

fn parse_decimal(digits: &str) -> Option<BigUint> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    BigUint::parse_bytes(digits.as_bytes(), 10)
}

fn parse_field_digits(field: &str) -> Option<BigUint> {
    let trimmed = field.trim();
    parse_decimal(trimmed.strip_suffix(FIELD_SUFFIX).unwrap_or(trimmed))
}

fn split_cid(cid: &str) -> (&str, &str) {
    match cid.char_indices().nth(MAX_PACKED_BYTES) {
        Some((idx, _)) => cid.split_at(idx),
        None => (cid, ""),
    }
}

fn decode_length_tagged(value: &BigUint) -> Option<String> {
    let be = value.to_bytes_be();
    let (length, data) = be.split_last()?;
    let length = usize::from(*length);
    // Leftover high bytes mean this was never a packed string.
    if length == 0 || length > MAX_PACKED_BYTES || data.len() > length {
        return None;
    }
    let mut bytes = vec![0u8; length - data.len()];
    bytes.extend_from_slice(data);

    let text = String::from_utf8(bytes).ok()?;
    if text.chars().all(is_plausible_char) {
        Some(text)
    } else {
        None
    }
}

fn decode_fixed_width(value: &BigUint) -> Option<String> {
    let be = value.to_bytes_be();
    let low = &be[be.len().saturating_sub(MAX_PACKED_BYTES)..];
    let mut bytes = [0u8; MAX_PACKED_BYTES];
    bytes[MAX_PACKED_BYTES - low.len()..].copy_from_slice(low);

    let printable = bytes.iter().filter(|b| is_printable_ascii(**b)).count();
    if printable <= LEGACY_PRINTABLE_THRESHOLD {
        return None;
    }
    let start = bytes.iter().position(|b| !is_control_byte(*b))?;
    let end = bytes.iter().rposition(|b| !is_control_byte(*b))?;
    std::str::from_utf8(&bytes[start..=end])
        .ok()
        .map(str::to_string)
}

fn is_plausible_char(c: char) -> bool {
    !c.is_control() || matches!(c, '\t' | '\n' | '\r')
}

fn is_printable_ascii(b: u8) -> bool {
    (32..=126).contains(&b)
}

fn is_control_byte(b: u8) -> bool {
    b < 32 || b == 127
}

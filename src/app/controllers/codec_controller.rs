use actix_web::{post, web, HttpResponse, Responder};
use serde_json::json;
use validator::Validate;

use crate::app::config::AppConfig;
use crate::app::dtos::codec_dto::{
    DecodeCidDto, DecodeFieldDto, EncodeCidDto, EncodeStringDto, HashDto,
};
use crate::app::dtos::struct_dto::ParseStructDto;
use crate::app::services::codec_service::{
    decode_cid, decode_text, encode_cid, encode_text, hash_input, parse_dump,
};

/// Encode a short string into one field
///
/// # API Endpoint
///
/// ```not_rust
/// POST /codec/string/encode
/// Content-Type: application/json
/// ```
///
/// # Request Body
///
/// ```json
/// { "text": "hi" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
///
/// ```json
/// { "field": "6842626field" }
/// ```
///
/// ## Error Responses
///
/// ### 400 Bad Request
///
/// Returned when the text is longer than 31 UTF-8 bytes:
///
/// ```json
/// {
///     "message": "Value too large",
///     "Error": "value too large: 40 bytes exceeds maximum 31 bytes"
/// }
/// ```
#[post("/codec/string/encode")]
pub async fn encode_string(dto: web::Json<EncodeStringDto>) -> impl Responder {
    match encode_text(dto.into_inner()) {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => HttpResponse::BadRequest().json(json!({
            "message": "Value too large",
            "Error": e.to_string()
        })),
    }
}

/// Decode a field back into text
///
/// # API Endpoint
///
/// ```not_rust
/// POST /codec/string/decode
/// ```
///
/// Undecodable values are not an error: `text` comes back empty.
#[post("/codec/string/decode")]
pub async fn decode_string(dto: web::Json<DecodeFieldDto>) -> impl Responder {
    let dto = dto.into_inner();
    if let Err(e) = dto.validate() {
        return HttpResponse::BadRequest().json(json!({
            "message": "Invalid input",
            "Error": e
        }));
    }
    HttpResponse::Ok().json(decode_text(dto))
}

/// Split and encode an IPFS CID
///
/// # API Endpoint
///
/// ```not_rust
/// POST /codec/cid/encode
/// ```
///
/// # Request Body
///
/// ```json
/// { "cid": "bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi" }
/// ```
///
/// # Validation Rules
///
/// - `cid`: between 1 and 62 characters
///
/// # Response
///
/// ## Success (200 OK)
///
/// ```json
/// { "part1": "...field", "part2": "...field" }
/// ```
#[post("/codec/cid/encode")]
pub async fn encode_cid_fields(dto: web::Json<EncodeCidDto>) -> impl Responder {
    let dto = dto.into_inner();
    if let Err(e) = dto.validate() {
        return HttpResponse::BadRequest().json(json!({
            "message": "Invalid input",
            "Error": e
        }));
    }

    match encode_cid(dto) {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => HttpResponse::BadRequest().json(json!({
            "message": "Failed to encode CID",
            "Error": e.to_string()
        })),
    }
}

/// Rebuild a CID from its two stored halves
///
/// ```not_rust
/// POST /codec/cid/decode
/// ```
///
/// Returns `{"cid": "", "available": false}` when nothing plausible decodes.
#[post("/codec/cid/decode")]
pub async fn decode_cid_fields(dto: web::Json<DecodeCidDto>) -> impl Responder {
    let dto = dto.into_inner();
    if let Err(e) = dto.validate() {
        return HttpResponse::BadRequest().json(json!({
            "message": "Invalid input",
            "Error": e
        }));
    }
    HttpResponse::Ok().json(decode_cid(dto))
}

/// Reduce text to a field element under the configured modulus
///
/// # API Endpoint
///
/// ```not_rust
/// POST /codec/hash
/// Content-Type: application/json
/// ```
///
/// # Request Body
///
/// ```json
/// { "input": "aleo1abc" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
///
/// ```json
/// { "field": "7020097447408001635field" }
/// ```
///
/// The empty string hashes to `0field`. This is a lookup key, not a
/// cryptographic hash.
#[post("/codec/hash")]
pub async fn hash(config: web::Data<AppConfig>, dto: web::Json<HashDto>) -> impl Responder {
    HttpResponse::Ok().json(hash_input(&config.hasher, dto.into_inner()))
}

/// Parse a mapping struct dump
///
/// ```not_rust
/// POST /struct/parse
/// ```
///
/// # Request Body
///
/// ```json
/// { "text": "{ metadata_cid: { part1: 123field, part2: 456field }, total_votes: 7u64 }" }
/// ```
///
/// # Response
///
/// ```json
/// {
///     "record": {
///         "metadata_cid.part1": "123field",
///         "metadata_cid.part2": "456field",
///         "total_votes": "7"
///     }
/// }
/// ```
///
/// `record` is null for an empty struct.
#[post("/struct/parse")]
pub async fn parse_struct_dump(dto: web::Json<ParseStructDto>) -> impl Responder {
    let dto = dto.into_inner();
    if let Err(e) = dto.validate() {
        return HttpResponse::BadRequest().json(json!({
            "message": "Invalid input",
            "Error": e
        }));
    }
    HttpResponse::Ok().json(parse_dump(dto))
}

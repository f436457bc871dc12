use std::io::{Error, ErrorKind};

use crate::app::dtos::codec_dto::{
    CidFieldsResponseDto, CidResponseDto, DecodeCidDto, DecodeFieldDto, EncodeCidDto,
    EncodeStringDto, FieldResponseDto, HashDto, TextResponseDto,
};
use crate::app::dtos::struct_dto::{ParseStructDto, ParseStructResponseDto};
use crate::app::utils::field_codec::{
    decode_field_to_string, decode_fields_to_cid, encode_cid_to_fields, encode_string_to_field,
    FieldHasher,
};
use crate::app::utils::struct_parser::parse_struct;

pub fn encode_text(dto: EncodeStringDto) -> Result<FieldResponseDto, Error> {
    match encode_string_to_field(&dto.text) {
        Ok(field) => Ok(FieldResponseDto { field }),
        Err(e) => Err(Error::new(ErrorKind::InvalidInput, e.to_string())),
    }
}

pub fn decode_text(dto: DecodeFieldDto) -> TextResponseDto {
    TextResponseDto {
        text: decode_field_to_string(&dto.field),
    }
}

pub fn encode_cid(dto: EncodeCidDto) -> Result<CidFieldsResponseDto, Error> {
    let fields = encode_cid_to_fields(dto.cid.trim())
        .map_err(|e| Error::new(ErrorKind::InvalidInput, e.to_string()))?;
    Ok(CidFieldsResponseDto {
        part1: fields.part1,
        part2: fields.part2,
    })
}

pub fn decode_cid(dto: DecodeCidDto) -> CidResponseDto {
    let cid = decode_fields_to_cid(&dto.part1, &dto.part2);
    if cid.is_empty() {
        log::debug!("no CID recovered from {} / {}", dto.part1, dto.part2);
    }
    CidResponseDto {
        available: !cid.is_empty(),
        cid,
    }
}

pub fn hash_input(hasher: &FieldHasher, dto: HashDto) -> FieldResponseDto {
    FieldResponseDto {
        field: hasher.hash_to_field(&dto.input),
    }
}

pub fn parse_dump(dto: ParseStructDto) -> ParseStructResponseDto {
    ParseStructResponseDto {
        record: parse_struct(&dto.text),
    }
}

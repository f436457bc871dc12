pub mod codec_dto;
pub mod struct_dto;

pub mod field_codec;
pub mod struct_parser;

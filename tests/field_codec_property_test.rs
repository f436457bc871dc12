//! Property tests for the field codec and struct parser.

use aleo_vote_codec_actix::app::errors::CodecError;
use aleo_vote_codec_actix::app::utils::field_codec::{
    decode_field_to_string, decode_fields_to_cid, encode_cid_to_fields, encode_string_to_field,
    FieldHasher, MAX_PACKED_BYTES,
};
use aleo_vote_codec_actix::app::utils::struct_parser::parse_struct;
use proptest::prelude::*;

/// Text without control characters that fits in 31 UTF-8 bytes. Seven
/// characters of at most four bytes each always fit.
fn packable_text() -> impl Strategy<Value = String> {
    prop_oneof!["[ -~]{0,31}", "\\PC{0,7}"]
}

proptest! {
    #[test]
    fn string_round_trip(text in packable_text()) {
        prop_assume!(text.len() <= MAX_PACKED_BYTES);
        let field = encode_string_to_field(&text).unwrap();
        prop_assert_eq!(decode_field_to_string(&field.to_string()), text);
    }

    #[test]
    fn cid_round_trip(cid in "[ -~]{1,62}") {
        let fields = encode_cid_to_fields(&cid).unwrap();
        let decoded = decode_fields_to_cid(&fields.part1.to_string(), &fields.part2.to_string());
        prop_assert_eq!(decoded, cid);
    }

    #[test]
    fn oversized_text_is_rejected(text in "[a-z]{32,80}") {
        let is_too_large = matches!(
            encode_string_to_field(&text),
            Err(CodecError::ValueTooLarge { .. })
        );
        prop_assert!(is_too_large);
    }

    #[test]
    fn decoding_arbitrary_literals_never_panics(digits in "[0-9]{1,120}") {
        let _ = decode_field_to_string(&format!("{}field", digits));
        let _ = decode_fields_to_cid(&format!("{}field", digits), &format!("{}field", digits));
    }

    #[test]
    fn hash_stays_below_modulus(input in ".{0,64}") {
        let hasher = FieldHasher::default();
        prop_assert!(hasher.hash_to_field(&input).value() < hasher.modulus());
    }

    #[test]
    fn parser_never_panics(text in ".{0,200}") {
        let _ = parse_struct(&text);
    }
}

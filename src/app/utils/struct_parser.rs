//! Parser for the struct dumps returned by Aleo's public-mapping RPC, e.g.
//!
//! ```text
//! {
//!   creator: aleo1...,
//!   metadata_cid: {
//!     part1: 1234field,
//!     part2: 5678field
//!   },
//!   total_votes: 7u64
//! }
//! ```
//!
//! The dump is parsed recursively over balanced braces and flattened into
//! dotted keys (`metadata_cid.part1`). Parsing is lenient: entries that do not
//! parse are skipped rather than failing the whole record.

use std::collections::BTreeMap;

use serde::Serialize;

use super::field_codec::FIELD_SUFFIX;

pub const CID_PART1_KEY: &str = "metadata_cid.part1";
pub const CID_PART2_KEY: &str = "metadata_cid.part2";

/// Structs nested deeper than this are skipped as unparsable entries.
pub const MAX_DEPTH: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructValue {
    Scalar(String),
    Struct(Vec<(String, StructValue)>),
}

/// Flat view of one struct dump. Keys of nested structs are dot-qualified and
/// values have their type suffix removed, except CID halves which keep their
/// `field` literal for decoding.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct ParsedRecord {
    fields: BTreeMap<String, String>,
}

impl ParsedRecord {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.get(key)?.parse().ok()
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.get(key)? {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, String)> for ParsedRecord {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        ParsedRecord {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Parses a struct dump into a flat record.
///
/// Returns `None` only when there is nothing between the outer braces.
pub fn parse_struct(text: &str) -> Option<ParsedRecord> {
    let entries = parse_struct_tree(text)?;
    let mut fields = BTreeMap::new();
    flatten("", &entries, &mut fields);
    apply_cid_fallback(text, &mut fields);
    Some(ParsedRecord { fields })
}

/// Parses a struct dump into its entry tree without flattening.
pub fn parse_struct_tree(text: &str) -> Option<Vec<(String, StructValue)>> {
    let body = strip_outer_braces(text.trim());
    if body.trim().is_empty() {
        return None;
    }
    Some(Parser::new(body).parse_entries(0))
}

/// Removes a trailing Aleo type suffix: `7u64` -> `7`, `-3i8` -> `-3`,
/// `12field` -> `12`, `truebool` -> `true`.
pub fn strip_type_suffix(value: &str) -> &str {
    if let Some(number) = strip_numeric_suffix(value) {
        return number;
    }
    for suffix in ["bool", "address"] {
        if value.len() > suffix.len() && ends_with_ignore_case(value, suffix) {
            return &value[..value.len() - suffix.len()];
        }
    }
    value
}

fn strip_outer_braces(text: &str) -> &str {
    let text = text.strip_prefix('{').unwrap_or(text);
    text.strip_suffix('}').unwrap_or(text)
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Parser { src, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b) if b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    /// Reads entries until the closing brace of this level (consumed) or the
    /// end of input, which also closes any open braces.
    fn parse_entries(&mut self, depth: usize) -> Vec<(String, StructValue)> {
        let mut entries = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                None => break,
                Some(b',') => self.pos += 1,
                Some(b'}') => {
                    self.pos += 1;
                    if depth > 0 {
                        break;
                    }
                    log::debug!("ignoring stray '}}' at offset {}", self.pos - 1);
                }
                Some(_) => {
                    let start = self.pos;
                    match self.parse_entry(depth) {
                        Some(entry) => entries.push(entry),
                        None => {
                            self.skip_to_delimiter();
                            log::debug!(
                                "skipped unparsable struct entry {:?}",
                                &self.src[start..self.pos]
                            );
                        }
                    }
                }
            }
        }
        entries
    }

    fn parse_entry(&mut self, depth: usize) -> Option<(String, StructValue)> {
        let key = self.parse_identifier()?;
        self.skip_whitespace();
        if self.peek() != Some(b':') {
            return None;
        }
        self.pos += 1;
        self.skip_whitespace();

        if self.peek() == Some(b'{') {
            if depth >= MAX_DEPTH {
                return None;
            }
            self.pos += 1;
            let children = self.parse_entries(depth + 1);
            return Some((key, StructValue::Struct(children)));
        }
        let scalar = self.parse_scalar();
        if scalar.is_empty() {
            return None;
        }
        Some((key, StructValue::Scalar(scalar)))
    }

    fn parse_identifier(&mut self) -> Option<String> {
        let start = self.pos;
        match self.peek() {
            Some(b) if b.is_ascii_alphabetic() || b == b'_' => self.pos += 1,
            _ => return None,
        }
        while matches!(self.peek(), Some(b) if b.is_ascii_alphanumeric() || b == b'_') {
            self.pos += 1;
        }
        Some(self.src[start..self.pos].to_string())
    }

    /// A scalar runs to the next `,`, `{` or `}` outside square brackets, so
    /// array literals stay in one value.
    fn parse_scalar(&mut self) -> String {
        let start = self.pos;
        let mut brackets = 0usize;
        while let Some(b) = self.peek() {
            match b {
                b'[' => brackets += 1,
                b']' => brackets = brackets.saturating_sub(1),
                b',' | b'{' | b'}' if brackets == 0 => break,
                _ => {}
            }
            self.pos += 1;
        }
        collapse_whitespace(&self.src[start..self.pos])
    }

    fn skip_to_delimiter(&mut self) {
        let mut depth = 0usize;
        while let Some(b) = self.peek() {
            match b {
                b',' | b'}' if depth == 0 => break,
                b'{' => depth += 1,
                b'}' => depth -= 1,
                _ => {}
            }
            self.pos += 1;
        }
    }
}

fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn flatten(prefix: &str, entries: &[(String, StructValue)], out: &mut BTreeMap<String, String>) {
    for (key, value) in entries {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            StructValue::Scalar(raw) => {
                out.insert(path, strip_type_suffix(raw).to_string());
            }
            StructValue::Struct(children) if is_cid_holder(children) => {
                for (child, value) in children {
                    if let StructValue::Scalar(raw) = value {
                        out.insert(
                            format!("{}.{}", path, child.to_ascii_lowercase()),
                            raw.clone(),
                        );
                    }
                }
            }
            StructValue::Struct(children) => flatten(&path, children, out),
        }
    }
}

/// A struct of exactly `part1` and `part2` scalars, the shape CIDs are stored in.
fn is_cid_holder(children: &[(String, StructValue)]) -> bool {
    let [(first, StructValue::Scalar(_)), (second, StructValue::Scalar(_))] = children else {
        return false;
    };
    let (first, second) = (first.to_ascii_lowercase(), second.to_ascii_lowercase());
    (first == "part1" && second == "part2") || (first == "part2" && second == "part1")
}

/// RPC formatting has been seen to vary, so when the nested CID shape was not
/// found the whole text is scanned for `part1: <digits>field` / `part2: ...`.
fn apply_cid_fallback(text: &str, fields: &mut BTreeMap<String, String>) {
    let found = |key: &str| fields.get(key).map_or(false, |v| is_field_literal(v));
    if found(CID_PART1_KEY) && found(CID_PART2_KEY) {
        return;
    }
    if let (Some(part1), Some(part2)) = (
        scan_labelled_field(text, "part1"),
        scan_labelled_field(text, "part2"),
    ) {
        log::debug!("metadata_cid recovered by scanning for part1/part2");
        fields.insert(CID_PART1_KEY.to_string(), part1);
        fields.insert(CID_PART2_KEY.to_string(), part2);
    }
}

fn scan_labelled_field(text: &str, label: &str) -> Option<String> {
    let lower = text.to_ascii_lowercase();
    let bytes = lower.as_bytes();
    let mut from = 0;
    while let Some(offset) = lower[from..].find(label) {
        let mut pos = from + offset + label.len();
        from += offset + 1;

        while bytes.get(pos).map_or(false, u8::is_ascii_whitespace) {
            pos += 1;
        }
        if bytes.get(pos) != Some(&b':') {
            continue;
        }
        pos += 1;
        while bytes.get(pos).map_or(false, u8::is_ascii_whitespace) {
            pos += 1;
        }
        let digits_start = pos;
        while bytes.get(pos).map_or(false, u8::is_ascii_digit) {
            pos += 1;
        }
        if pos > digits_start && lower[pos..].starts_with(FIELD_SUFFIX) {
            return Some(format!("{}{}", &lower[digits_start..pos], FIELD_SUFFIX));
        }
    }
    None
}

fn is_field_literal(value: &str) -> bool {
    value
        .strip_suffix(FIELD_SUFFIX)
        .map_or(false, |digits| {
            !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
        })
}

fn ends_with_ignore_case(value: &str, suffix: &str) -> bool {
    value.len() >= suffix.len()
        && value.is_char_boundary(value.len() - suffix.len())
        && value[value.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}

fn strip_numeric_suffix(value: &str) -> Option<&str> {
    let cut = if ends_with_ignore_case(value, FIELD_SUFFIX) {
        value.len() - FIELD_SUFFIX.len()
    } else {
        let bytes = value.as_bytes();
        let width = bytes.iter().rev().take_while(|b| b.is_ascii_digit()).count();
        let marker = value.len().checked_sub(width + 1)?;
        if width == 0 || !matches!(bytes[marker], b'u' | b'U' | b'i' | b'I') {
            return None;
        }
        marker
    };
    let number = &value[..cut];
    let magnitude = number.strip_prefix('-').unwrap_or(number);
    if !magnitude.is_empty() && magnitude.bytes().all(|b| b.is_ascii_digit()) {
        Some(number)
    } else {
        None
    }
}

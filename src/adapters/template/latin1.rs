//! Latin-1 transcoding for template files.
//!
//! Templates are written in ISO-8859-1 so that spreadsheet programs open
//! them without an import dialog. Internally all text is UTF-8; these two
//! functions are the only place the two meet.

use thiserror::Error;

/// Errors raised when internal text has no Latin-1 representation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    #[error("Character '{character}' in '{field}' has no Latin-1 encoding")]
    Unencodable { character: char, field: String },
}

/// Encodes one field as Latin-1 bytes.
///
/// Every char up to U+00FF maps to the byte of the same value; anything
/// above fails with the first offending character.
pub fn to_disk_encoding(text: &str) -> Result<Vec<u8>, EncodingError> {
    text.chars()
        .map(|c| {
            u8::try_from(u32::from(c)).map_err(|_| EncodingError::Unencodable {
                character: c,
                field: text.to_string(),
            })
        })
        .collect()
}

/// Decodes Latin-1 bytes. Every byte sequence is valid.
pub fn from_disk_encoding(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

//! Strict decoding of raw volume bytes.

use std::borrow::Cow;

use encoding_rs::{Encoding, UTF_8};
use memchr::memmem;
use tracing::instrument;

use crate::error::{ErrorKind, Result};

/// How far into the document a `charset=` declaration is looked for.
const CHARSET_SNIFF_BYTES: usize = 1024;
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Decodes a volume document without ever dropping or replacing bytes.
///
/// 1. A UTF-8 byte-order mark is removed, then the input is decoded as strict UTF-8.
/// 2. If that fails and the document head declares another charset, the input
///    is decoded strictly with that charset instead.
/// 3. Anything else is an [`ErrorKind::Decode`] error.
///
/// ```
/// use kitab_extract::decode;
/// assert_eq!(decode("صفحة".as_bytes()).unwrap(), "صفحة");
/// assert!(decode(b"\xFF\xFE broken").is_err());
/// ```
#[instrument(level = "debug", skip(bytes), fields(size = bytes.len()))]
pub fn decode(bytes: &[u8]) -> Result<Cow<'_, str>> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let utf8_error = match std::str::from_utf8(bytes) {
        Ok(text) => return Ok(Cow::Borrowed(text)),
        Err(error) => error,
    };
    let Some(label) = declared_charset(bytes) else {
        exn::bail!(ErrorKind::Decode {
            encoding: UTF_8.name(),
            offset: Some(utf8_error.valid_up_to()),
        });
    };
    let Some(encoding) = Encoding::for_label(label.as_bytes()) else {
        exn::bail!(ErrorKind::UnknownEncoding(label));
    };
    if encoding == UTF_8 {
        exn::bail!(ErrorKind::Decode {
            encoding: UTF_8.name(),
            offset: Some(utf8_error.valid_up_to()),
        });
    }
    tracing::debug!(encoding = encoding.name(), "input is not UTF-8; using declared charset");
    match encoding.decode_without_bom_handling_and_without_replacement(bytes) {
        Some(text) => Ok(text),
        None => exn::bail!(ErrorKind::Decode { encoding: encoding.name(), offset: None }),
    }
}

/// Finds the first `charset=` declaration in the document head.
fn declared_charset(bytes: &[u8]) -> Option<String> {
    let head = bytes[..bytes.len().min(CHARSET_SNIFF_BYTES)].to_ascii_lowercase();
    let start = memmem::find(&head, b"charset=")? + b"charset=".len();
    let value = &head[start..];
    let value = value.strip_prefix(b"\"").or_else(|| value.strip_prefix(b"'")).unwrap_or(value);
    let end = value
        .iter()
        .position(|b| matches!(b, b'"' | b'\'' | b';' | b'>' | b'/') || b.is_ascii_whitespace())
        .unwrap_or(value.len());
    let label = std::str::from_utf8(&value[..end]).ok()?;
    (!label.is_empty()).then(|| label.to_string())
}

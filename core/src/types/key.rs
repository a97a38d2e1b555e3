use nutype::nutype;
use std::fmt::Write as _;

pub const MAX_KEY_LENGTH: usize = 4096;

/// Lower-cased, escaped lookup key of an index entry.
///
/// ASCII letters and digits are kept as-is; every other character becomes
/// `_xx` per UTF-8 byte. Only canonical keys are accepted, so a key always
/// equals `normalize(decode(key))`.
#[nutype(
    validate(
        not_empty,
        len_char_max = MAX_KEY_LENGTH,
        predicate = |key| is_canonical(key)
    ),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        PartialOrd,
        Ord,
        AsRef,
        Deref,
        TryFrom,
        Into,
        Hash,
        Borrow,
        Display,
        Serialize,
        Deserialize,
    )
)]
pub struct SearchKey(String);

impl SearchKey {
    /// Derives the key of a display label.
    pub fn from_label(label: &str) -> Result<Self, SearchKeyError> {
        Self::try_new(normalize(label))
    }

    /// Lower-cased text this key was derived from.
    pub fn decoded(&self) -> String {
        // Canonical keys always decode.
        decode(self.as_str()).unwrap_or_default()
    }

    /// Returns true if `query` occurs in this key starting on a character boundary.
    ///
    /// An occurrence that starts inside an `_xx` escape does not count.
    pub fn contains_at_boundary(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let key = self.as_str();
        char_boundaries(key)
            .into_iter()
            .any(|start| key[start..].starts_with(query))
    }
}

/// Lower-cases `text` and escapes everything but ASCII letters and digits.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut buf = [0u8; 4];
    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            out.push(c);
        } else {
            for byte in c.encode_utf8(&mut buf).bytes() {
                // Writing to a String cannot fail.
                let _ = write!(out, "_{byte:02x}");
            }
        }
    }
    out
}

/// Reverses the `_xx` escapes of a normalized key.
///
/// Returns `None` for malformed escapes or invalid UTF-8.
pub fn decode(key: &str) -> Option<String> {
    let bytes = key.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut pos = 0;
    while pos < bytes.len() {
        let b = bytes[pos];
        if b == b'_' {
            let hex = bytes.get(pos + 1..pos + 3)?;
            if !hex.iter().all(|h| h.is_ascii_digit() || (b'a'..=b'f').contains(h)) {
                return None;
            }
            let hex = std::str::from_utf8(hex).ok()?;
            out.push(u8::from_str_radix(hex, 16).ok()?);
            pos += 3;
        } else {
            out.push(b);
            pos += 1;
        }
    }
    String::from_utf8(out).ok()
}

fn is_canonical(key: &str) -> bool {
    let plain_ok = key
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_');
    plain_ok && decode(key).is_some_and(|text| normalize(&text) == key)
}

/// Byte offsets at which a character (plain or escaped) starts.
fn char_boundaries(key: &str) -> Vec<usize> {
    let bytes = key.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut pos = 0;
    while pos < bytes.len() {
        if bytes[pos] == b'_' {
            let hex = key.get(pos + 1..pos + 3).unwrap_or("00");
            let first = u8::from_str_radix(hex, 16).unwrap_or(0);
            // Continuation bytes of a multi-byte character are not boundaries.
            if first & 0xc0 != 0x80 {
                out.push(pos);
            }
            pos += 3;
        } else {
            out.push(pos);
            pos += 1;
        }
    }
    out
}

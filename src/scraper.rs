//! Scrapers for the JSON literals Drive embeds in its viewer pages.
//!
//! Drive does not publish the shape of these payloads. Fields are read by
//! position, and every position lives in [`layout`] so a format change only
//! touches that table.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

use crate::error::{DriveError, Result};
use crate::models::{FileMetadata, FolderEntry, FolderListing, FOLDER_MIME_TYPE};

/// `itemJson: [...]` literal on the file viewer page.
static FILE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)itemJson: (\[.*?);</script>").expect("Invalid file pattern regex")
});

/// `window['_DRIVE_ivd'] = '...'` string on the folder page.
static FOLDER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)window\['_DRIVE_ivd'\] = '(.*?)';").expect("Invalid folder pattern regex")
});

/// Token on the "can't scan this file for viruses" interstitial.
static CONFIRM_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)confirm=([0-9A-Za-z_-]+)").expect("Invalid confirm pattern regex")
});

/// Positional layout of the embedded payloads.
pub mod layout {
    /// Index of the file name in `itemJson`.
    pub const FILE_NAME: usize = 1;
    /// Path to the byte size in `itemJson`.
    pub const FILE_SIZE: [usize; 2] = [25, 2];

    /// Index of the child array in `_DRIVE_ivd`.
    pub const FOLDER_CHILDREN: usize = 0;
    pub const CHILD_ID: usize = 0;
    pub const CHILD_NAME: usize = 2;
    pub const CHILD_MIME_TYPE: usize = 3;
    pub const CHILD_SIZE: usize = 13;
}

/// Named accessors over one positional array.
struct Fields<'a> {
    value: &'a Value,
    what: &'static str,
}

impl<'a> Fields<'a> {
    fn new(value: &'a Value, what: &'static str) -> Self {
        Self { value, what }
    }

    fn at(&self, path: &[usize]) -> Option<&'a Value> {
        path.iter().try_fold(self.value, |value, &idx| value.get(idx))
    }

    fn string(&self, path: &[usize], field: &str) -> Result<String> {
        self.at(path)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| self.missing(field))
    }

    fn size(&self, path: &[usize], field: &str) -> Result<Option<u64>> {
        match self.at(path) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => coerce_size(value).map(Some).ok_or_else(|| self.missing(field)),
        }
    }

    fn missing(&self, field: &str) -> DriveError {
        DriveError::ScrapeError(format!("{} has no usable {}", self.what, field))
    }
}

/// Sizes arrive either as numeric strings or as JSON numbers.
fn coerce_size(value: &Value) -> Option<u64> {
    match value {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.as_u64(),
        _ => None,
    }
}

fn is_falsy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Bool(b)) => !b,
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(a)) => a.is_empty(),
        Some(Value::Object(o)) => o.is_empty(),
    }
}

/// Extract the name and size of a file from its viewer page.
pub fn parse_file_metadata(html: &str) -> Result<FileMetadata> {
    let literal = FILE_PATTERN
        .captures(html)
        .and_then(|c| c.get(1))
        .ok_or_else(|| DriveError::ScrapeError("file page has no itemJson literal".to_string()))?
        .as_str()
        .trim_end_matches(|c: char| c == '}' || c.is_whitespace());

    let data: Value = serde_json::from_str(&js_literal_to_json(literal))?;
    let fields = Fields::new(&data, "file item");

    let name = fields.string(&[layout::FILE_NAME], "name")?;
    let size = fields
        .size(&layout::FILE_SIZE, "size")?
        .ok_or_else(|| fields.missing("size"))?;

    Ok(FileMetadata { name, size })
}

/// Extract the children of a folder from its page.
///
/// A page whose child array is falsy is an empty folder, not an error.
pub fn parse_folder_listing(html: &str) -> Result<FolderListing> {
    let literal = FOLDER_PATTERN
        .captures(html)
        .and_then(|c| c.get(1))
        .ok_or_else(|| DriveError::ScrapeError("folder page has no _DRIVE_ivd literal".to_string()))?
        .as_str();

    let data: Value = serde_json::from_str(&unescape_js_string(literal)?)?;
    let children = data.get(layout::FOLDER_CHILDREN);
    if is_falsy(children) {
        return Ok(FolderListing::default());
    }

    let entries = children
        .and_then(Value::as_array)
        .ok_or_else(|| DriveError::ScrapeError("folder children are not an array".to_string()))?
        .iter()
        .map(parse_folder_entry)
        .collect::<Result<Vec<_>>>()?;

    Ok(FolderListing { entries })
}

fn parse_folder_entry(item: &Value) -> Result<FolderEntry> {
    let fields = Fields::new(item, "folder entry");
    let mime_type = fields.string(&[layout::CHILD_MIME_TYPE], "MIME type")?;
    // Folders carry no meaningful size; only file rows are coerced.
    let size = if mime_type == FOLDER_MIME_TYPE {
        None
    } else {
        fields.size(&[layout::CHILD_SIZE], "size")?
    };

    Ok(FolderEntry {
        id: fields.string(&[layout::CHILD_ID], "id")?,
        name: fields.string(&[layout::CHILD_NAME], "name")?,
        mime_type,
        size,
    })
}

/// Find the download confirmation token on an interstitial page.
pub fn extract_confirm_token(body: &str) -> Option<String> {
    CONFIRM_PATTERN
        .captures(body)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Rewrite the JavaScript-only escapes of an array literal into JSON.
///
/// `\/` is dropped to `/` and `\xNN` becomes `\u00NN`; every other escape is
/// already valid JSON and is left for the parser.
fn js_literal_to_json(literal: &str) -> String {
    let mut out = String::with_capacity(literal.len());
    let mut chars = literal.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('/') => out.push('/'),
            Some('x') => out.push_str("\\u00"),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}

/// Decode the body of a single-quoted JavaScript string literal.
fn unescape_js_string(literal: &str) -> Result<String> {
    let mut out = String::with_capacity(literal.len());
    let mut chars = literal.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let escaped = chars
            .next()
            .ok_or_else(|| bad_escape("trailing backslash"))?;
        match escaped {
            'x' => out.push(hex_char(&mut chars, 2)?),
            'u' => {
                let unit = hex_unit(&mut chars, 4)?;
                out.push(decode_utf16_unit(unit, &mut chars)?);
            }
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            '0' => out.push('\0'),
            // \/ \\ \' \" and any other identity escape
            other => out.push(other),
        }
    }

    Ok(out)
}

fn hex_unit(chars: &mut std::str::Chars<'_>, len: usize) -> Result<u32> {
    let digits: String = chars.by_ref().take(len).collect();
    if digits.len() != len {
        return Err(bad_escape("truncated hex escape"));
    }
    u32::from_str_radix(&digits, 16).map_err(|_| bad_escape(&digits))
}

fn hex_char(chars: &mut std::str::Chars<'_>, len: usize) -> Result<char> {
    let unit = hex_unit(chars, len)?;
    char::from_u32(unit).ok_or_else(|| bad_escape("invalid code point"))
}

/// Join a `\uD8xx\uDCxx` surrogate pair when one is present.
fn decode_utf16_unit(unit: u32, chars: &mut std::str::Chars<'_>) -> Result<char> {
    if !(0xD800..0xDC00).contains(&unit) {
        return char::from_u32(unit).ok_or_else(|| bad_escape("lone surrogate"));
    }
    if chars.next() != Some('\\') || chars.next() != Some('u') {
        return Err(bad_escape("lone surrogate"));
    }
    let low = hex_unit(chars, 4)?;
    if !(0xDC00..0xE000).contains(&low) {
        return Err(bad_escape("lone surrogate"));
    }
    let code = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
    char::from_u32(code).ok_or_else(|| bad_escape("invalid code point"))
}

fn bad_escape(what: &str) -> DriveError {
    DriveError::ScrapeError(format!("bad escape in folder literal: {}", what))
}

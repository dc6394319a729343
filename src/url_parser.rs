//! URL parser for extracting Google Drive IDs from share links.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{DriveError, Result};

/// `.../file/d/<ID>/view` style links.
static FILE_PATH_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)/file/d/([0-9A-Za-z_-]{33,})(?:/|$)").expect("Invalid file path regex")
});

/// `...?id=<ID>` style links (open, uc, etc.).
static ID_PARAM_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)id=([0-9A-Za-z_-]{33,})(?:&|$)").expect("Invalid id parameter regex")
});

/// Any run of ID characters long enough to be a Drive ID.
static BARE_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)([0-9A-Za-z_-]{33,})").expect("Invalid bare ID regex"));

/// Extract a Google Drive ID from a share link or a raw ID.
///
/// Patterns are tried from most to least specific:
/// - `https://drive.google.com/file/d/<ID>/view`
/// - `https://drive.google.com/open?id=<ID>`
/// - any run of 33 or more `[0-9A-Za-z_-]` characters, e.g. a raw ID or
///   `https://drive.google.com/drive/folders/<ID>`
///
/// # Examples
///
/// ```
/// use gdrive_dl::url_parser::extract_id;
///
/// let id = extract_id("https://drive.google.com/file/d/1aBcDeFgHiJkLmNoPqRsTuVwXyZ0123456/view").unwrap();
/// assert_eq!(id, "1aBcDeFgHiJkLmNoPqRsTuVwXyZ0123456");
/// ```
pub fn extract_id(url_or_id: &str) -> Result<String> {
    let trimmed = url_or_id.trim();

    [&*FILE_PATH_REGEX, &*ID_PARAM_REGEX, &*BARE_ID_REGEX]
        .into_iter()
        .find_map(|regex| regex.captures(trimmed))
        .and_then(|captures| captures.get(1))
        .map(|id| id.as_str().to_string())
        .ok_or_else(|| DriveError::InvalidInput(url_or_id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "1aBcDeFgHiJkLmNoPqRsTuVwXyZ0123456";

    #[test]
    fn test_extract_file_url() {
        let url = format!("https://drive.google.com/file/d/{}/view?usp=sharing", ID);
        assert_eq!(extract_id(&url).unwrap(), ID);
    }

    #[test]
    fn test_extract_open_url() {
        let url = format!("https://drive.google.com/open?id={}", ID);
        assert_eq!(extract_id(&url).unwrap(), ID);
    }

    #[test]
    fn test_extract_raw_id() {
        assert_eq!(extract_id(ID).unwrap(), ID);
    }

    #[test]
    fn test_extract_with_whitespace() {
        assert_eq!(extract_id(&format!("  {}  ", ID)).unwrap(), ID);
    }

    #[test]
    fn test_invalid_url() {
        assert!(extract_id("https://example.com/folder/123").is_err());
        assert!(extract_id("").is_err());
        assert!(extract_id("   ").is_err());
    }
}

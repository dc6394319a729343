//! Tests for URL/ID extraction functionality.

use gdrive_dl::error::DriveError;
use gdrive_dl::url_parser::extract_id;

const ID: &str = "1aBcDeFgHiJkLmNoPqRsTuVwXyZ0123456";
const SHORT_ID: &str = "0123456789abcdefghijABCDEFGHIJ-_x"; // exactly 33

mod extract_file_url {
    use super::*;

    #[test]
    fn file_url_with_view() {
        let url = format!("https://drive.google.com/file/d/{}/view", ID);
        assert_eq!(extract_id(&url).unwrap(), ID);
    }

    #[test]
    fn file_url_with_query_params() {
        let url = format!("https://drive.google.com/file/d/{}/view?usp=sharing", ID);
        assert_eq!(extract_id(&url).unwrap(), ID);
    }

    #[test]
    fn file_url_without_suffix() {
        let url = format!("https://drive.google.com/file/d/{}", ID);
        assert_eq!(extract_id(&url).unwrap(), ID);
    }

    #[test]
    fn file_path_wins_over_id_param() {
        let other = "Z".repeat(40);
        let url = format!("https://drive.google.com/file/d/{}/view?id={}", ID, other);
        assert_eq!(extract_id(&url).unwrap(), ID);
    }
}

mod extract_id_param {
    use super::*;

    #[test]
    fn open_url() {
        let url = format!("https://drive.google.com/open?id={}", ID);
        assert_eq!(extract_id(&url).unwrap(), ID);
    }

    #[test]
    fn uc_url_with_more_params() {
        let url = format!("https://docs.google.com/uc?id={}&export=download", ID);
        assert_eq!(extract_id(&url).unwrap(), ID);
    }

    #[test]
    fn uppercase_param_name() {
        let url = format!("https://drive.google.com/open?ID={}", ID);
        assert_eq!(extract_id(&url).unwrap(), ID);
    }
}

mod extract_bare_id {
    use super::*;

    #[test]
    fn raw_id_unchanged() {
        assert_eq!(extract_id(SHORT_ID).unwrap(), SHORT_ID);
        assert_eq!(extract_id(ID).unwrap(), ID);
    }

    #[test]
    fn folder_url_falls_back_to_bare_match() {
        let url = format!("https://drive.google.com/drive/u/0/folders/{}?usp=sharing", ID);
        assert_eq!(extract_id(&url).unwrap(), ID);
    }

    #[test]
    fn id_with_whitespace_trimmed() {
        assert_eq!(extract_id(&format!("  {}  ", ID)).unwrap(), ID);
        assert_eq!(extract_id(&format!("\t{}\n", ID)).unwrap(), ID);
    }
}

mod invalid_inputs {
    use super::*;

    #[test]
    fn empty_string() {
        assert!(extract_id("").is_err());
    }

    #[test]
    fn whitespace_only() {
        assert!(extract_id("   ").is_err());
        assert!(extract_id("\t\n").is_err());
    }

    #[test]
    fn too_short_for_an_id() {
        assert!(extract_id(&SHORT_ID[..32]).is_err());
        assert!(extract_id("https://drive.google.com/file/d/1abc123XYZ/view").is_err());
    }

    #[test]
    fn invalid_url() {
        assert!(extract_id("https://example.com/folder/123").is_err());
    }

    #[test]
    fn error_names_the_input() {
        match extract_id("not-an-id") {
            Err(DriveError::InvalidInput(input)) => assert_eq!(input, "not-an-id"),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}

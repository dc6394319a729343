//! Builders for Drive pages used by the integration tests.

#![allow(dead_code)]

use serde_json::{json, Value};

pub const FOLDER_MIME: &str = "application/vnd.google-apps.folder";

/// A folder child row with the fields Drive puts at 0, 2, 3 and 13.
pub fn child(id: &str, name: &str, mime_type: &str, size: Option<u64>) -> Value {
    let mut row = vec![Value::Null; 14];
    row[0] = json!(id);
    row[2] = json!(name);
    row[3] = json!(mime_type);
    row[13] = size.map(|s| json!(s.to_string())).unwrap_or(Value::Null);
    Value::Array(row)
}

/// Folder page embedding `children` the way Drive escapes `_DRIVE_ivd`.
pub fn folder_page(children: Vec<Value>) -> String {
    folder_page_raw(&json!([children, null, "token"]))
}

pub fn empty_folder_page() -> String {
    folder_page_raw(&json!([null, null, "token"]))
}

pub fn folder_page_raw(data: &Value) -> String {
    let escaped = data
        .to_string()
        .replace('\\', "\\x5c")
        .replace('"', "\\x22")
        .replace('\'', "\\x27")
        .replace('/', "\\/")
        .replace('[', "\\x5b")
        .replace(']', "\\x5d");
    format!(
        "<html><body><script>window['_DRIVE_ivd'] = '{}';</script></body></html>",
        escaped
    )
}

/// File viewer page with name at index 1 and size at [25][2].
pub fn file_page(name: &str, size: u64) -> String {
    let mut item = vec![Value::Null; 26];
    item[1] = json!(name);
    item[25] = json!([null, null, size.to_string()]);
    let literal = Value::Array(item).to_string().replace('/', "\\/");
    format!(
        "<html><script>window.viewerData = {{config: {{}}, itemJson: {}}};</script></html>",
        literal
    )
}

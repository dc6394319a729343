//! Data models for scraped Google Drive items.

use std::path::{Path, PathBuf};

/// MIME type Drive uses to mark folders in a listing.
pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

/// What the file viewer page reveals about a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetadata {
    pub name: String,
    pub size: u64,
}

/// One child of a folder listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderEntry {
    pub id: String,
    pub name: String,
    pub mime_type: String,
    /// Absent for folders.
    pub size: Option<u64>,
}

impl FolderEntry {
    pub fn is_folder(&self) -> bool {
        self.mime_type == FOLDER_MIME_TYPE
    }
}

impl std::fmt::Display for FolderEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let size_str = self
            .size
            .map(format_size)
            .unwrap_or_else(|| "-".to_string());
        write!(f, "{}\t{}\t{}\t{}", self.id, size_str, self.mime_type, self.name)
    }
}

/// Children of a folder, in the order the page lists them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderListing {
    pub entries: Vec<FolderEntry>,
}

impl FolderListing {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// A file scheduled for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    pub id: String,
    pub name: String,
    pub size: u64,
    pub local_path: PathBuf,
}

impl FileDescriptor {
    /// Describe a file that lands as `directory/<name>`.
    pub fn new(id: impl Into<String>, name: impl Into<String>, size: u64, directory: &Path) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            local_path: directory.join(&name),
            name,
            size,
        }
    }
}

/// What an identifier resolved to.
#[derive(Debug, Clone)]
pub enum Resource {
    File(FileMetadata),
    /// Keeps the already fetched folder page so it is not requested twice.
    Folder { page: String },
}

/// Format bytes into human-readable size.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(500), "500 B");
        assert_eq!(format_size(1024), "1.00 KB");
        assert_eq!(format_size(1536), "1.50 KB");
        assert_eq!(format_size(1048576), "1.00 MB");
        assert_eq!(format_size(1073741824), "1.00 GB");
    }

    #[test]
    fn test_folder_entry_kind() {
        let folder = FolderEntry {
            id: "f1".to_string(),
            name: "Photos".to_string(),
            mime_type: FOLDER_MIME_TYPE.to_string(),
            size: None,
        };
        let file = FolderEntry {
            mime_type: "image/png".to_string(),
            size: Some(10),
            ..folder.clone()
        };

        assert!(folder.is_folder());
        assert!(!file.is_folder());
    }

    #[test]
    fn test_folder_entry_display() {
        let entry = FolderEntry {
            id: "abc123".to_string(),
            name: "test.txt".to_string(),
            mime_type: "text/plain".to_string(),
            size: Some(1024),
        };

        let display = format!("{}", entry);
        assert!(display.contains("abc123"));
        assert!(display.contains("test.txt"));
        assert!(display.contains("1.00 KB"));
    }

    #[test]
    fn test_file_descriptor_path() {
        let file = FileDescriptor::new("id1", "report.pdf", 42, Path::new("out"));
        assert_eq!(file.local_path, Path::new("out").join("report.pdf"));
        assert_eq!(file.name, "report.pdf");
    }
}

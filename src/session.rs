//! HTTP session shared by every request of a run.
//!
//! Drive ties the large-file confirmation token to a cookie, so all requests
//! must go through the same cookie-enabled client.

use reqwest::{Client, Response};

use crate::error::Result;

/// Generic "open" URL that redirects to the file or folder view.
const ITEM_URL: &str = "https://drive.google.com/open";

/// Folder view page.
const FOLDER_URL: &str = "https://drive.google.com/drive/folders";

/// Direct download endpoint.
const FILE_URL: &str = "https://docs.google.com/uc";

/// Remote endpoints the downloader talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub item_url: String,
    pub folder_url: String,
    pub file_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            item_url: ITEM_URL.to_string(),
            folder_url: FOLDER_URL.to_string(),
            file_url: FILE_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// Point every endpoint at the same host, keeping Drive's paths.
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            item_url: format!("{}/open", base),
            folder_url: format!("{}/drive/folders", base),
            file_url: format!("{}/uc", base),
        }
    }
}

/// Cookie-enabled client living for the whole run.
pub struct DriveSession {
    endpoints: Endpoints,
    http: Client,
}

impl DriveSession {
    /// Create a new DriveSession.
    ///
    /// No timeouts are set; a stalled connection stalls the run.
    pub fn new(endpoints: Endpoints) -> Result<Self> {
        let http = Client::builder()
            .cookie_store(true)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { endpoints, http })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// `GET open?id=<id>`, following redirects.
    pub async fn open_item(&self, id: &str) -> Result<Response> {
        tracing::debug!(id, "resolving item");
        let response = self
            .http
            .get(&self.endpoints.item_url)
            .query(&[("id", id)])
            .send()
            .await?;
        Ok(response)
    }

    /// Fetch the folder view page as text.
    pub async fn folder_page(&self, id: &str) -> Result<String> {
        let url = format!("{}/{}", self.endpoints.folder_url, id);
        tracing::debug!(%url, "fetching folder page");
        let page = self.http.get(&url).send().await?.text().await?;
        Ok(page)
    }

    /// Start a download; the body is not read yet.
    pub async fn download(&self, id: &str, confirm: Option<&str>) -> Result<Response> {
        let confirm = confirm.unwrap_or_default();
        tracing::debug!(id, confirm, "requesting file content");
        let response = self
            .http
            .get(&self.endpoints.file_url)
            .query(&[("export", "download"), ("id", id), ("confirm", confirm)])
            .send()
            .await?;
        Ok(response)
    }
}

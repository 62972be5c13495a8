use serde::Deserialize;

/// A file entry from the directory listing endpoint, after boundary validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    pub name: String,
    pub download_url: String,
    pub html_url: String,
    pub sha: String,
}

/// Listing entry exactly as the API returns it. Directories and submodules
/// come back with `download_url: null`.
#[derive(Debug, Deserialize)]
pub struct RawListingEntry {
    pub name: String,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub sha: Option<String>,
}

impl RawListingEntry {
    /// Returns `None` for entries that have nothing to download.
    pub fn into_descriptor(self) -> Option<FileDescriptor> {
        let download_url = self.download_url.filter(|u| !u.is_empty())?;
        Some(FileDescriptor {
            name: self.name,
            download_url,
            html_url: self.html_url.unwrap_or_default(),
            sha: self.sha.unwrap_or_default(),
        })
    }
}

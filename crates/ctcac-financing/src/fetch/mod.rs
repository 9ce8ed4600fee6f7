mod directory;
mod gateway;
pub mod links;

pub use directory::find_spreadsheets;
pub use gateway::{FetchError, HttpGateway, RemoteFile, ReqwestGateway};
pub use links::{derive_filename, resolve_link, spreadsheet_links, SpreadsheetLink};

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::FetchConfig;

/// Leading bytes of a zip container, which is what `.xlsx` files are.
const ZIP_SIGNATURE: &[u8] = b"PK\x03\x04";

/// Best-effort downloader for the application listing page.
#[derive(Debug)]
pub struct Fetcher<G: HttpGateway> {
    gateway: G,
    config: FetchConfig,
}

impl<G: HttpGateway> Fetcher<G> {
    pub fn new(gateway: G, config: FetchConfig) -> Self {
        Self { gateway, config }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Downloads every spreadsheet linked from the listing page into
    /// `output_dir` and returns the local paths, files already on disk
    /// included. Failures are logged per link; this never errors.
    pub fn download_all(&self, output_dir: &Path) -> Vec<PathBuf> {
        if let Err(err) = fs::create_dir_all(output_dir) {
            warn!(directory = %output_dir.display(), "unable to create download directory: {err}");
            return Vec::new();
        }

        let listing_url = &self.config.listing_url;
        let html = match self
            .gateway
            .get_text(listing_url.as_str(), self.config.listing_timeout)
        {
            Ok(html) => html,
            Err(err) => {
                warn!(url = %listing_url, "error accessing listing page: {err}");
                return Vec::new();
            }
        };

        let mut files = Vec::new();
        let mut seen = HashSet::new();

        for link in spreadsheet_links(&html) {
            if self.config.max_files.is_some_and(|limit| files.len() >= limit) {
                break;
            }

            let filename = derive_filename(&link.href);
            if !seen.insert(filename.clone()) {
                continue;
            }

            let path = output_dir.join(&filename);
            if path.exists() {
                info!(%filename, "skipping download, file already exists");
                files.push(path);
                continue;
            }

            let file_url = match resolve_link(&link.href, &self.config.base_origin, listing_url) {
                Ok(url) => url,
                Err(err) => {
                    warn!(href = %link.href, "unable to resolve link: {err}");
                    continue;
                }
            };

            if self.download_one(file_url.as_str(), &filename, &path) {
                files.push(path);
            }
        }

        files
    }

    fn download_one(&self, url: &str, filename: &str, path: &Path) -> bool {
        let remote = match self.gateway.get_file(url, self.config.file_timeout) {
            Ok(remote) => remote,
            Err(err) => {
                warn!(%url, "error downloading: {err}");
                return false;
            }
        };

        if !looks_like_spreadsheet(&remote) {
            warn!(%filename, content_type = ?remote.content_type, "skipping download, not a spreadsheet");
            return false;
        }

        match fs::write(path, &remote.bytes) {
            Ok(()) => {
                info!(%filename, bytes = remote.bytes.len(), "downloaded");
                true
            }
            Err(err) => {
                warn!(%filename, "unable to save download: {err}");
                false
            }
        }
    }
}

/// Accepts a body when the server calls it a spreadsheet or it starts with
/// the zip signature.
pub fn looks_like_spreadsheet(remote: &RemoteFile) -> bool {
    let declared = remote
        .content_type
        .as_deref()
        .map(str::to_lowercase)
        .is_some_and(|content_type| {
            content_type.contains("excel") || content_type.contains("spreadsheet")
        });
    declared || remote.bytes.starts_with(ZIP_SIGNATURE)
}

//! Offline collection of labeled training images.
//!
//! For each query, result pages from an image search are walked and the
//! images they point to are saved under `<root>/<query_with_underscores>/`.

pub mod error;
pub mod feed;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use reqwest::Client;
use tokio::fs;
use tracing::{debug, info, warn};

pub use error::{CrawlError, Result};
pub use feed::{ImageFeed, SearchPageFeed, DEFAULT_SEARCH_URL};

/// Directory that holds the images for `query`.
pub fn query_dir(root: &Path, query: &str) -> PathBuf {
    root.join(query.replace(' ', "_"))
}

/// Downloads up to `max_num` images per query from an [`ImageFeed`].
pub struct Crawler<F> {
    feed: F,
    client: Client,
    max_num: usize,
}

impl<F: ImageFeed> Crawler<F> {
    pub fn new(feed: F, client: Client, max_num: usize) -> Self {
        Self { feed, client, max_num }
    }

    /// Fill the directory for `query` and return how many images were saved.
    pub async fn crawl(&self, query: &str, root: &Path) -> Result<usize> {
        let dir = query_dir(root, query);
        fs::create_dir_all(&dir).await?;
        info!(query, dir = %dir.display(), "crawling");

        let mut seen = HashSet::new();
        let mut saved = 0;
        let mut offset = 0;
        while saved < self.max_num {
            let urls = self.feed.page(query, offset).await?;
            offset += urls.len();
            let fresh: Vec<String> = urls.into_iter().filter(|u| seen.insert(u.clone())).collect();
            if fresh.is_empty() {
                debug!(query, offset, "no new results");
                break;
            }
            for url in fresh {
                if saved >= self.max_num {
                    break;
                }
                match self.download(&url, &dir, saved + 1).await {
                    Ok(path) => {
                        saved += 1;
                        debug!(%url, path = %path.display(), "saved");
                    }
                    Err(e) => warn!(%url, error = %e, "skipping image"),
                }
            }
        }
        info!(query, saved, "done");
        Ok(saved)
    }

    async fn download(&self, url: &str, dir: &Path, index: usize) -> Result<PathBuf> {
        let bytes = self.client.get(url).send().await?.error_for_status()?.bytes().await?;
        let format = image::guess_format(&bytes).map_err(|_| CrawlError::NotAnImage(url.to_string()))?;
        let ext = format.extensions_str().first().copied().unwrap_or("img");
        let path = dir.join(format!("{index:06}.{ext}"));
        fs::write(&path, &bytes).await?;
        Ok(path)
    }
}

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;

use crate::error::Result;

/// Bing's paged image-search fragment endpoint.
pub const DEFAULT_SEARCH_URL: &str = "https://www.bing.com/images/async?q={query}&first={offset}&count=35&adlt=off";

/// Media URLs appear either HTML-escaped or as plain JSON.
static MEDIA_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"murl(?:&quot;|")\s*:\s*(?:&quot;|")(.*?)(?:&quot;|")"#).expect("valid media url pattern"));

/// Source of candidate image URLs for a query.
#[async_trait]
pub trait ImageFeed: Send + Sync {
    /// Image URLs of the result page starting at `offset`.
    async fn page(&self, query: &str, offset: usize) -> Result<Vec<String>>;
}

/// Scrapes image URLs out of a search result page.
///
/// `template` must contain `{query}` and `{offset}` placeholders.
pub struct SearchPageFeed {
    client: Client,
    template: String,
}

impl SearchPageFeed {
    pub fn new(client: Client, template: impl Into<String>) -> Self {
        Self {
            client,
            template: template.into(),
        }
    }

    fn url(&self, query: &str, offset: usize) -> String {
        self.template
            .replace("{query}", &urlencoding::encode(query))
            .replace("{offset}", &offset.to_string())
    }
}

#[async_trait]
impl ImageFeed for SearchPageFeed {
    async fn page(&self, query: &str, offset: usize) -> Result<Vec<String>> {
        let html = self
            .client
            .get(self.url(query, offset))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(media_urls(&html))
    }
}

/// Extract image URLs from search markup, in page order.
pub fn media_urls(html: &str) -> Vec<String> {
    MEDIA_URL
        .captures_iter(html)
        .map(|c| c[1].replace("&amp;", "&"))
        .filter(|u| u.starts_with("http"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escaped_and_plain_urls_are_found() {
        let html = r#"<a m="{&quot;murl&quot;:&quot;https://a.test/1.jpg?x=1&amp;y=2&quot;}"></a>
<a m='{"murl":"https://b.test/2.png"}'></a>"#;
        assert_eq!(
            media_urls(html),
            vec!["https://a.test/1.jpg?x=1&y=2".to_string(), "https://b.test/2.png".to_string()]
        );
    }

    #[test]
    fn template_is_filled() {
        let feed = SearchPageFeed::new(Client::new(), "http://s.test/?q={query}&first={offset}");
        assert_eq!(feed.url("Taylor Swift", 35), "http://s.test/?q=Taylor%20Swift&first=35");
    }
}

use std::io::Cursor;
use std::path::Path;

use crawler::{query_dir, Crawler, SearchPageFeed};
use httpmock::Method::GET;
use httpmock::MockServer;
use image::{ImageOutputFormat, Rgb, RgbImage};
use tempfile::TempDir;

fn png() -> Vec<u8> {
    let mut buf = Vec::new();
    RgbImage::from_pixel(4, 4, Rgb([200, 10, 10]))
        .write_to(&mut Cursor::new(&mut buf), ImageOutputFormat::Png)
        .unwrap();
    buf
}

fn page(urls: &[String]) -> String {
    urls.iter()
        .map(|u| format!(r#"<a class="iusc" m="{{&quot;murl&quot;:&quot;{u}&quot;}}"></a>"#))
        .collect()
}

fn files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn crawler(server: &MockServer, max: usize) -> Crawler<SearchPageFeed> {
    let client = reqwest::Client::new();
    let template = format!("{}/search?q={{query}}&first={{offset}}", server.base_url());
    Crawler::new(SearchPageFeed::new(client.clone(), template), client, max)
}

#[tokio::test]
async fn saves_images_and_skips_broken_links() {
    let server = MockServer::start_async().await;
    let urls = vec![server.url("/img/a"), server.url("/img/missing"), server.url("/img/text"), server.url("/img/b")];
    let first = server.mock(|when, then| {
        when.method(GET).path("/search").query_param("first", "0");
        then.status(200).body(page(&urls));
    });
    // the next page repeats what was already seen
    server.mock(|when, then| {
        when.method(GET).path("/search").query_param("first", "4");
        then.status(200).body(page(&urls[..1]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/img/a");
        then.status(200).body(png());
    });
    server.mock(|when, then| {
        when.method(GET).path("/img/b");
        then.status(200).body(png());
    });
    server.mock(|when, then| {
        when.method(GET).path("/img/missing");
        then.status(404);
    });
    server.mock(|when, then| {
        when.method(GET).path("/img/text");
        then.status(200).body("<html>nope</html>");
    });

    let root = TempDir::new().unwrap();
    let saved = crawler(&server, 100).crawl("Taylor Swift", root.path()).await.unwrap();
    first.assert();
    assert_eq!(saved, 2);
    let dir = root.path().join("Taylor_Swift");
    assert_eq!(files(&dir), vec!["000001.png", "000002.png"]);
}

#[tokio::test]
async fn stops_at_max() {
    let server = MockServer::start_async().await;
    let urls = vec![server.url("/img/a"), server.url("/img/b"), server.url("/img/c")];
    server.mock(|when, then| {
        when.method(GET).path("/search");
        then.status(200).body(page(&urls));
    });
    server.mock(|when, then| {
        when.method(GET).path_contains("/img/");
        then.status(200).body(png());
    });

    let root = TempDir::new().unwrap();
    let saved = crawler(&server, 2).crawl("solo", root.path()).await.unwrap();
    assert_eq!(saved, 2);
    assert_eq!(files(&root.path().join("solo")).len(), 2);
}

#[tokio::test]
async fn failing_search_is_an_error() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET).path("/search");
        then.status(500);
    });
    let root = TempDir::new().unwrap();
    assert!(crawler(&server, 5).crawl("x", root.path()).await.is_err());
}

#[test]
fn query_dir_replaces_spaces() {
    assert_eq!(query_dir(Path::new("images"), "Taylor Swift"), Path::new("images/Taylor_Swift"));
}

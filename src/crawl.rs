use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::fetch::Fetch;
use crate::model::CrawlRow;
use crate::parser::album::scrape_album;
use crate::parser::links::{dedup_urls, extract_links, is_bandcamp_link, is_roundup_link};

/// Walk index page → roundup articles → album pages, strictly one request at a time.
///
/// Failures fetching the index or an article abort the crawl. Album failures are
/// kept on the row.
pub async fn crawl<F: Fetch>(fetcher: &F, index_url: &str) -> Result<Vec<CrawlRow>> {
    info!("Fetching roundup index: {}", index_url);
    let index = fetcher
        .fetch(index_url)
        .await
        .with_context(|| format!("Failed to fetch roundup index {}", index_url))?;

    let articles = dedup_urls(extract_links(&index, is_roundup_link));
    info!("Roundup articles found: {}", articles.len());

    let pb = progress_bar(articles.len(), "articles")?;
    let mut rows = Vec::new();
    for article in &articles {
        rows.extend(crawl_article(fetcher, article).await?);
        pb.inc(1);
    }
    pb.finish_and_clear();

    let failed = rows.iter().filter(|r| r.outcome.is_err()).count();
    info!("Crawled {} album links ({} failed)", rows.len(), failed);
    Ok(rows)
}

/// One row per distinct Bandcamp link in the article.
pub async fn crawl_article<F: Fetch>(fetcher: &F, fact_url: &str) -> Result<Vec<CrawlRow>> {
    let html = fetcher
        .fetch(fact_url)
        .await
        .with_context(|| format!("Failed to fetch article {}", fact_url))?;

    let album_urls = dedup_urls(extract_links(&html, is_bandcamp_link));

    let pb = progress_bar(album_urls.len(), "albums")?;
    let mut rows = Vec::with_capacity(album_urls.len());
    for url in album_urls {
        let outcome = scrape_album(fetcher, &url).await;
        if let Err(e) = &outcome {
            warn!("Album {} skipped: {}", url, e);
        }
        rows.push(CrawlRow {
            fact_url: fact_url.to_string(),
            url,
            outcome,
        });
        pb.inc(1);
    }
    pb.finish_and_clear();
    Ok(rows)
}

fn progress_bar(len: usize, unit: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(&format!(
                "[{{elapsed_precise}}] {{bar:40}} {{pos}}/{{len}} {} (eta {{eta}})",
                unit
            ))?
            .progress_chars("=> "),
    );
    Ok(pb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AlbumError;
    use crate::fetch::StaticFetcher;

    const INDEX: &str = "http://www.factmag.com/tag/the-best-of-bandcamp/";
    const ARTICLE: &str = "http://www.factmag.com/2023/06/01/the-best-of-bandcamp-may-2023/";

    fn fixture(name: &str) -> String {
        std::fs::read_to_string(format!("tests/fixtures/{}.html", name)).unwrap()
    }

    fn site() -> StaticFetcher {
        StaticFetcher::default()
            .with_page(INDEX, fixture("index"))
            .with_page(ARTICLE, fixture("article"))
            .with_page("https://daftpunk.bandcamp.com/album/voyage", fixture("voyage"))
            .with_page("https://moodymann.bandcamp.com/album/sinner", fixture("sinner"))
    }

    #[tokio::test]
    async fn one_row_per_article_album_pair() {
        let rows = crawl(&site(), INDEX).await.unwrap();
        let urls: Vec<&str> = rows.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://daftpunk.bandcamp.com/album/voyage",
                "https://moodymann.bandcamp.com/album/sinner",
                "https://broken.bandcamp.com/album/gone",
            ]
        );
        assert!(rows.iter().all(|r| r.fact_url == ARTICLE));
    }

    #[tokio::test]
    async fn album_failure_stays_on_the_row() {
        let rows = crawl(&site(), INDEX).await.unwrap();
        let broken = rows.iter().find(|r| r.url.contains("broken")).unwrap();
        assert!(matches!(broken.outcome, Err(AlbumError::Fetch(_))));
        let voyage = rows[0].outcome.as_ref().unwrap();
        assert_eq!(voyage.artist, "Daft Punk");
    }

    #[tokio::test]
    async fn same_album_in_two_articles_yields_two_rows() {
        let second = "http://www.factmag.com/2023/07/01/the-best-of-bandcamp-june-2023/";
        let index = format!(r#"<a href="{ARTICLE}">may</a><a href="{second}">june</a>"#);
        let fetcher = site()
            .with_page(INDEX, index)
            .with_page(
                second,
                r#"<a href="https://daftpunk.bandcamp.com/album/voyage">again</a>"#,
            );
        let rows = crawl(&fetcher, INDEX).await.unwrap();
        let voyage: Vec<&CrawlRow> = rows.iter().filter(|r| r.url.contains("voyage")).collect();
        assert_eq!(voyage.len(), 2);
        assert_ne!(voyage[0].fact_url, voyage[1].fact_url);
    }

    #[test]
    fn progress_bars_are_sized_to_their_loop() {
        let pb = progress_bar(3, "albums").unwrap();
        assert_eq!(pb.length(), Some(3));
        pb.finish_and_clear();
    }

    #[tokio::test]
    async fn article_without_albums_yields_no_rows() {
        let fetcher = StaticFetcher::default().with_page(ARTICLE, "<p>nothing here</p>");
        assert!(crawl_article(&fetcher, ARTICLE).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_article_is_fatal() {
        let fetcher = StaticFetcher::default().with_page(INDEX, fixture("index"));
        assert!(crawl(&fetcher, INDEX).await.is_err());
    }

    #[tokio::test]
    async fn missing_index_is_fatal() {
        assert!(crawl(&StaticFetcher::default(), INDEX).await.is_err());
    }
}

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use scraper::{Html, Selector};

use crate::error::AlbumError;
use crate::fetch::Fetch;
use crate::model::ScrapedAlbum;

const TITLE_SEPARATOR: &str = ", by ";

/// Fetch an album page and read it. Every failure is folded into `AlbumError`.
pub async fn scrape_album<F: Fetch>(fetcher: &F, url: &str) -> Result<ScrapedAlbum, AlbumError> {
    let html = fetcher.fetch(url).await?;
    parse_album(&html)
}

pub fn parse_album(html: &str) -> Result<ScrapedAlbum, AlbumError> {
    let document = Html::parse_document(html);

    let heading = meta_content(&document, r#"meta[name="title"]"#).ok_or(AlbumError::MissingTitle)?;
    let (title, artist) = split_title(&heading)?;

    let published =
        meta_content(&document, r#"meta[itemprop="datePublished"]"#).ok_or(AlbumError::MissingDate)?;
    let release_date = parse_release_date(&published)?;

    let tag_anchors = Selector::parse("a.tag").expect("static selector");
    let tags: BTreeSet<String> = document
        .select(&tag_anchors)
        .filter_map(|a| a.text().next())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();

    Ok(ScrapedAlbum {
        title,
        artist,
        release_date,
        tags,
    })
}

fn meta_content(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .next()
        .and_then(|m| m.value().attr("content"))
        .map(str::to_string)
}

/// `"<title>, by <artist>"` → (title, artist). Exactly one separator and a
/// non-blank title are required.
fn split_title(heading: &str) -> Result<(String, String), AlbumError> {
    let parts: Vec<&str> = heading.split(TITLE_SEPARATOR).collect();
    match parts.as_slice() {
        [title, artist] if !title.trim().is_empty() => Ok((title.to_string(), artist.to_string())),
        _ => Err(AlbumError::MalformedTitle(heading.to_string())),
    }
}

pub fn parse_release_date(raw: &str) -> Result<NaiveDate, AlbumError> {
    let s = raw.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d);
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y%m%d") {
        return Ok(d);
    }
    // Bandcamp: "01 May 2023 00:00:00 GMT"
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%d %b %Y %H:%M:%S GMT") {
        return Ok(dt.date());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Ok(dt.date_naive());
    }
    Err(AlbumError::BadDate(raw.to_string()))
}

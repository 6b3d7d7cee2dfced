use std::collections::HashSet;

use scraper::{Html, Selector};

/// Hrefs of every anchor in `html` (whitespace-trimmed) that satisfy `keep`.
pub fn extract_links(html: &str, keep: impl Fn(&str) -> bool) -> Vec<String> {
    let document = Html::parse_document(html);
    let anchors = Selector::parse("a[href]").expect("static selector");

    document
        .select(&anchors)
        .filter_map(|a| a.value().attr("href"))
        .map(str::trim)
        .filter(|href| keep(href))
        .map(str::to_string)
        .collect()
}

/// Album candidates inside a roundup article.
pub fn is_bandcamp_link(href: &str) -> bool {
    href.contains("bandcamp.com")
}

/// Roundup articles on the tag-listing page (the tag page links back to itself).
pub fn is_roundup_link(href: &str) -> bool {
    href.contains("best") && href.contains("bandcamp") && !href.contains("tag")
}

/// Drop repeated URLs, keeping the first occurrence of each.
pub fn dedup_urls(urls: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    urls.into_iter().filter(|u| seen.insert(u.clone())).collect()
}

use std::collections::{BTreeSet, HashSet};

use clap::ValueEnum;

use crate::model::{AlbumRecord, Dataset};

const TAG_BASE: &str = "https://bandcamp.com/tag/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Style {
    /// One block per artist (default)
    Grouped,
    /// One line per album
    PerAlbum,
}

pub fn render(dataset: &Dataset, style: Style) -> String {
    match style {
        Style::Grouped => render_grouped(dataset),
        Style::PerAlbum => render_per_album(dataset),
    }
}

/// Bandcamp tag URL path segment: spaces and slashes become hyphens.
pub fn slug(tag: &str) -> String {
    tag.replace([' ', '/'], "-")
}

/// `[a,](…) [b,](…) [c](…)`: every link but the last carries a trailing comma.
pub fn tag_links<S: AsRef<str>>(tags: &[S]) -> String {
    let last = tags.len().saturating_sub(1);
    tags.iter()
        .enumerate()
        .map(|(i, tag)| {
            let tag = tag.as_ref();
            let comma = if i < last { "," } else { "" };
            format!("[{}{}]({}{})", tag, comma, TAG_BASE, slug(tag))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn location_link(location: &str) -> String {
    if location.is_empty() {
        return String::new();
    }
    format!(" from [{}]({}{})", location, TAG_BASE, location.to_lowercase())
}

pub fn album_line(record: &AlbumRecord) -> String {
    let mut line = format!("[*{}*,]({}) by {}", record.title, record.url, record.artist);
    line.push_str(&location_link(&record.location));
    line.push_str(&format!(" ({})", record.release_date.format("%Y")));
    if !record.common_tags.is_empty() {
        line.push_str(" :: ");
        line.push_str(&tag_links(&record.common_tags));
    }
    line
}

/// `[*title*](url) (m/yyyy)`
fn album_entry(record: &AlbumRecord) -> String {
    format!(
        "[*{}*]({}) ({})",
        record.title,
        record.url,
        record.release_date.format("%-m/%Y")
    )
}

pub fn artist_block(artist: &str, records: &[&AlbumRecord]) -> String {
    let entries: BTreeSet<String> = records.iter().map(|r| album_entry(r)).collect();
    let mut block = format!(
        "**{}** &bull; {}",
        artist,
        entries.into_iter().collect::<Vec<_>>().join(", ")
    );

    let tags: Vec<&str> = records
        .iter()
        .flat_map(|r| &r.common_tags)
        .map(String::as_str)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    if !tags.is_empty() {
        block.push_str(" &bull; ");
        block.push_str(&tag_links(&tags));
    }
    block
}

pub fn render_grouped(dataset: &Dataset) -> String {
    dataset
        .by_artist()
        .into_iter()
        .map(|(artist, records)| artist_block(artist, &records))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Per-album lines ordered by artist, release date, title; repeats dropped.
pub fn render_per_album(dataset: &Dataset) -> String {
    let mut records: Vec<&AlbumRecord> = dataset.records.iter().collect();
    records.sort_by(|a, b| {
        (&a.artist, a.release_date, &a.title).cmp(&(&b.artist, b.release_date, &b.title))
    });

    let mut seen = HashSet::new();
    records
        .into_iter()
        .map(album_line)
        .filter(|line| seen.insert(line.clone()))
        .collect::<Vec<_>>()
        .join("\n\n")
}

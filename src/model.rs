use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::AlbumError;

/// Fields read off a single Bandcamp album page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapedAlbum {
    pub title: String,
    pub artist: String,
    pub release_date: NaiveDate,
    pub tags: BTreeSet<String>,
}

/// One (article, album link) pair produced by the crawl.
#[derive(Debug, Clone)]
pub struct CrawlRow {
    pub fact_url: String,
    pub url: String,
    pub outcome: Result<ScrapedAlbum, AlbumError>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlbumRecord {
    pub fact_url: String,
    pub url: String,
    pub title: String,
    pub artist: String,
    pub release_date: NaiveDate,
    /// Non-location tags, sorted.
    pub tags: Vec<String>,
    /// First capitalised tag, or empty.
    pub location: String,
    /// Tags shared with at least one other record, sorted.
    pub common_tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedAlbum {
    pub fact_url: String,
    pub url: String,
    pub reason: AlbumError,
}

#[derive(Debug, Default, Serialize)]
pub struct Dataset {
    pub records: Vec<AlbumRecord>,
    pub failures: Vec<FailedAlbum>,
}

impl Dataset {
    /// Records grouped by artist, groups in first-seen order.
    pub fn by_artist(&self) -> Vec<(&str, Vec<&AlbumRecord>)> {
        let mut groups: Vec<(&str, Vec<&AlbumRecord>)> = Vec::new();
        for record in &self.records {
            match groups.iter_mut().find(|(artist, _)| *artist == record.artist) {
                Some((_, members)) => members.push(record),
                None => groups.push((record.artist.as_str(), vec![record])),
            }
        }
        groups
    }
}

use std::collections::{BTreeSet, HashMap};

use crate::model::{AlbumRecord, CrawlRow, Dataset, FailedAlbum};

/// A tag reads as a place name when it starts with an uppercase letter.
pub fn is_location_tag(tag: &str) -> bool {
    tag.chars().next().is_some_and(char::is_uppercase)
}

/// Split crawl rows into records and failures, then derive `location` and
/// `common_tags` over the whole set of records.
pub fn aggregate(rows: Vec<CrawlRow>) -> Dataset {
    let mut dataset = Dataset::default();

    for row in rows {
        match row.outcome {
            Ok(album) => {
                let location = album
                    .tags
                    .iter()
                    .find(|t| is_location_tag(t))
                    .cloned()
                    .unwrap_or_default();
                let tags = album
                    .tags
                    .into_iter()
                    .filter(|t| !is_location_tag(t))
                    .collect();
                dataset.records.push(AlbumRecord {
                    fact_url: row.fact_url,
                    url: row.url,
                    title: album.title,
                    artist: album.artist,
                    release_date: album.release_date,
                    tags,
                    location,
                    common_tags: Vec::new(),
                });
            }
            Err(reason) => dataset.failures.push(FailedAlbum {
                fact_url: row.fact_url,
                url: row.url,
                reason,
            }),
        }
    }

    let vocabulary = common_vocabulary(&dataset.records);
    for record in &mut dataset.records {
        record.common_tags = record
            .tags
            .iter()
            .filter(|t| vocabulary.contains(*t))
            .cloned()
            .collect();
    }

    dataset
}

/// Tags counted more than once across all records.
pub fn common_vocabulary(records: &[AlbumRecord]) -> BTreeSet<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for tag in records.iter().flat_map(|r| &r.tags) {
        *counts.entry(tag.as_str()).or_default() += 1;
    }
    counts
        .into_iter()
        .filter(|(_, n)| *n > 1)
        .map(|(tag, _)| tag.to_string())
        .collect()
}

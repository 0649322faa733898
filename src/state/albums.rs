/// Album grouping engine
///
/// Partitions a flat media list into multi-item albums and standalone
/// singles. The result is a pure projection over the input: it borrows the
/// items, is recomputed whenever the source list changes, and is never
/// stored or mutated independently.
use std::collections::HashMap;

use super::data::{GroupKey, MediaItem};

/// A derived grouping of items sharing one album title.
///
/// Always holds at least two items; a lone item carrying an album title is
/// folded back into the singles list instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Album<'a> {
    /// The shared album title
    pub title: &'a str,
    /// Members in source-list order
    pub items: Vec<&'a MediaItem>,
}

/// Result of partitioning a media list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Grouped<'a> {
    /// Items outside any multi-item album, in source order
    pub singles: Vec<&'a MediaItem>,
    /// Albums in first-seen order, each with source-ordered members
    pub albums: Vec<Album<'a>>,
}

impl<'a> Grouped<'a> {
    /// Look up an album by its exact title.
    pub fn album(&self, title: &str) -> Option<&Album<'a>> {
        self.albums.iter().find(|album| album.title == title)
    }
}

/// Partition `items` into singles and albums.
///
/// Items without an album key stay singles, order preserved. Items sharing
/// a non-empty album title are bucketed by exact string equality; buckets
/// keep first-seen order and their members keep source order. Buckets with
/// a single member are folded back into the singles list, so every album
/// in the result has at least two items. Malformed records simply degrade
/// to singles; this function has no failure mode.
pub fn group_into_albums<'a>(items: &[&'a MediaItem]) -> Grouped<'a> {
    // First pass: how many items share each album title.
    let mut bucket_sizes: HashMap<&str, usize> = HashMap::new();
    for &item in items {
        if let Some(title) = item.album.name() {
            *bucket_sizes.entry(title).or_insert(0) += 1;
        }
    }

    // Second pass: partition. Lone members of a titled bucket count as
    // singles so their position in the source order is preserved.
    let mut grouped = Grouped::default();
    let mut album_index: HashMap<&str, usize> = HashMap::new();

    for &item in items {
        match &item.album {
            GroupKey::None => grouped.singles.push(item),
            GroupKey::Named(title) => {
                let title = title.as_str();
                if bucket_sizes.get(title).copied().unwrap_or(0) < 2 {
                    grouped.singles.push(item);
                    continue;
                }
                match album_index.get(title) {
                    Some(&index) => grouped.albums[index].items.push(item),
                    None => {
                        album_index.insert(title, grouped.albums.len());
                        grouped.albums.push(Album {
                            title,
                            items: vec![item],
                        });
                    }
                }
            }
        }
    }

    grouped
}

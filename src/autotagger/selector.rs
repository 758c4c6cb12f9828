//! Selection of the next item to tag.
//!
//! Candidates arrive in several batches (one per search query) that can
//! overlap, so selection flattens them, drops repeated IDs and then picks the
//! newest item that still needs tagging.

use std::collections::HashSet;

use crate::models::{IgnoredTagSet, Item};

/// Returns true if the item has no meaningful tags.
///
/// An item needs tagging when it has no tags at all, or when every tag it
/// carries is in the ignored set (compared case-insensitively).
///
/// # Examples
///
/// ```
/// use raintag::autotagger::needs_tagging;
/// use raintag::{IgnoredTagSet, ItemBuilder, ItemId};
///
/// let ignored = IgnoredTagSet::default();
/// let item = ItemBuilder::new().id(ItemId::new(1)).tags(["IFTTT", "Reddit"]).build();
/// assert!(needs_tagging(&item, &ignored));
///
/// let item = ItemBuilder::new().id(ItemId::new(2)).tags(["ifttt", "cooking"]).build();
/// assert!(!needs_tagging(&item, &ignored));
/// ```
#[must_use]
pub fn needs_tagging(item: &Item, ignored: &IgnoredTagSet) -> bool {
    item.tags.iter().all(|tag| ignored.contains(tag))
}

/// Picks the most recently created item that needs tagging.
///
/// Batches are flattened in order and deduplicated by ID (first occurrence
/// wins). Among the items that [`needs_tagging`], the one with the latest
/// `created_at` is returned; ties go to the earliest in flattened order.
/// Returns `None` when nothing needs tagging.
#[must_use]
pub fn select_target<I>(batches: I, ignored: &IgnoredTagSet) -> Option<Item>
where
    I: IntoIterator<Item = Vec<Item>>,
{
    let mut seen = HashSet::new();

    batches
        .into_iter()
        .flatten()
        .filter(|item| seen.insert(item.id))
        .filter(|item| needs_tagging(item, ignored))
        .reduce(|newest, item| {
            if item.created_at > newest.created_at {
                item
            } else {
                newest
            }
        })
}

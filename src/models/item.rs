use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;

use super::ItemId;

/// Reads an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A bookmark item as returned by the bookmarking service.
///
/// Items are owned by the service. The tagger only reads them and, through
/// the client's update operation, replaces their tag list wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier assigned by the service.
    #[serde(rename = "_id")]
    pub id: ItemId,
    /// The bookmark's title.
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// The bookmarked URL.
    #[serde(default, deserialize_with = "null_as_default")]
    pub link: String,
    /// When this item was created.
    #[serde(rename = "created", with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Tags currently applied to the item, in service order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
}

/// Builder for constructing `Item` instances with optional fields.
///
/// # Examples
///
/// ```
/// use raintag::{ItemBuilder, ItemId};
///
/// let item = ItemBuilder::new()
///     .id(ItemId::new(1))
///     .title("Rust book")
///     .build();
///
/// assert_eq!(item.id, ItemId::new(1));
/// assert_eq!(item.title, "Rust book");
/// assert!(item.tags.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct ItemBuilder {
    id: Option<ItemId>,
    title: Option<String>,
    link: Option<String>,
    created_at: Option<OffsetDateTime>,
    tags: Option<Vec<String>>,
}

impl ItemBuilder {
    /// Creates a new `ItemBuilder`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the item ID.
    pub fn id(mut self, id: ItemId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the item title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the bookmarked link.
    pub fn link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Sets the created timestamp.
    pub fn created_at(mut self, created_at: OffsetDateTime) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Sets the current tags.
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Builds the `Item`, using defaults for optional fields.
    ///
    /// # Panics
    ///
    /// Panics if `id` has not been set.
    pub fn build(self) -> Item {
        Item {
            id: self.id.expect("id is required"),
            title: self.title.unwrap_or_default(),
            link: self.link.unwrap_or_default(),
            created_at: self.created_at.unwrap_or_else(OffsetDateTime::now_utc),
            tags: self.tags.unwrap_or_default(),
        }
    }
}

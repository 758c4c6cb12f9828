mod ids;
mod ignored_tags;
mod item;

pub use ids::ItemId;
pub use ignored_tags::IgnoredTagSet;
pub use item::{Item, ItemBuilder};

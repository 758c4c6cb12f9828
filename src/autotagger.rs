//! Auto-tagging of untagged bookmarks from AI tag suggestions.
//!
//! This module contains the decision logic of the tagger: which item to tag,
//! which suggested tags to keep, and what to do when tagging fails.
//!
//! # Examples
//!
//! ## Deduplicating suggestions
//!
//! ```
//! use raintag::autotagger::TagDeduplicator;
//!
//! let suggestions = vec![
//!     "machine learning".to_string(),
//!     "Machine-Learning".to_string(),
//!     "AI".to_string(),
//! ];
//! assert_eq!(
//!     TagDeduplicator::deduplicate(&suggestions),
//!     vec!["machine learning", "AI"]
//! );
//! ```
//!
//! ## Running a cycle
//!
//! ```no_run
//! use std::sync::Arc;
//! use raintag::autotagger::{CycleOutcome, TaggingWorkflow};
//! use raintag::raindrop::RaindropClientBuilder;
//! use raintag::IgnoredTagSet;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = RaindropClientBuilder::new().token("token").build()?;
//! let workflow = TaggingWorkflow::new(Arc::new(client), IgnoredTagSet::default());
//!
//! match workflow.run()? {
//!     CycleOutcome::Tagged { item_id, tags } => println!("{item_id}: {}", tags.join(", ")),
//!     other => println!("{other:?}"),
//! }
//! # Ok(())
//! # }
//! ```

mod deduplicator;
mod selector;
mod similarity;
mod workflow;

pub use deduplicator::{SIMILARITY_THRESHOLD, TagDeduplicator};
pub use selector::{needs_tagging, select_target};
pub use similarity::edit_distance;
pub use workflow::{CycleOutcome, ERROR_TAG, FallbackReason, TaggingWorkflow};

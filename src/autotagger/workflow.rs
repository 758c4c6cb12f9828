//! One tagging cycle: find the newest untagged item, fetch suggestions,
//! deduplicate them and write them back, marking the item with
//! [`ERROR_TAG`] when that is not possible.

use std::fmt;
use std::sync::Arc;
use std::thread;

use tracing::{error, info, warn};

use crate::models::{IgnoredTagSet, Item, ItemId};
use crate::raindrop::{CandidateQuery, RaindropClientTrait, RaindropError};

use super::deduplicator::TagDeduplicator;
use super::selector::select_target;

/// Sentinel tag written to items that could not be tagged, so they stop
/// matching the candidate queries.
pub const ERROR_TAG: &str = "#error";

/// Why an item was marked with [`ERROR_TAG`] instead of real tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// The suggestion service returned nothing (or failed).
    NoSuggestions,
    /// Writing the accepted tags failed.
    UpdateFailed,
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::NoSuggestions => write!(f, "no tag suggestions"),
            FallbackReason::UpdateFailed => write!(f, "failed to apply tags"),
        }
    }
}

/// Terminal state of a single tagging cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The item was updated with the accepted tags.
    Tagged { item_id: ItemId, tags: Vec<String> },
    /// No item needed tagging.
    NoCandidates,
    /// The item was marked with [`ERROR_TAG`].
    ErrorMarked {
        item_id: ItemId,
        reason: FallbackReason,
    },
    /// Marking the item also failed; it may be selected again next cycle.
    ErrorMarkFailed {
        item_id: ItemId,
        reason: FallbackReason,
    },
}

/// Orchestrates a single tagging cycle against the bookmark service.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use raintag::autotagger::TaggingWorkflow;
/// use raintag::raindrop::RaindropClientBuilder;
/// use raintag::IgnoredTagSet;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = RaindropClientBuilder::new().token("token").build()?;
/// let workflow = TaggingWorkflow::new(Arc::new(client), IgnoredTagSet::default());
///
/// let outcome = workflow.run()?;
/// println!("{outcome:?}");
/// # Ok(())
/// # }
/// ```
pub struct TaggingWorkflow {
    client: Arc<dyn RaindropClientTrait>,
    ignored: IgnoredTagSet,
}

impl TaggingWorkflow {
    /// Creates a workflow over the given client and ignored-tag policy.
    #[must_use]
    pub fn new(client: Arc<dyn RaindropClientTrait>, ignored: IgnoredTagSet) -> Self {
        Self { client, ignored }
    }

    /// Returns the candidate queries in issue order: untagged first, then one
    /// per ignored tag.
    pub fn candidate_queries(&self) -> Vec<CandidateQuery> {
        std::iter::once(CandidateQuery::Untagged)
            .chain(
                self.ignored
                    .tags()
                    .iter()
                    .map(|tag| CandidateQuery::Tagged(tag.clone())),
            )
            .collect()
    }

    /// Runs one cycle.
    ///
    /// # Errors
    ///
    /// Only candidate fetch failures are returned. Suggestion failures degrade
    /// to an empty suggestion list and update failures trigger the
    /// [`ERROR_TAG`] fallback; both are reported through the outcome.
    pub fn run(&self) -> Result<CycleOutcome, RaindropError> {
        let batches = self.fetch_candidates()?;

        let Some(item) = select_target(batches, &self.ignored) else {
            info!("No untagged raindrops found");
            return Ok(CycleOutcome::NoCandidates);
        };

        info!(
            id = %item.id,
            title = %item.title,
            link = %item.link,
            created = %item.created_at,
            "Found untagged raindrop"
        );

        let suggestions = self.suggestions_for(&item);
        if suggestions.is_empty() {
            warn!(id = %item.id, "No tag suggestions found, marking with {ERROR_TAG}");
            return Ok(self.mark_error(item.id, FallbackReason::NoSuggestions));
        }
        info!(
            count = suggestions.len(),
            tags = %suggestions.join(", "),
            "Received tag suggestions"
        );

        let accepted = self.accepted_tags(&suggestions);
        info!(
            count = accepted.len(),
            tags = %accepted.join(", "),
            "Accepted tags"
        );

        // An empty list is still written; the item then matches the untagged query again
        match self.client.update_tags(item.id, &accepted) {
            Ok(()) => {
                info!(id = %item.id, "Raindrop successfully tagged");
                Ok(CycleOutcome::Tagged {
                    item_id: item.id,
                    tags: accepted,
                })
            }
            Err(e) => {
                warn!(id = %item.id, error = %e, "Failed to apply tags, marking with {ERROR_TAG}");
                Ok(self.mark_error(item.id, FallbackReason::UpdateFailed))
            }
        }
    }

    /// Deduplicates suggestions, then drops ignored tags.
    ///
    /// Ignored tags are never written back as real tags.
    pub fn accepted_tags(&self, suggestions: &[String]) -> Vec<String> {
        TagDeduplicator::deduplicate(suggestions)
            .into_iter()
            .filter(|tag| !self.ignored.contains(tag))
            .collect()
    }

    /// Issues every candidate query concurrently and waits for all of them.
    fn fetch_candidates(&self) -> Result<Vec<Vec<Item>>, RaindropError> {
        let queries = self.candidate_queries();
        let client = self.client.as_ref();

        let batches: Vec<Vec<Item>> = thread::scope(|scope| {
            let handles: Vec<_> = queries
                .iter()
                .map(|query| scope.spawn(move || client.fetch_candidates(query)))
                .collect();

            handles
                .into_iter()
                .map(|handle| match handle.join() {
                    Ok(result) => result,
                    Err(panic) => std::panic::resume_unwind(panic),
                })
                .collect::<Result<Vec<_>, RaindropError>>()
        })?;

        info!(
            queries = queries.len(),
            items = batches.iter().map(Vec::len).sum::<usize>(),
            "Fetched candidate raindrops"
        );
        Ok(batches)
    }

    /// Fetches suggestions, treating any failure as "no suggestions".
    fn suggestions_for(&self, item: &Item) -> Vec<String> {
        info!(id = %item.id, "Getting AI tag suggestions");
        self.client.suggest_tags(item.id).unwrap_or_else(|e| {
            warn!(id = %item.id, error = %e, "Error getting tag suggestions");
            Vec::new()
        })
    }

    /// Writes [`ERROR_TAG`] as the item's only tag. Makes exactly one attempt.
    fn mark_error(&self, item_id: ItemId, reason: FallbackReason) -> CycleOutcome {
        match self.client.update_tags(item_id, &[ERROR_TAG.to_string()]) {
            Ok(()) => {
                info!(id = %item_id, %reason, "Added {ERROR_TAG} tag to prevent future attempts");
                CycleOutcome::ErrorMarked { item_id, reason }
            }
            Err(e) => {
                error!(
                    id = %item_id,
                    %reason,
                    error = %e,
                    "Could not apply {ERROR_TAG} tag, this raindrop may be stuck"
                );
                CycleOutcome::ErrorMarkFailed { item_id, reason }
            }
        }
    }
}

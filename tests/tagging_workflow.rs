/// End-to-end tests for a tagging cycle over an in-memory bookmark service.
///
/// The fake service keeps real state (items and their tags) so consecutive
/// cycles observe the effect of earlier ones, the way the live service does.
use std::sync::{Arc, Mutex};

use raintag::autotagger::{CycleOutcome, ERROR_TAG, FallbackReason, TaggingWorkflow};
use raintag::raindrop::{CandidateQuery, RaindropClientTrait, RaindropError};
use raintag::{CycleRunner, IgnoredTagSet, Item, ItemBuilder, ItemId};
use time::{Duration, OffsetDateTime, macros::datetime};

const EPOCH: OffsetDateTime = datetime!(2024-01-01 00:00 UTC);

struct FakeService {
    items: Mutex<Vec<Item>>,
    suggestions: Vec<(ItemId, Vec<String>)>,
    reject_updates: bool,
    update_calls: Mutex<usize>,
}

impl FakeService {
    fn new(items: Vec<Item>) -> Self {
        Self {
            items: Mutex::new(items),
            suggestions: Vec::new(),
            reject_updates: false,
            update_calls: Mutex::new(0),
        }
    }

    fn suggest(mut self, id: i64, tags: &[&str]) -> Self {
        self.suggestions.push((
            ItemId::new(id),
            tags.iter().map(|t| t.to_string()).collect(),
        ));
        self
    }

    fn tags_of(&self, id: i64) -> Vec<String> {
        self.items
            .lock()
            .unwrap()
            .iter()
            .find(|item| item.id == ItemId::new(id))
            .map(|item| item.tags.clone())
            .unwrap_or_default()
    }
}

impl RaindropClientTrait for FakeService {
    fn fetch_candidates(&self, query: &CandidateQuery) -> Result<Vec<Item>, RaindropError> {
        let mut matches: Vec<Item> = self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|item| match query {
                CandidateQuery::Untagged => item.tags.is_empty(),
                CandidateQuery::Tagged(tag) => {
                    item.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
                }
            })
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matches)
    }

    fn suggest_tags(&self, id: ItemId) -> Result<Vec<String>, RaindropError> {
        Ok(self
            .suggestions
            .iter()
            .find(|(item_id, _)| *item_id == id)
            .map(|(_, tags)| tags.clone())
            .unwrap_or_default())
    }

    fn update_tags(&self, id: ItemId, tags: &[String]) -> Result<(), RaindropError> {
        *self.update_calls.lock().unwrap() += 1;
        if self.reject_updates {
            return Err(RaindropError::Http { status: 500 });
        }
        let mut items = self.items.lock().unwrap();
        if let Some(item) = items.iter_mut().find(|item| item.id == id) {
            item.tags = tags.to_vec();
        }
        Ok(())
    }
}

fn item(id: i64, created_secs: i64, tags: &[&str]) -> Item {
    ItemBuilder::new()
        .id(ItemId::new(id))
        .title(format!("Bookmark {id}"))
        .link(format!("https://example.com/{id}"))
        .created_at(EPOCH + Duration::seconds(created_secs))
        .tags(tags.iter().copied())
        .build()
}

fn workflow(service: &Arc<FakeService>) -> TaggingWorkflow {
    let client: Arc<dyn RaindropClientTrait> = service.clone();
    TaggingWorkflow::new(client, IgnoredTagSet::default())
}

#[test]
fn tags_newest_untagged_item_and_replaces_ignored_tags() {
    let service = Arc::new(
        FakeService::new(vec![
            item(1, 10, &[]),
            item(2, 30, &["IFTTT"]),
            item(3, 50, &["ifttt", "cooking"]),
        ])
        .suggest(2, &["machine learning", "Machine-Learning", "AI", "reddit"]),
    );

    let outcome = workflow(&service).run().expect("cycle should succeed");

    assert_eq!(
        outcome,
        CycleOutcome::Tagged {
            item_id: ItemId::new(2),
            tags: vec!["machine learning".to_string(), "AI".to_string()],
        }
    );
    assert_eq!(service.tags_of(2), vec!["machine learning", "AI"]);
    assert_eq!(service.tags_of(3), vec!["ifttt", "cooking"]);
}

#[test]
fn consecutive_cycles_work_through_backlog_newest_first() {
    let service = Arc::new(
        FakeService::new(vec![item(1, 10, &[]), item(2, 20, &["reddit"])])
            .suggest(1, &["rust", "programming"])
            .suggest(2, &["news"]),
    );
    let workflow = workflow(&service);
    let runner = CycleRunner::new(std::time::Duration::ZERO);

    let outcomes = runner.run_times(3, || Ok(workflow.run()?));

    assert_eq!(
        outcomes,
        vec![
            Some(CycleOutcome::Tagged {
                item_id: ItemId::new(2),
                tags: vec!["news".to_string()],
            }),
            Some(CycleOutcome::Tagged {
                item_id: ItemId::new(1),
                tags: vec!["rust".to_string(), "programming".to_string()],
            }),
            Some(CycleOutcome::NoCandidates),
        ]
    );
}

#[test]
fn item_without_suggestions_is_not_selected_again() {
    let service = Arc::new(FakeService::new(vec![item(1, 10, &[])]));
    let workflow = workflow(&service);

    let first = workflow.run().expect("cycle should succeed");
    let second = workflow.run().expect("cycle should succeed");

    assert_eq!(
        first,
        CycleOutcome::ErrorMarked {
            item_id: ItemId::new(1),
            reason: FallbackReason::NoSuggestions,
        }
    );
    assert_eq!(service.tags_of(1), vec![ERROR_TAG]);
    assert_eq!(second, CycleOutcome::NoCandidates);
}

#[test]
fn rejected_updates_leave_item_selectable() {
    let service = Arc::new(FakeService {
        reject_updates: true,
        ..FakeService::new(vec![item(1, 10, &["ifttt"])]).suggest(1, &["travel"])
    });
    let workflow = workflow(&service);

    let outcome = workflow.run().expect("update failures must not propagate");

    assert_eq!(
        outcome,
        CycleOutcome::ErrorMarkFailed {
            item_id: ItemId::new(1),
            reason: FallbackReason::UpdateFailed,
        }
    );
    // One real update plus one fallback attempt
    assert_eq!(*service.update_calls.lock().unwrap(), 2);
    assert_eq!(service.tags_of(1), vec!["ifttt"]);
    assert!(matches!(
        workflow.run(),
        Ok(CycleOutcome::ErrorMarkFailed { .. })
    ));
}

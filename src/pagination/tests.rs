//! Tests for pagination module

use super::*;
use crate::error::{Error, Result};
use crate::retry::RetryPolicy;
use crate::types::{PageRequest, PageResponse, Record};
use async_trait::async_trait;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use test_case::test_case;
use url::Url;

// ============================================================================
// Scripted page source
// ============================================================================

/// Serves a fixed set of pages with per-page delays and failure scripts
#[derive(Default)]
struct ScriptedSource {
    total_pages: u32,
    pages: HashMap<u32, Vec<Record>>,
    delays: HashMap<u32, Duration>,
    failures: HashMap<u32, u32>,
    malformed: HashSet<u32>,
    claimed_pages_after_first: Option<u32>,
    attempts: Mutex<HashMap<u32, u32>>,
    completed: Mutex<Vec<u32>>,
}

impl ScriptedSource {
    fn new(total_pages: u32) -> Self {
        let pages = (1..=total_pages)
            .map(|page| (page, vec![record(json!({"id": page, "page": page}))]))
            .collect();
        Self {
            total_pages,
            pages,
            ..Self::default()
        }
    }

    fn page(mut self, page: u32, results: Vec<Record>) -> Self {
        self.pages.insert(page, results);
        self
    }

    fn delay(mut self, page: u32, delay: Duration) -> Self {
        self.delays.insert(page, delay);
        self
    }

    fn fail(mut self, page: u32, times: u32) -> Self {
        self.failures.insert(page, times);
        self
    }

    fn malformed(mut self, page: u32) -> Self {
        self.malformed.insert(page);
        self
    }

    fn attempts(&self, page: u32) -> u32 {
        self.attempts
            .lock()
            .unwrap()
            .get(&page)
            .copied()
            .unwrap_or(0)
    }

    fn requested_pages(&self) -> Vec<u32> {
        let mut pages: Vec<u32> = self.attempts.lock().unwrap().keys().copied().collect();
        pages.sort_unstable();
        pages
    }

    fn completion_order(&self) -> Vec<u32> {
        self.completed.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageSource for ScriptedSource {
    async fn fetch_page(&self, request: &PageRequest) -> Result<PageResponse> {
        let page = request.page();
        let attempt = {
            let mut attempts = self.attempts.lock().unwrap();
            let count = attempts.entry(page).or_insert(0);
            *count += 1;
            *count
        };

        if let Some(delay) = self.delays.get(&page) {
            tokio::time::sleep(*delay).await;
        }

        if attempt <= self.failures.get(&page).copied().unwrap_or(0) {
            return Err(Error::http_status(503, request.url().as_str()));
        }
        if self.malformed.contains(&page) {
            return Err(Error::malformed(request.url().as_str(), "expected value"));
        }

        self.completed.lock().unwrap().push(page);

        let pages = match (page, self.claimed_pages_after_first) {
            (1, _) | (_, None) => self.total_pages,
            (_, Some(claimed)) => claimed,
        };
        let results = self.pages.get(&page).cloned().unwrap_or_default();
        Ok(PageResponse::new(pages, results))
    }
}

fn record(value: serde_json::Value) -> Record {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("record must be an object, got {other}"),
    }
}

fn endpoint() -> Url {
    Url::parse("http://localhost/api/character").unwrap()
}

fn paginator(source: &Arc<ScriptedSource>, max_retries: u32) -> Paginator<Arc<ScriptedSource>> {
    Paginator::new(
        Arc::clone(source),
        RetryPolicy::new(max_retries, Duration::from_secs(2)),
    )
}

// ============================================================================
// Orchestration Tests
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_single_page_collection() {
    let rick = record(json!({"id": 1, "name": "Rick"}));
    let source = Arc::new(ScriptedSource::new(1).page(1, vec![rick.clone()]));

    let records = paginator(&source, 5)
        .fetch_all_pages(&endpoint())
        .await
        .unwrap();

    assert_eq!(records, vec![rick]);
    assert_eq!(source.requested_pages(), vec![1]);
    assert_eq!(source.attempts(1), 1);
}

#[tokio::test(start_paused = true)]
async fn test_results_follow_page_order_not_completion_order() {
    let a = record(json!({"id": "a"}));
    let b = record(json!({"id": "b"}));
    let c = record(json!({"id": "c"}));
    let source = Arc::new(
        ScriptedSource::new(3)
            .page(1, vec![a.clone()])
            .page(2, vec![b.clone()])
            .page(3, vec![c.clone()])
            .delay(2, Duration::from_millis(300))
            .delay(3, Duration::from_millis(10)),
    );

    let records = paginator(&source, 5)
        .fetch_all_pages(&endpoint())
        .await
        .unwrap();

    assert_eq!(source.completion_order(), vec![1, 3, 2]);
    assert_eq!(records, vec![a, b, c]);
}

#[tokio::test(start_paused = true)]
async fn test_page_recovers_within_retry_budget() {
    let source = Arc::new(ScriptedSource::new(3).fail(2, 2));

    let records = paginator(&source, 5)
        .fetch_all_pages(&endpoint())
        .await
        .unwrap();

    let ids: Vec<_> = records.iter().map(|r| r["id"].clone()).collect();
    assert_eq!(ids, vec![json!(1), json!(2), json!(3)]);
    assert_eq!(source.attempts(2), 3);
    assert_eq!(source.attempts(1), 1);
    assert_eq!(source.attempts(3), 1);
}

#[tokio::test(start_paused = true)]
async fn test_exhausted_page_fails_whole_collection() {
    let source = Arc::new(ScriptedSource::new(3).fail(2, 5));

    let err = paginator(&source, 5)
        .fetch_all_pages(&endpoint())
        .await
        .unwrap_err();

    assert_eq!(source.attempts(2), 5);
    assert_eq!(err.failed_page(), Some(("http://localhost/api/character", 2)));
    match err {
        Error::RequestExhausted { attempts, .. } => assert_eq!(attempts, 5),
        other => panic!("Expected RequestExhausted, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn test_malformed_page_is_not_retried() {
    let source = Arc::new(ScriptedSource::new(3).malformed(3));

    let err = paginator(&source, 5)
        .fetch_all_pages(&endpoint())
        .await
        .unwrap_err();

    assert_eq!(source.attempts(3), 1);
    assert_eq!(err.failed_page(), Some(("http://localhost/api/character", 3)));
    assert!(matches!(err, Error::PageFailed { .. }));
}

#[tokio::test(start_paused = true)]
async fn test_first_page_failure_stops_before_fan_out() {
    let source = Arc::new(ScriptedSource::new(4).fail(1, u32::MAX));

    let err = paginator(&source, 3)
        .fetch_all_pages(&endpoint())
        .await
        .unwrap_err();

    assert_eq!(source.requested_pages(), vec![1]);
    assert_eq!(source.attempts(1), 3);
    assert_eq!(err.failed_page().map(|(_, page)| page), Some(1));
}

#[tokio::test(start_paused = true)]
async fn test_page_count_from_first_page_is_authoritative() {
    let mut scripted = ScriptedSource::new(3);
    scripted.claimed_pages_after_first = Some(10);
    let source = Arc::new(scripted);

    let records = paginator(&source, 5)
        .fetch_all_pages(&endpoint())
        .await
        .unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(source.requested_pages(), vec![1, 2, 3]);
}

#[tokio::test(start_paused = true)]
async fn test_zero_page_count_is_treated_as_single_page() {
    let source = Arc::new(ScriptedSource::new(0));

    let records = paginator(&source, 5)
        .fetch_all_pages(&endpoint())
        .await
        .unwrap();

    assert!(records.is_empty());
    assert_eq!(source.requested_pages(), vec![1]);
}

#[test_case(2 ; "two pages")]
#[test_case(5 ; "five pages")]
#[test_case(12 ; "twelve pages")]
#[tokio::test(start_paused = true)]
async fn test_concatenates_every_page_in_order(total: u32) {
    // later pages answer first
    let mut scripted = ScriptedSource::new(total);
    for page in 2..=total {
        scripted = scripted.delay(page, Duration::from_millis(u64::from(total - page) * 10));
    }
    let source = Arc::new(scripted);

    let records = paginator(&source, 5)
        .fetch_all_pages(&endpoint())
        .await
        .unwrap();

    let pages: Vec<u64> = records
        .iter()
        .map(|r| r["page"].as_u64().unwrap())
        .collect();
    let expected: Vec<u64> = (1..=u64::from(total)).collect();
    assert_eq!(pages, expected);
    for page in 1..=total {
        assert_eq!(source.attempts(page), 1);
    }
}

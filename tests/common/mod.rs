#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use linkcut::domain::entities::{Link, NewLink};
use linkcut::domain::repositories::LinkRepository;
use linkcut::error::AppError;
use linkcut::prelude::LinkService;
use linkcut::state::AppState;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;

/// In-memory [`LinkRepository`] for handler tests.
///
/// Mirrors the PostgreSQL implementation's observable behavior: monotonic ids,
/// a uniqueness check on insert reported as a conflict, newest-first listing
/// with id as the tiebreak, and an atomic-style visit counter. Every call
/// bumps `storage_calls` so tests can assert that a path never touched
/// storage.
pub struct MemoryLinkRepository {
    links: Mutex<Vec<Link>>,
    next_id: AtomicI64,
    storage_calls: AtomicUsize,
    fail_record_visit: AtomicBool,
}

impl MemoryLinkRepository {
    pub fn new() -> Self {
        Self {
            links: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
            storage_calls: AtomicUsize::new(0),
            fail_record_visit: AtomicBool::new(false),
        }
    }

    /// Makes subsequent `record_visit` calls fail like a storage outage.
    pub fn fail_record_visit(&self, fail: bool) {
        self.fail_record_visit.store(fail, Ordering::SeqCst);
    }

    /// Number of repository calls made so far.
    pub fn storage_calls(&self) -> usize {
        self.storage_calls.load(Ordering::SeqCst)
    }

    /// Snapshot of a stored link, bypassing the call counter.
    pub fn stored(&self, code: &str) -> Option<Link> {
        self.links
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.code == code)
            .cloned()
    }

    fn count_call(&self) {
        self.storage_calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        self.count_call();
        let mut links = self.links.lock().unwrap();

        // Same signal the database unique constraint would produce.
        if links.iter().any(|l| l.code == new_link.code) {
            return Err(AppError::conflict("Code already exists"));
        }

        let link = Link {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            code: new_link.code,
            url: new_link.url,
            clicks: 0,
            created_at: Utc::now(),
            last_clicked_at: None,
        };
        links.push(link.clone());

        Ok(link)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        self.count_call();
        Ok(self
            .links
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.code == code)
            .cloned())
    }

    async fn exists(&self, code: &str) -> Result<bool, AppError> {
        self.count_call();
        Ok(self.links.lock().unwrap().iter().any(|l| l.code == code))
    }

    async fn delete_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        self.count_call();
        let mut links = self.links.lock().unwrap();

        let position = links.iter().position(|l| l.code == code);
        Ok(position.map(|i| links.remove(i)))
    }

    async fn list_all(&self) -> Result<Vec<Link>, AppError> {
        self.count_call();
        let mut links = self.links.lock().unwrap().clone();
        links.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(links)
    }

    async fn record_visit(&self, code: &str) -> Result<bool, AppError> {
        self.count_call();

        if self.fail_record_visit.load(Ordering::SeqCst) {
            return Err(AppError::internal("Database error"));
        }

        let mut links = self.links.lock().unwrap();

        match links.iter_mut().find(|l| l.code == code) {
            Some(link) => {
                link.clicks += 1;
                link.last_clicked_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.count_call();
        Ok(())
    }
}

/// Builds application state over a fresh in-memory repository.
pub fn create_test_state() -> (AppState, Arc<MemoryLinkRepository>) {
    let repository = Arc::new(MemoryLinkRepository::new());
    let link_service = Arc::new(LinkService::new(repository.clone()));

    (AppState::new(link_service), repository)
}

/// Inserts a link directly through the repository.
pub async fn seed_link(repository: &MemoryLinkRepository, code: &str, url: &str) -> Link {
    repository
        .create(NewLink {
            code: code.to_string(),
            url: url.to_string(),
        })
        .await
        .unwrap()
}

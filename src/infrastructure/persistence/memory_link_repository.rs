//! In-process link repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// A repository that keeps links in a map guarded by an async `RwLock`.
///
/// Used when no database is configured and by the HTTP tests. Contents are
/// lost when the process exits.
#[derive(Default)]
pub struct MemoryLinkRepository {
    links: RwLock<HashMap<String, ShortLink>>,
}

impl MemoryLinkRepository {
    pub fn new() -> Self {
        debug!("Using in-memory link storage");
        Self::default()
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        let mut links = self.links.write().await;

        match links.entry(new_link.code.clone()) {
            Entry::Occupied(_) => Err(AppError::ShortcodeTaken {
                code: new_link.code,
            }),
            Entry::Vacant(slot) => Ok(slot.insert(new_link.into()).clone()),
        }
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, AppError> {
        Ok(self.links.read().await.get(code).cloned())
    }

    async fn record_access(&self, code: &str) -> Result<(), AppError> {
        if let Some(link) = self.links.write().await.get_mut(code) {
            link.access_count += 1;
        }
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

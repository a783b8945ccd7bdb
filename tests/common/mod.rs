#![allow(dead_code)]

use axum_test::TestServer;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use std::sync::Arc;
use shorturls::application::services::{LinkPolicy, LinkService};
use shorturls::domain::clock::ManualClock;
use shorturls::domain::repositories::LinkRepository;
use shorturls::infrastructure::persistence::MemoryLinkRepository;
use shorturls::routes::router;
use shorturls::state::AppState;

pub const BASE_URL: &str = "http://sho.rt";

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap()
}

/// Test harness: a server over in-memory storage plus handles to the
/// storage and the clock it reads.
pub struct TestApp {
    pub server: TestServer,
    pub clock: ManualClock,
    pub repository: Arc<MemoryLinkRepository>,
}

pub fn create_test_state(
    repository: Arc<dyn LinkRepository>,
    clock: ManualClock,
    base_url: Option<&str>,
) -> AppState {
    let link_service = Arc::new(LinkService::new(
        repository,
        Arc::new(clock),
        LinkPolicy::default(),
    ));

    AppState::new(link_service, base_url.map(str::to_string))
}

pub fn spawn_app_with_base(base_url: Option<&str>) -> TestApp {
    let clock = ManualClock::new(start_time());
    let repository = Arc::new(MemoryLinkRepository::new());

    let state = create_test_state(repository.clone(), clock.clone(), base_url);
    let server = TestServer::new(router(state)).unwrap();

    TestApp {
        server,
        clock,
        repository,
    }
}

pub fn spawn_app() -> TestApp {
    spawn_app_with_base(Some(BASE_URL))
}

/// Extracts the short code from a `shortLink` response field.
pub fn code_of(body: &Value) -> String {
    body["shortLink"]
        .as_str()
        .unwrap()
        .rsplit('/')
        .next()
        .unwrap()
        .to_string()
}

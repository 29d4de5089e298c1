// Test helper functions

use std::sync::Arc;
use wealthpress::core::config::{Config, ContentSourceKind};
use wealthpress::core::services::Services;
use wealthpress::core::types::{ContentSnapshot, EntityKind, SearchResult};

use super::fixtures::FixtureFile;

#[allow(dead_code)] // Used in integration tests
fn fixture_config(fixture: &FixtureFile) -> Config {
    let mut config = Config::default();
    config.site.base_url = "https://www.example.test".to_string();
    config.content.source = ContentSourceKind::Fixture;
    config.content.fixture_path = Some(fixture.path().to_path_buf());
    config
}

/// Create services backed by a fixture file, already loaded
///
/// Keep the returned fixture alive for the duration of the test.
#[allow(dead_code)] // Used in integration tests
pub async fn create_test_services(snapshot: &ContentSnapshot) -> (Arc<Services>, FixtureFile) {
    let fixture = FixtureFile::new(snapshot);
    let services = Services::from_config(fixture_config(&fixture)).expect("Failed to build services");
    services
        .content
        .refresh()
        .await
        .expect("Failed to load fixture");
    (Arc::new(services), fixture)
}

/// Same as [`create_test_services`] with the newsletter pointed at `url`
#[allow(dead_code)] // Used in integration tests
pub async fn create_test_services_with_newsletter(
    snapshot: &ContentSnapshot,
    url: &str,
) -> (Arc<Services>, FixtureFile) {
    let fixture = FixtureFile::new(snapshot);
    let mut config = fixture_config(&fixture);
    config.newsletter.base_url = Some(url.to_string());
    let services = Services::from_config(config).expect("Failed to build services");
    services
        .content
        .refresh()
        .await
        .expect("Failed to load fixture");
    (Arc::new(services), fixture)
}

/// Position and result for a record, if ranked
#[allow(dead_code)] // Used in integration tests
pub fn find_result<'a>(
    results: &'a [SearchResult],
    kind: EntityKind,
    id: &str,
) -> Option<(usize, &'a SearchResult)> {
    results
        .iter()
        .enumerate()
        .find(|(_, r)| r.kind() == kind && r.item.id() == id)
}

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use url::Url;

use affiliate_redirect::application::services::{
    RedirectService, ShortlinkExpander, UnmappedDomainPolicy,
};
use affiliate_redirect::domain::affiliate::{AffiliateCredentials, AffiliateLinkBuilder};
use affiliate_redirect::domain::decision_event::DecisionEvent;
use affiliate_redirect::domain::entities::{Network, PartnerEntry, ShortlinkRule};
use affiliate_redirect::domain::registry::PartnerRegistry;
use affiliate_redirect::infrastructure::http::{FetchResult, HopFetcher};
use affiliate_redirect::state::{AppState, DeploymentInfo};
use affiliate_redirect::utils::query_sanitizer::QuerySanitizer;

/// Hop fetcher for tests that must never touch the network.
///
/// Always answers as if the hop had no `Location` header.
pub struct OfflineFetcher;

#[async_trait]
impl HopFetcher for OfflineFetcher {
    async fn fetch_location(&self, _url: &Url) -> FetchResult<Option<String>> {
        Ok(None)
    }
}

pub fn test_registry() -> Arc<PartnerRegistry> {
    Arc::new(
        PartnerRegistry::new(
            vec![
                PartnerEntry::new(
                    "zalando.de",
                    Network::Awin {
                        mid: "12345".into(),
                    },
                ),
                PartnerEntry::new("hm.com", Network::Awin { mid: "XXXX".into() }),
                PartnerEntry::new("ikea.com", Network::Cj),
            ],
            vec![ShortlinkRule::new("amzn.to", "amazon.de")],
        )
        .unwrap(),
    )
}

pub fn full_credentials() -> AffiliateCredentials {
    AffiliateCredentials::new(
        Some("999".into()),
        Some("7654321".into()),
        Some("tag123".into()),
    )
}

pub fn create_redirect_service(
    registry: Arc<PartnerRegistry>,
    fetcher: Arc<dyn HopFetcher>,
    credentials: AffiliateCredentials,
    policy: UnmappedDomainPolicy,
) -> RedirectService {
    let expander = ShortlinkExpander::new(
        fetcher,
        registry.clone(),
        Duration::from_millis(500),
        Duration::from_secs(2),
    );

    RedirectService::new(
        registry,
        QuerySanitizer::default(),
        expander,
        AffiliateLinkBuilder::new(credentials),
        policy,
    )
}

pub fn create_test_state(
    credentials: AffiliateCredentials,
    policy: UnmappedDomainPolicy,
) -> (AppState, mpsc::Receiver<DecisionEvent>) {
    let (tx, rx) = mpsc::channel(100);

    let service = create_redirect_service(
        test_registry(),
        Arc::new(OfflineFetcher),
        credentials,
        policy,
    );

    let deployment = DeploymentInfo {
        env: "test".to_string(),
        commit: "abc1234".to_string(),
    };

    let state = AppState::new(Arc::new(service), Some(tx), deployment);

    (state, rx)
}

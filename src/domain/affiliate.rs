//! Affiliate tracking URL construction.
//!
//! Building a link never fails. Whenever a credential the network needs is
//! missing or malformed, the sanitized target is returned untouched
//! (passthrough) instead of a half-filled tracking URL.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

use crate::domain::entities::Network;

/// AWIN click gateway.
pub const AWIN_GATEWAY: &str = "https://www.awin1.com/cread.php";

/// CJ deep-link gateway. The publisher id and target are path segments.
pub const CJ_GATEWAY: &str = "https://www.anrdoezrs.net/links";

/// Compiled regex for AWIN merchant ids.
static MERCHANT_ID_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").unwrap());

/// Whether `mid` is a usable AWIN merchant id.
pub fn is_valid_merchant_id(mid: &str) -> bool {
    MERCHANT_ID_REGEX.is_match(mid)
}

/// Process-wide affiliate credentials, read once from configuration.
///
/// Blank values are stored as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AffiliateCredentials {
    pub awin_affiliate_id: Option<String>,
    pub cj_publisher_id: Option<String>,
    pub amazon_tag: Option<String>,
}

impl AffiliateCredentials {
    pub fn new(
        awin_affiliate_id: Option<String>,
        cj_publisher_id: Option<String>,
        amazon_tag: Option<String>,
    ) -> Self {
        Self {
            awin_affiliate_id: non_blank(awin_affiliate_id),
            cj_publisher_id: non_blank(cj_publisher_id),
            amazon_tag: non_blank(amazon_tag),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// The final outbound link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffiliateLink {
    pub url: String,
    /// `true` when network tracking was actually applied.
    pub tracked: bool,
}

impl AffiliateLink {
    fn tracked(url: String) -> Self {
        Self { url, tracked: true }
    }

    fn passthrough(target: &Url) -> Self {
        Self {
            url: target.to_string(),
            tracked: false,
        }
    }
}

/// Builds network-specific tracking links from sanitized targets.
#[derive(Debug, Clone, Default)]
pub struct AffiliateLinkBuilder {
    credentials: AffiliateCredentials,
}

impl AffiliateLinkBuilder {
    pub fn new(credentials: AffiliateCredentials) -> Self {
        Self { credentials }
    }

    pub fn credentials(&self) -> &AffiliateCredentials {
        &self.credentials
    }

    /// Builds the outbound link for `target` under `network`.
    ///
    /// # Per network
    ///
    /// - **AWIN**: `https://www.awin1.com/cread.php?awinmid=<mid>&awinaffid=<affid>&ued=<target>`.
    ///   Needs the affiliate id and a numeric merchant id.
    /// - **CJ**: `https://www.anrdoezrs.net/links/<pid>/type/dlg/<target>`. Needs the publisher id.
    /// - **Amazon**: the target itself with `tag=<partner tag>` set. Needs the partner tag.
    ///
    /// The target is never modified; a new URL is always derived.
    pub fn build(&self, target: &Url, network: &Network) -> AffiliateLink {
        match network {
            Network::Awin { mid } => self.build_awin(target, mid),
            Network::Cj => self.build_cj(target),
            Network::Amazon => self.build_amazon(target),
        }
    }

    fn build_awin(&self, target: &Url, mid: &str) -> AffiliateLink {
        let Some(affiliate_id) = self.credentials.awin_affiliate_id.as_deref() else {
            return AffiliateLink::passthrough(target);
        };
        if !is_valid_merchant_id(mid) {
            return AffiliateLink::passthrough(target);
        }

        AffiliateLink::tracked(format!(
            "{}?awinmid={}&awinaffid={}&ued={}",
            AWIN_GATEWAY,
            mid,
            urlencoding::encode(affiliate_id),
            urlencoding::encode(target.as_str())
        ))
    }

    fn build_cj(&self, target: &Url) -> AffiliateLink {
        let Some(publisher_id) = self.credentials.cj_publisher_id.as_deref() else {
            return AffiliateLink::passthrough(target);
        };

        AffiliateLink::tracked(format!(
            "{}/{}/type/dlg/{}",
            CJ_GATEWAY,
            urlencoding::encode(publisher_id),
            urlencoding::encode(target.as_str())
        ))
    }

    fn build_amazon(&self, target: &Url) -> AffiliateLink {
        let Some(tag) = self.credentials.amazon_tag.as_deref() else {
            return AffiliateLink::passthrough(target);
        };

        let mut url = target.clone();
        let kept: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(k, _)| k != "tag")
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        url.query_pairs_mut()
            .clear()
            .extend_pairs(kept)
            .append_pair("tag", tag);

        AffiliateLink::tracked(url.to_string())
    }
}

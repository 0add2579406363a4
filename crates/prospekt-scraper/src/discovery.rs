//! Shop discovery from the catalog's hypermarket directory page.

use std::sync::LazyLock;
use std::time::Duration;

use scraper::{Html, Selector};

use prospekt_core::FetchTarget;

use crate::client::{fetch_with_deadline, PageFetcher};
use crate::error::ScraperError;
use crate::html::{require, resolve_url, text_of};

/// Directory page listing every hypermarket shop, relative to the base URL.
pub const DIRECTORY_PATH: &str = "/hypermarkte/";

const SIDEBAR_CSS: &str = "#left-category-shops";

static SIDEBAR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(SIDEBAR_CSS).expect("valid sidebar selector"));
static SHOP_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("valid shop link selector"));

/// Fetches the directory page once and returns one [`FetchTarget`] per shop
/// link, in page order.
///
/// The request is bound by `timeout` (zero disables it) and is not retried.
///
/// # Errors
///
/// Any failure here is fatal for a run: returns the transport error,
/// [`ScraperError::UnexpectedStatus`], [`ScraperError::Timeout`], or
/// [`ScraperError::MissingElement`] when the page has no shop sidebar.
pub async fn discover<F: PageFetcher>(
    fetcher: &F,
    base_url: &str,
    timeout: Duration,
) -> Result<Vec<FetchTarget>, ScraperError> {
    let directory_url = resolve_url(base_url, DIRECTORY_PATH)?;
    tracing::info!(url = %directory_url, "fetching shop directory");

    let body = fetch_with_deadline(fetcher, &directory_url, timeout).await?;
    let targets = parse_directory(&String::from_utf8_lossy(&body), base_url)?;

    tracing::info!(shops = targets.len(), "discovered shops");
    Ok(targets)
}

/// Parses the directory markup into fetch targets.
///
/// Anchors without an `href` (or with one that cannot be resolved) are
/// skipped with a warning.
///
/// # Errors
///
/// Returns [`ScraperError::MissingElement`] if the shop sidebar is absent.
pub fn parse_directory(markup: &str, base_url: &str) -> Result<Vec<FetchTarget>, ScraperError> {
    let document = Html::parse_document(markup);
    let sidebar = require(
        document.root_element(),
        &SIDEBAR,
        SIDEBAR_CSS,
        "shop directory page",
    )?;

    let mut targets = Vec::new();
    for anchor in sidebar.select(&SHOP_LINK) {
        let id = text_of(anchor);
        let Some(href) = anchor.value().attr("href") else {
            tracing::warn!(shop = %id, "shop link has no href; skipping");
            continue;
        };
        match resolve_url(base_url, href) {
            Ok(url) => targets.push(FetchTarget { id, url }),
            Err(err) => tracing::warn!(shop = %id, error = %err, "skipping unresolvable shop link"),
        }
    }
    Ok(targets)
}

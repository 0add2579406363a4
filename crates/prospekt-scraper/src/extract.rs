//! Brochure record extraction from a shop page.
//!
//! Shop pages list brochures in a `div.letaky-grid`. Each brochure has a
//! `div.letak-description` fragment holding the validity text, title, and
//! link; the thumbnail lives in the tile two levels up, usually as a
//! lazy-loaded `img[data-src]`.
//!
//! A fragment missing any of these parts is skipped with a warning. Its
//! siblings are still extracted.

use std::sync::LazyLock;

use chrono::{Local, NaiveDateTime};
use scraper::{ElementRef, Html, Selector};

use prospekt_core::BrochureRecord;

use crate::error::ScraperError;
use crate::html::{ancestor, require, resolve_url, text_of};
use crate::validity::evaluate;

const GRID_CSS: &str = "div.letaky-grid";
const DESCRIPTION_CSS: &str = "div.letak-description";
const VALIDITY_CSS: &str = "small.hidden-sm";
const TITLE_CSS: &str = "strong";
const LINK_CSS: &str = "a[href]";
const THUMBNAIL_CSS: &str = "img[src], img[data-src]";

/// Levels between a description fragment and the tile holding its thumbnail.
const TILE_DEPTH: usize = 2;

static GRID: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(GRID_CSS).expect("valid grid selector"));
static DESCRIPTION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(DESCRIPTION_CSS).expect("valid description selector"));
static VALIDITY: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(VALIDITY_CSS).expect("valid validity selector"));
static TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(TITLE_CSS).expect("valid title selector"));
static LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(LINK_CSS).expect("valid link selector"));
static THUMBNAIL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(THUMBNAIL_CSS).expect("valid thumbnail selector"));

/// Extracts every currently valid brochure from `page_markup`, evaluating
/// validity against the local wall clock.
#[must_use]
pub fn extract(page_markup: &str, shop_name: &str, base_url: &str) -> Vec<BrochureRecord> {
    extract_at(page_markup, shop_name, base_url, Local::now().naive_local())
}

/// Same as [`extract`] with an explicit evaluation instant.
#[must_use]
pub fn extract_at(
    page_markup: &str,
    shop_name: &str,
    base_url: &str,
    now: NaiveDateTime,
) -> Vec<BrochureRecord> {
    let document = Html::parse_document(page_markup);
    let Some(grid) = document.select(&GRID).next() else {
        tracing::warn!(shop = shop_name, "shop page has no brochure grid");
        return Vec::new();
    };

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for (position, fragment) in grid.select(&DESCRIPTION).enumerate() {
        match extract_fragment(fragment, shop_name, base_url, now) {
            Ok(Some(record)) => records.push(record),
            Ok(None) => {}
            Err(err) => {
                skipped += 1;
                tracing::warn!(
                    shop = shop_name,
                    position,
                    error = %err,
                    "skipping malformed brochure fragment"
                );
            }
        }
    }

    tracing::debug!(
        shop = shop_name,
        records = records.len(),
        skipped,
        "extracted brochures"
    );
    records
}

/// Returns `Ok(None)` when the brochure is expired, not yet started, or has
/// no parsable validity text.
fn extract_fragment(
    fragment: ElementRef<'_>,
    shop_name: &str,
    base_url: &str,
    now: NaiveDateTime,
) -> Result<Option<BrochureRecord>, ScraperError> {
    let context = format!("brochure fragment of {shop_name}");

    let validity_text = text_of(require(fragment, &VALIDITY, VALIDITY_CSS, &context)?);
    let (is_valid, window) = evaluate(&validity_text, now);
    let Some(window) = window.filter(|_| is_valid) else {
        return Ok(None);
    };

    let title = text_of(require(fragment, &TITLE, TITLE_CSS, &context)?);

    let href = require(fragment, &LINK, LINK_CSS, &context)?
        .value()
        .attr("href")
        .unwrap_or_default();
    let link = resolve_url(base_url, href)?;

    let thumbnail = find_thumbnail(fragment).ok_or_else(|| ScraperError::MissingElement {
        selector: THUMBNAIL_CSS,
        context: context.clone(),
    })?;

    Ok(Some(BrochureRecord::new(
        title,
        shop_name.to_owned(),
        link,
        thumbnail,
        &window,
    )))
}

/// First image in the fragment's tile, preferring `src` over the lazy-load
/// `data-src` attribute.
fn find_thumbnail(fragment: ElementRef<'_>) -> Option<String> {
    let tile = ancestor(fragment, TILE_DEPTH)?;
    let img = tile.select(&THUMBNAIL).next()?;
    let attrs = img.value();
    attrs
        .attr("src")
        .or_else(|| attrs.attr("data-src"))
        .map(str::to_owned)
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;

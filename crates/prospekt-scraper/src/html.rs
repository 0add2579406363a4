//! Small DOM helpers shared by discovery and record extraction.

use scraper::{ElementRef, Selector};
use url::Url;

use crate::error::ScraperError;

/// First descendant of `element` matching `selector`, or a
/// [`ScraperError::MissingElement`] naming `css` and `context`.
pub(crate) fn require<'a>(
    element: ElementRef<'a>,
    selector: &Selector,
    css: &'static str,
    context: &str,
) -> Result<ElementRef<'a>, ScraperError> {
    element
        .select(selector)
        .next()
        .ok_or_else(|| ScraperError::MissingElement {
            selector: css,
            context: context.to_owned(),
        })
}

/// Concatenated, whitespace-trimmed text content of `element`.
pub(crate) fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_owned()
}

/// Walks `levels` element ancestors up from `element`.
pub(crate) fn ancestor(element: ElementRef<'_>, levels: usize) -> Option<ElementRef<'_>> {
    let mut current = element;
    for _ in 0..levels {
        current = current.parent().and_then(ElementRef::wrap)?;
    }
    Some(current)
}

/// Resolves `href` under `base_url`, keeping any path prefix of the base:
/// `("https://host/de", "/kaufland/")` gives `https://host/de/kaufland/`.
/// Absolute and scheme-relative `href`s are resolved as usual.
pub(crate) fn resolve_url(base_url: &str, href: &str) -> Result<String, ScraperError> {
    let mut base = Url::parse(base_url).map_err(|e| ScraperError::InvalidUrl {
        url: base_url.to_owned(),
        reason: e.to_string(),
    })?;
    if !base.path().ends_with('/') {
        let dir = format!("{}/", base.path());
        base.set_path(&dir);
    }

    let href = href.trim();
    let relative = if href.starts_with("//") {
        href
    } else {
        href.trim_start_matches('/')
    };
    base.join(relative)
        .map(String::from)
        .map_err(|e| ScraperError::InvalidUrl {
            url: href.to_owned(),
            reason: e.to_string(),
        })
}

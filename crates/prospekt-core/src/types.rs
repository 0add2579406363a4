use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Format used for [`BrochureRecord::parsed_time`] and log output.
pub const PARSED_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One discovered per-shop page to retrieve.
///
/// The position of a target in its list is the index that the matching
/// [`FetchResult::target_index`] refers back to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTarget {
    /// Display name of the shop, taken from the directory link text.
    pub id: String,
    /// Absolute URL of the shop page.
    pub url: String,
}

/// Outcome of fetching one [`FetchTarget`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult {
    pub target_index: usize,
    /// Response body, or `None` once every attempt has failed.
    pub content: Option<Vec<u8>>,
    /// Number of network attempts made for this target.
    pub attempts: u32,
}

impl FetchResult {
    #[must_use]
    pub fn is_absent(&self) -> bool {
        self.content.is_none()
    }
}

/// Validity window parsed from a brochure's free-text date span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidityWindow {
    pub valid_from: NaiveDate,
    /// `None` for open-ended brochures that only state a start date.
    pub valid_to: Option<NaiveDate>,
    pub evaluated_at: NaiveDateTime,
    pub is_valid: bool,
}

/// A currently valid brochure extracted from a shop page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrochureRecord {
    pub title: String,
    pub shop_name: String,
    /// Absolute URL of the brochure page.
    pub link: String,
    /// Thumbnail URL exactly as it appears in the markup.
    pub thumbnail: String,
    pub valid_from: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_to: Option<NaiveDate>,
    /// Evaluation instant, formatted with [`PARSED_TIME_FORMAT`].
    pub parsed_time: String,
}

impl BrochureRecord {
    /// Assembles a record from its extracted parts and the validity window
    /// that admitted it.
    #[must_use]
    pub fn new(
        title: String,
        shop_name: String,
        link: String,
        thumbnail: String,
        window: &ValidityWindow,
    ) -> Self {
        Self {
            title,
            shop_name,
            link,
            thumbnail,
            valid_from: window.valid_from,
            valid_to: window.valid_to,
            parsed_time: window.evaluated_at.format(PARSED_TIME_FORMAT).to_string(),
        }
    }
}

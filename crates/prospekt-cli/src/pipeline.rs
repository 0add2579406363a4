//! End-to-end crawl: discover shops, fetch their pages, extract brochures,
//! and write the output document.

use std::path::Path;

use anyhow::Context;

use prospekt_core::{AppConfig, BrochureRecord, OrchestratorConfig};
use prospekt_scraper::{extract, HttpFetcher, Orchestrator, PageFetcher, ScraperError};

use crate::output;

/// Counts reported at the end of a run.
#[derive(Debug, Default)]
pub(crate) struct RunSummary {
    pub shops: usize,
    pub fetched: usize,
    /// Shops whose page could not be fetched.
    pub skipped: Vec<String>,
    pub records: usize,
}

/// Discovers every shop under `base_url`, fetches the shop pages, and
/// extracts the currently valid brochures in directory order.
///
/// # Errors
///
/// Returns an error only when discovery fails. Per-shop failures are logged
/// and listed in [`RunSummary::skipped`].
pub(crate) async fn collect_brochures<F: PageFetcher>(
    orchestrator: &Orchestrator<F>,
    base_url: &str,
) -> Result<(Vec<BrochureRecord>, RunSummary), ScraperError> {
    let targets = orchestrator.discover(base_url).await?;
    let results = orchestrator.fetch_all(&targets).await;

    let mut summary = RunSummary {
        shops: targets.len(),
        ..RunSummary::default()
    };
    let mut records = Vec::new();
    for (target, result) in targets.iter().zip(&results) {
        let Some(body) = result.content.as_deref() else {
            tracing::warn!(shop = %target.id, attempts = result.attempts, "skipping shop");
            summary.skipped.push(target.id.clone());
            continue;
        };
        summary.fetched += 1;

        let markup = String::from_utf8_lossy(body);
        let shop_records = extract(&markup, &target.id, base_url);
        tracing::debug!(shop = %target.id, records = shop_records.len(), "extracted brochures");
        records.extend(shop_records);
    }
    summary.records = records.len();

    tracing::info!(
        shops = summary.shops,
        fetched = summary.fetched,
        skipped = summary.skipped.len(),
        records = summary.records,
        "crawl complete"
    );
    Ok((records, summary))
}

/// Runs a full crawl over HTTP and writes the records to `output_path`.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built, discovery fails, or
/// the output file cannot be written.
pub(crate) async fn run(
    config: &AppConfig,
    fetch_config: OrchestratorConfig,
    output_path: &Path,
) -> anyhow::Result<RunSummary> {
    let fetcher = HttpFetcher::new(
        fetch_config.timeout(),
        config.connect_timeout_secs,
        &config.user_agent,
    )
    .context("building HTTP client")?;
    let orchestrator = Orchestrator::new(fetcher, fetch_config);

    let (records, summary) = collect_brochures(&orchestrator, &config.base_url)
        .await
        .with_context(|| format!("discovering shops under {}", config.base_url))?;

    output::write_records(output_path, &records)?;
    Ok(summary)
}

pub mod client;
pub mod discovery;
pub mod error;
pub mod extract;
mod html;
pub mod orchestrator;
mod retry;
pub mod validity;

pub use client::{fetch_with_deadline, HttpFetcher, PageFetcher};
pub use discovery::{discover, parse_directory, DIRECTORY_PATH};
pub use error::ScraperError;
pub use extract::{extract, extract_at};
pub use orchestrator::Orchestrator;
pub use validity::evaluate;

//! Page fetching and HTML text extraction for the scrape stage.

mod extract;
mod fetch;

pub use extract::extract_text;
pub use fetch::{Fetcher, ScrapeSummary};

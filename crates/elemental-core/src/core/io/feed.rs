use super::traits::RawDataSource;
use crate::core::models::raw::{RawElement, RawFeed};
use std::io::{self, Read};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid feed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// The external JSON feed: a document of the form `{ "elements": [ ... ] }`.
pub struct JsonFeed;

impl RawDataSource for JsonFeed {
    type Error = FeedError;

    fn read_from(reader: &mut impl Read) -> Result<Vec<RawElement>, Self::Error> {
        let feed: RawFeed = serde_json::from_reader(reader)?;
        Ok(feed.elements)
    }
}

use thiserror::Error;

use super::config::ConfigError;
use super::rules::RuleLoadError;
use super::transaction::TransactionError;
use crate::core::io::feed::FeedError;
use crate::core::models::element::DatasetError;
use crate::core::patch::request::RequestError;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Failed to read element feed: {source}")]
    Feed {
        #[from]
        source: FeedError,
    },

    #[error("Failed to load rule set: {source}")]
    Rules {
        #[from]
        source: RuleLoadError,
    },

    #[error("Assembled dataset is invalid: {source}")]
    Dataset {
        #[from]
        source: DatasetError,
    },

    #[error("Failed to load patch request: {source}")]
    Request {
        #[from]
        source: RequestError,
    },

    #[error("Artifact update failed: {source}")]
    Transaction {
        #[from]
        source: TransactionError,
    },

    #[error("Failed to write artifact '{path}': {source}")]
    Emit {
        path: String,
        source: std::io::Error,
    },

    #[error("{failed} of {total} record patches could not be applied")]
    PatchFailures { failed: usize, total: usize },

    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },
}

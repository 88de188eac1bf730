mod entry;
mod store;

use thiserror::Error;

pub use entry::HistoryEntry;
pub use store::HistoryStore;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HistoryError {
    #[error("no history entry matches {0}")]
    NotFound(String),
    #[error("history id {0} matches more than one entry")]
    Ambiguous(String),
}

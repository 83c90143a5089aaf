//! Result and lead persistence.
//!
//! A result is written once as finalized and never changes afterwards.
//! Drafts may be overwritten any number of times until finalization.

mod json_store;
mod memory;
pub mod records;

pub use json_store::JsonFileResultStore;
pub use memory::MemoryResultStore;
pub use records::{FinalizeOutcome, ResultRecord, ResultSnapshot};

use crate::core::Result;
use crate::leads::LeadRecord;

/// Storage for computed quiz results.
pub trait ResultStore: Send + Sync {
    /// Write `snapshot` as the final result for `id`.
    ///
    /// Creates the record if absent, upgrades a draft, and does nothing if
    /// the record is already finalized. Concurrent calls for one id produce
    /// at most one `created` outcome.
    fn finalize(&self, id: &str, snapshot: &ResultSnapshot) -> Result<FinalizeOutcome>;

    /// Store a non-final result. Returns `false` if the id is already
    /// finalized and nothing was written.
    fn save_draft(&self, id: &str, snapshot: &ResultSnapshot) -> Result<bool>;

    fn get(&self, id: &str) -> Result<Option<ResultRecord>>;
}

/// Append-only storage for leads.
pub trait LeadStore: Send + Sync {
    fn record_lead(&self, lead: &LeadRecord) -> Result<()>;

    fn leads(&self) -> Result<Vec<LeadRecord>>;
}

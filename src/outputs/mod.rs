//! Output generation for formatted stories and run diagnostics.
//!
//! # Submodules
//!
//! - [`json`]: Persists formatted stories as keyed JSON records
//! - [`tally`]: Writes the per-source story counts
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! └── 200304.json      # Formatted stories for process date 2020-03-04
//!
//! source_counts.tsv    # Optional, wherever --source-counts points
//! ```

use crate::models::FormattedStoryRecord;
use std::error::Error;

pub mod json;
pub mod tally;

/// Durable storage for formatted stories.
///
/// Implementors store each record's `content`, `date` and `source` and hand
/// back the identifier they stored it under, in input order. The whole batch
/// is stored at once after formatting finishes.
pub trait StorySink {
    async fn store_all(
        &self,
        records: &[FormattedStoryRecord],
    ) -> Result<Vec<String>, Box<dyn Error>>;
}

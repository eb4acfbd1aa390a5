//! Export of per-source story counts.
//!
//! A diagnostic side artifact: one `source\tcount` line per outlet, sorted
//! by source, so feed outages show up as a missing or shrunken line.

use crate::models::SourceTally;
use std::error::Error;
use tokio::fs;
use tracing::{info, instrument};

/// Write `tally` as tab-separated lines to `path`.
#[instrument(level = "info", skip_all, fields(%path))]
pub async fn write_source_counts(tally: &SourceTally, path: &str) -> Result<(), Box<dyn Error>> {
    fs::write(path, tally.to_string()).await?;
    info!(sources = tally.iter().count(), stories = tally.total(), "Wrote source counts");
    Ok(())
}

//! # Story Formatter
//!
//! Turns raw scraped news stories into input for an event coder: clean,
//! sentence-segmented prose plus a single `YYMMDD` event date per story.
//!
//! ## Architecture
//!
//! The formatting pipeline is built leaf-first:
//! 1. **Trimming** ([`trimmer`]): strip wire-service datelines such as `(Reuters)`
//! 2. **Segmentation** ([`segmenter`]): heuristic sentence boundaries within a length window
//! 3. **Dating** ([`dates`]): feed metadata, then in-text dates, then ingestion time
//! 4. **Driving** ([`pipeline`]): quote filtering, joining and per-source tallies
//!
//! Reading scraper exports ([`ingest`]) and persisting results ([`outputs`])
//! sit at the edges.

pub mod cli;
pub mod config;
pub mod dates;
pub mod ingest;
pub mod models;
pub mod outputs;
pub mod pipeline;
pub mod segmenter;
pub mod trimmer;
pub mod utils;

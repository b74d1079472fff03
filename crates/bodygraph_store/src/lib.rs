//! Persistence and sharing for computed charts.
//!
//! This crate provides:
//! - `ChartStore`, a JSON file of saved charts kept newest first and capped
//! - JSON export with a stable file-name scheme
//! - Share strings and share URLs carrying a compact chart summary
//!
//! Charts loaded from the store are re-derived from their activations;
//! shared summaries recompute channels and centers on demand.

pub mod error;
pub mod export;
pub mod share;
pub mod store;

pub use error::StoreError;
pub use export::{export_file_name, export_json, export_to_dir};
pub use share::{
    Bodygraph, CHART_PARAM, MAX_PAYLOAD_BYTES, SharedChart, SharedGate, chart_param, decode_share,
    decode_share_url, encode_share, encode_shared, share_url,
};
pub use store::{ChartStore, DEFAULT_CHART_NAME, SavedChart, StoreConfig, chart_name};

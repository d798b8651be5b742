//! metagenome-local - In-memory MetagenomeAPI implementation.
//!
//! Serves bin and contig searches and assembly fetches from objects held in
//! memory, with the same paging and query semantics as the remote service.

mod api;
mod config;
mod search;
mod store;

pub use api::LocalMetagenomeApi;
pub use config::{DEFAULT_LIMIT, LocalConfig};
pub use store::{BinnedContigs, ContigStats, StoredBin};

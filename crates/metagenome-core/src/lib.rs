//! metagenome-core - Record types and codec for the MetagenomeAPI service.
//!
//! Every object exchanged with the service is an open-schema record: a fixed
//! set of typed fields plus an extras bag holding any other keys, which
//! survive a decode → mutate → encode cycle unchanged.
//!
//! # Example
//!
//! ```
//! use metagenome_core::{BinSummary, Record, decode, encode};
//! use serde_json::json;
//!
//! let mut bin: BinSummary = decode(json!({
//!     "bin_id": "b1",
//!     "n_contigs": 3,
//!     "extra_tag": "x"
//! }))
//! .unwrap();
//!
//! bin.set_gc(0.42_f64);
//! assert_eq!(bin.extra("extra_tag"), Some(&json!("x")));
//! assert_eq!(
//!     encode(&bin).to_string(),
//!     r#"{"bin_id":"b1","n_contigs":3,"gc":0.42,"extra_tag":"x"}"#
//! );
//! ```

#[macro_use]
mod macros;

pub mod codec;
pub mod error;
pub mod schema;
pub mod traits;
pub mod types;

pub use codec::{Extras, FieldType, Record, decode, decode_str, encode, encode_string, validate};
pub use error::{CodecError, Error, InvalidInputError, ServiceError};
pub use schema::{FieldDescriptor, Schema, ValueKind};
pub use traits::MetagenomeApi;
pub use types::{
    AssemblyFetchParams, AssemblyFetchResult, BinSearchOptions, BinSearchResult, BinSummary,
    ColumnSorting, ContigSearchOptions, ContigSearchResult, ContigSummary, Page,
};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;

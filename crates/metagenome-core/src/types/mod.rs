//! MetagenomeAPI record types.
//!
//! Every type here is an open-schema record: its declared fields are typed,
//! and any other key is kept in an extras bag and written back unchanged.

mod assembly;
mod bins;
mod contigs;
mod page;
mod search;

pub use assembly::{ASSEMBLY_FETCH_PARAMS, ASSEMBLY_FETCH_RESULT, AssemblyFetchParams, AssemblyFetchResult};
pub use bins::{BIN_SEARCH_RESULT, BIN_SUMMARY, BinSearchResult, BinSummary};
pub use contigs::{CONTIG_SEARCH_RESULT, CONTIG_SUMMARY, ContigSearchResult, ContigSummary};
pub use page::Page;
pub use search::{
    BIN_SEARCH_OPTIONS, BIN_SORT_COLUMNS, BinSearchOptions, CONTIG_SEARCH_OPTIONS,
    CONTIG_SORT_COLUMNS, ColumnSorting, ContigSearchOptions,
};

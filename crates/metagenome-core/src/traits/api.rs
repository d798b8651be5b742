//! MetagenomeAPI service trait.

use async_trait::async_trait;

use crate::Result;
use crate::types::{
    AssemblyFetchParams, AssemblyFetchResult, BinSearchOptions, BinSearchResult,
    ContigSearchOptions, ContigSearchResult,
};

/// The operations of a MetagenomeAPI service.
///
/// Implementations own transport, reference resolution and authentication;
/// errors they report ([`ServiceError`](crate::error::ServiceError)) are
/// passed through unchanged.
#[async_trait]
pub trait MetagenomeApi: Send + Sync {
    /// Fetch an annotated metagenome assembly object.
    ///
    /// `params.ref` identifies the object; `included_fields` restricts which
    /// fields of its data are populated.
    async fn fetch_annotated_assembly(
        &self,
        params: &AssemblyFetchParams,
    ) -> Result<AssemblyFetchResult>;

    /// Search the bins of a binned-contigs object.
    ///
    /// Returns at most one page of bins, starting at `start`, with
    /// `num_found` set to the size of the whole result set.
    async fn search_binned_contigs(&self, options: &BinSearchOptions) -> Result<BinSearchResult>;

    /// Search the contigs of a single bin, with the same paging contract as
    /// [`MetagenomeApi::search_binned_contigs`].
    async fn search_contigs_in_bin(
        &self,
        options: &ContigSearchOptions,
    ) -> Result<ContigSearchResult>;

    /// Convenience: search bins by query text and offset.
    async fn search_bins(
        &self,
        reference: &str,
        query: &str,
        start: i64,
    ) -> Result<BinSearchResult> {
        let options = BinSearchOptions::for_ref(reference)
            .with_query(query)
            .with_start(start);
        self.search_binned_contigs(&options).await
    }

    /// Convenience: search the contigs of `bin_id` by query text and offset.
    async fn search_bin_contigs(
        &self,
        reference: &str,
        bin_id: &str,
        query: &str,
        start: i64,
    ) -> Result<ContigSearchResult> {
        let options = ContigSearchOptions::for_bin(reference, bin_id)
            .with_query(query)
            .with_start(start);
        self.search_contigs_in_bin(&options).await
    }
}

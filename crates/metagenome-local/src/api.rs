//! In-memory implementation of [`MetagenomeApi`].

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use metagenome_core::error::{CodecError, InvalidInputError};
use metagenome_core::types::{BIN_SORT_COLUMNS, CONTIG_SORT_COLUMNS};
use metagenome_core::{
    AssemblyFetchParams, AssemblyFetchResult, BinSearchOptions, BinSearchResult,
    ContigSearchOptions, ContigSearchResult, MetagenomeApi, Result,
};

use crate::config::LocalConfig;
use crate::search::{self, PageRequest, query_words, sort_keys};
use crate::store::{BinnedContigs, MemoryStore};

/// A MetagenomeAPI service answering from memory.
///
/// Clones share the same store.
#[derive(Debug, Clone, Default)]
pub struct LocalMetagenomeApi {
    config: LocalConfig,
    store: Arc<RwLock<MemoryStore>>,
}

impl LocalMetagenomeApi {
    /// Create an empty service.
    pub fn new(config: LocalConfig) -> Self {
        Self {
            config,
            store: Arc::default(),
        }
    }

    /// Returns the service configuration.
    pub fn config(&self) -> &LocalConfig {
        &self.config
    }

    /// Index a binned-contigs object under `reference`, replacing any
    /// previous object with that reference.
    pub async fn insert_binned_contigs(
        &self,
        reference: &str,
        object: &BinnedContigs,
    ) -> Result<()> {
        self.store.write().await.put_binned_contigs(reference, object)
    }

    /// Index a binned-contigs object given as raw workspace JSON.
    pub async fn insert_binned_contigs_json(&self, reference: &str, object: Value) -> Result<()> {
        let object: BinnedContigs = serde_json::from_value(object).map_err(CodecError::from)?;
        self.insert_binned_contigs(reference, &object).await
    }

    /// Store an assembly object under `reference`.
    ///
    /// The object is returned as-is by fetches; its `data` member, if an
    /// object, is what `included_fields` filters.
    pub async fn insert_assembly(&self, reference: &str, object: Value) {
        self.store.write().await.put_assembly(reference, object);
    }

    fn page_request(
        &self,
        start: Option<&i64>,
        limit: Option<&i64>,
        num_found: Option<&i64>,
    ) -> Result<PageRequest> {
        let start = start.copied().unwrap_or(0);
        let limit = self.config.page_limit(limit.copied());

        if start < 0 {
            return Err(invalid(format!("start must not be negative, got {}", start)));
        }
        if limit < 0 {
            return Err(invalid(format!("limit must not be negative, got {}", limit)));
        }

        Ok(PageRequest {
            start,
            limit,
            known_total: num_found.copied(),
        })
    }
}

fn required<'a>(value: Option<&'a String>, name: &str) -> Result<&'a str> {
    value
        .map(String::as_str)
        .ok_or_else(|| invalid(format!("parameter '{}' is required", name)))
}

fn invalid(message: String) -> metagenome_core::Error {
    InvalidInputError::Other { message }.into()
}

#[async_trait]
impl MetagenomeApi for LocalMetagenomeApi {
    #[instrument(skip(self, params), fields(reference = ?params.reference()))]
    async fn fetch_annotated_assembly(
        &self,
        params: &AssemblyFetchParams,
    ) -> Result<AssemblyFetchResult> {
        let reference = required(params.reference(), "ref")?;
        debug!(reference, "fetching annotated assembly");

        let mut object = self.store.read().await.assembly(reference)?.clone();

        if let Some(included) = params.included_fields() {
            if let Some(data) = object.get_mut("data").and_then(Value::as_object_mut) {
                data.retain(|key, _| included.iter().any(|field| field == key));
            }
        }

        Ok(AssemblyFetchResult::new().with_genomes(vec![object]))
    }

    #[instrument(
        skip(self, options),
        fields(
            reference = ?options.reference(),
            query = ?options.query(),
            start = ?options.start(),
            limit = ?options.limit()
        )
    )]
    async fn search_binned_contigs(&self, options: &BinSearchOptions) -> Result<BinSearchResult> {
        let reference = required(options.reference(), "ref")?;
        let query = options.query().map(String::as_str).unwrap_or_default();
        let page = self.page_request(options.start(), options.limit(), options.num_found())?;
        let keys = sort_keys(options.sort_by().map(Vec::as_slice), BIN_SORT_COLUMNS)?;

        debug!(
            reference,
            query,
            start = page.start,
            limit = page.limit,
            "searching bins"
        );

        let store = self.store.read().await;
        let index = store.binned_contigs(reference)?;
        let (bins, num_found) = search::run(&index.bins, &query_words(query), &keys, page);

        Ok(BinSearchResult::new()
            .with_query(query)
            .with_start(page.start)
            .with_bins(bins)
            .with_num_found(num_found))
    }

    #[instrument(
        skip(self, options),
        fields(
            reference = ?options.reference(),
            bin_id = ?options.bin_id(),
            query = ?options.query(),
            start = ?options.start(),
            limit = ?options.limit()
        )
    )]
    async fn search_contigs_in_bin(
        &self,
        options: &ContigSearchOptions,
    ) -> Result<ContigSearchResult> {
        let reference = required(options.reference(), "ref")?;
        let bin_id = required(options.bin_id(), "bin_id")?;
        let query = options.query().map(String::as_str).unwrap_or_default();
        let page = self.page_request(options.start(), options.limit(), options.num_found())?;
        let keys = sort_keys(options.sort_by().map(Vec::as_slice), CONTIG_SORT_COLUMNS)?;

        debug!(
            reference,
            bin_id,
            query,
            start = page.start,
            limit = page.limit,
            "searching contigs in bin"
        );

        let store = self.store.read().await;
        let rows = store.binned_contigs(reference)?.contigs(bin_id)?;
        let (contigs, num_found) = search::run(rows, &query_words(query), &keys, page);

        Ok(ContigSearchResult::new()
            .with_query(query)
            .with_bin_id(bin_id)
            .with_start(page.start)
            .with_contigs(contigs)
            .with_num_found(num_found))
    }
}

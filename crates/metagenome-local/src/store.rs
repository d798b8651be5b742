//! In-memory storage for the local MetagenomeAPI.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use metagenome_core::error::{InvalidInputError, ServiceError};
use metagenome_core::{BinSummary, ContigSummary, Result};

use crate::search::{Cell, Row};

/// Per-contig statistics inside a bin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContigStats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub len: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gc: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cov: Option<f64>,
}

/// One bin of a binned-contigs object, as stored in the workspace.
///
/// Contigs are keyed by contig id and keep their stored order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredBin {
    pub bid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n_contigs: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gc: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sum_contig_len: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cov: Option<f64>,
    #[serde(default)]
    pub contigs: Map<String, Value>,
}

/// A binned-contigs object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BinnedContigs {
    #[serde(default)]
    pub bins: Vec<StoredBin>,
}

impl StoredBin {
    fn summary(&self) -> BinSummary {
        let mut bin = BinSummary::new().with_bin_id(self.bid.clone());
        bin.set_n_contigs(self.n_contigs);
        bin.set_gc(self.gc);
        bin.set_sum_contig_len(self.sum_contig_len);
        bin.set_cov(self.cov);
        bin
    }

    /// Index row with columns `bin_id, n_contigs, sum_contig_len, gc, cov`.
    fn row(&self) -> Row<BinSummary> {
        Row::new(
            self.summary(),
            vec![
                Cell::text(&self.bid),
                Cell::number(self.n_contigs.map(Value::from)),
                Cell::number(self.sum_contig_len.map(Value::from)),
                Cell::number(self.gc.map(Value::from)),
                Cell::number(self.cov.map(Value::from)),
            ],
        )
    }

    /// Index rows with columns `id, len, gc, cov`, in stored order.
    fn contig_rows(&self) -> Result<Vec<Row<ContigSummary>>> {
        self.contigs
            .iter()
            .map(|(contig_id, stats)| -> Result<Row<ContigSummary>> {
                let stats: ContigStats =
                    serde_json::from_value(stats.clone()).map_err(|e| InvalidInputError::Other {
                        message: format!("bin '{}', contig '{}': {}", self.bid, contig_id, e),
                    })?;

                let mut contig = ContigSummary::new().with_contig_id(contig_id.clone());
                contig.set_len(stats.len);
                contig.set_gc(stats.gc);
                contig.set_cov(stats.cov);

                Ok(Row::new(
                    contig,
                    vec![
                        Cell::text(contig_id),
                        Cell::number(stats.len.map(Value::from)),
                        Cell::number(stats.gc.map(Value::from)),
                        Cell::number(stats.cov.map(Value::from)),
                    ],
                ))
            })
            .collect()
    }
}

/// Indexed view of one binned-contigs object.
#[derive(Debug, Clone)]
pub(crate) struct BinIndex {
    pub(crate) bins: Vec<Row<BinSummary>>,
    contigs: HashMap<String, Vec<Row<ContigSummary>>>,
}

impl BinIndex {
    fn build(object: &BinnedContigs) -> Result<Self> {
        let mut contigs = HashMap::with_capacity(object.bins.len());
        for bin in &object.bins {
            contigs.insert(bin.bid.clone(), bin.contig_rows()?);
        }

        Ok(Self {
            bins: object.bins.iter().map(StoredBin::row).collect(),
            contigs,
        })
    }

    pub(crate) fn contigs(&self, bin_id: &str) -> Result<&[Row<ContigSummary>]> {
        self.contigs
            .get(bin_id)
            .map(Vec::as_slice)
            .ok_or_else(|| {
                ServiceError::NotFound {
                    what: "bin",
                    id: bin_id.to_string(),
                }
                .into()
            })
    }
}

/// Objects held by the local service, keyed by reference.
#[derive(Debug, Default)]
pub(crate) struct MemoryStore {
    binned_contigs: HashMap<String, BinIndex>,
    assemblies: HashMap<String, Value>,
}

impl MemoryStore {
    pub(crate) fn put_binned_contigs(
        &mut self,
        reference: &str,
        object: &BinnedContigs,
    ) -> Result<()> {
        let index = BinIndex::build(object)?;
        debug!(reference, bins = index.bins.len(), "indexed binned contigs");
        self.binned_contigs.insert(reference.to_string(), index);
        Ok(())
    }

    pub(crate) fn put_assembly(&mut self, reference: &str, object: Value) {
        self.assemblies.insert(reference.to_string(), object);
    }

    pub(crate) fn binned_contigs(&self, reference: &str) -> Result<&BinIndex> {
        self.binned_contigs
            .get(reference)
            .ok_or_else(|| unknown_ref(reference))
    }

    pub(crate) fn assembly(&self, reference: &str) -> Result<&Value> {
        self.assemblies
            .get(reference)
            .ok_or_else(|| unknown_ref(reference))
    }
}

fn unknown_ref(reference: &str) -> metagenome_core::Error {
    ServiceError::UnknownRef {
        reference: reference.to_string(),
    }
    .into()
}

//! Contig records.

use crate::schema::{FieldDescriptor, ValueKind};

open_record! {
    /// Summary of one contig inside a bin.
    pub struct ContigSummary in CONTIG_SUMMARY as "ContigSummary" {
        /// Identifier of the contig.
        contig_id / set_contig_id / with_contig_id: String
            => FieldDescriptor::new("contig_id", ValueKind::String),
        /// Length of the contig, in bp.
        len / set_len / with_len: i64
            => FieldDescriptor::new("len", ValueKind::Integer),
        /// GC content over the contig.
        gc / set_gc / with_gc: f64
            => FieldDescriptor::new("gc", ValueKind::Float),
        /// Coverage over the contig.
        cov / set_cov / with_cov: f64
            => FieldDescriptor::new("cov", ValueKind::Float).nullable(),
    }
}

open_record! {
    /// One page of contigs from a single bin.
    pub struct ContigSearchResult in CONTIG_SEARCH_RESULT as "ContigSearchResult" {
        query / set_query / with_query: String
            => FieldDescriptor::new("query", ValueKind::String),
        /// The bin the contigs were searched in.
        bin_id / set_bin_id / with_bin_id: String
            => FieldDescriptor::new("bin_id", ValueKind::String),
        start / set_start / with_start: i64
            => FieldDescriptor::new("start", ValueKind::Integer),
        contigs / set_contigs / with_contigs: Vec<ContigSummary>
            => FieldDescriptor::new(
                "contigs",
                ValueKind::List(&ValueKind::Nested(&CONTIG_SUMMARY)),
            ),
        num_found / set_num_found / with_num_found: i64
            => FieldDescriptor::new("num_found", ValueKind::Integer),
    }
}

impl ContigSearchResult {
    /// Mutable access to the contigs of this page.
    pub fn contigs_mut(&mut self) -> &mut Vec<ContigSummary> {
        self.contigs.get_or_insert_with(Vec::new)
    }
}

//! Bin records.

use crate::schema::{FieldDescriptor, ValueKind};

open_record! {
    /// Summary of one bin in a binned-contigs object.
    ///
    /// `cov` is only present when coverage was computed for the bin.
    pub struct BinSummary in BIN_SUMMARY as "BinSummary" {
        /// Identifier of the bin.
        bin_id / set_bin_id / with_bin_id: String
            => FieldDescriptor::new("bin_id", ValueKind::String),
        /// Number of contigs in this bin.
        n_contigs / set_n_contigs / with_n_contigs: i64
            => FieldDescriptor::new("n_contigs", ValueKind::Integer),
        /// GC content over all the contigs.
        gc / set_gc / with_gc: f64
            => FieldDescriptor::new("gc", ValueKind::Float),
        /// Total length of the contigs, in bp.
        sum_contig_len / set_sum_contig_len / with_sum_contig_len: i64
            => FieldDescriptor::new("sum_contig_len", ValueKind::Integer),
        /// Coverage over the bin.
        cov / set_cov / with_cov: f64
            => FieldDescriptor::new("cov", ValueKind::Float).nullable(),
    }
}

open_record! {
    /// One page of a bin search.
    ///
    /// `num_found` counts every match, of which only the page starting at
    /// `start` is returned in `bins`.
    pub struct BinSearchResult in BIN_SEARCH_RESULT as "BinSearchResult" {
        /// The query the page was produced for.
        query / set_query / with_query: String
            => FieldDescriptor::new("query", ValueKind::String),
        /// Zero-based offset of the first bin in this page.
        start / set_start / with_start: i64
            => FieldDescriptor::new("start", ValueKind::Integer),
        /// The bins of this page, in result order.
        bins / set_bins / with_bins: Vec<BinSummary>
            => FieldDescriptor::new("bins", ValueKind::List(&ValueKind::Nested(&BIN_SUMMARY))),
        /// Total number of matching bins.
        num_found / set_num_found / with_num_found: i64
            => FieldDescriptor::new("num_found", ValueKind::Integer),
    }
}

impl BinSearchResult {
    /// Mutable access to the bins of this page.
    pub fn bins_mut(&mut self) -> &mut Vec<BinSummary> {
        self.bins.get_or_insert_with(Vec::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{Record, decode, encode};
    use crate::error::CodecError;
    use serde_json::json;

    #[test]
    fn decode_known_fields() {
        let bin: BinSummary = decode(json!({
            "bin_id": "out_header.001.fasta",
            "n_contigs": 12,
            "gc": 0.51,
            "sum_contig_len": 40231,
            "cov": 17.5
        }))
        .unwrap();

        assert_eq!(bin.bin_id().map(String::as_str), Some("out_header.001.fasta"));
        assert_eq!(bin.n_contigs(), Some(&12));
        assert_eq!(bin.sum_contig_len(), Some(&40231));
        assert_eq!(bin.cov(), Some(&17.5));
        assert!(bin.extras().is_empty());
    }

    #[test]
    fn null_cov_is_dropped() {
        let bin: BinSummary = decode(json!({"bin_id": "b1", "cov": null})).unwrap();
        assert!(bin.cov().is_none());

        let out = encode(&bin);
        assert_eq!(out, json!({"bin_id": "b1"}));
        assert!(out.get("cov").is_none());
    }

    #[test]
    fn null_on_non_nullable_field_fails() {
        let err = decode::<BinSummary>(json!({"bin_id": null})).unwrap_err();
        assert_eq!(err.field(), Some("bin_id"));
    }

    #[test]
    fn extras_follow_declared_fields() {
        let bin: BinSummary = decode(json!({
            "extra_tag": "x",
            "n_contigs": 3,
            "bin_id": "b1"
        }))
        .unwrap();

        let out = encode(&bin).to_string();
        assert_eq!(out, r#"{"bin_id":"b1","n_contigs":3,"extra_tag":"x"}"#);
    }

    #[test]
    fn string_for_integer_is_rejected() {
        let err = decode::<BinSummary>(json!({"n_contigs": "three"})).unwrap_err();
        match err {
            CodecError::TypeMismatch {
                field,
                expected,
                found,
            } => {
                assert_eq!(field, "n_contigs");
                assert_eq!(expected, ValueKind::Integer);
                assert_eq!(found, "string");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn fractional_integer_is_rejected() {
        assert!(decode::<BinSummary>(json!({"sum_contig_len": 10.5})).is_err());
        let bin: BinSummary = decode(json!({"sum_contig_len": 10.0})).unwrap();
        assert_eq!(encode(&bin), json!({"sum_contig_len": 10}));
    }

    #[test]
    fn integer_widens_to_float() {
        let bin: BinSummary = decode(json!({"gc": 1})).unwrap();
        assert_eq!(bin.gc(), Some(&1.0));
    }

    #[test]
    fn nested_mismatch_reports_path() {
        let err = decode::<BinSearchResult>(json!({
            "bins": [{"bin_id": "b1"}, {"bin_id": "b2", "gc": "high"}]
        }))
        .unwrap_err();
        assert_eq!(err.field(), Some("bins[1].gc"));
    }

    #[test]
    fn builder_and_accessors() {
        let mut result = BinSearchResult::new()
            .with_query("")
            .with_start(0)
            .with_num_found(1);
        result
            .bins_mut()
            .push(BinSummary::new().with_bin_id("b1").with_n_contigs(2));

        assert_eq!(
            encode(&result),
            json!({
                "query": "",
                "start": 0,
                "bins": [{"bin_id": "b1", "n_contigs": 2}],
                "num_found": 1
            })
        );
    }

    #[test]
    fn non_finite_float_is_omitted() {
        let bin = BinSummary::new().with_bin_id("b1").with_gc(f64::NAN);
        assert_eq!(encode(&bin), json!({"bin_id": "b1"}));
    }
}

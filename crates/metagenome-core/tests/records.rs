//! Wire-level tests for the MetagenomeAPI record types.

use metagenome_core::{
    BinSearchResult, BinSummary, CodecError, ContigSearchResult, InvalidInputError, Page, Record,
    ValueKind, decode, decode_str, encode, encode_string, types::BIN_SUMMARY, validate,
};
use serde_json::{Value, json};

// ============================================================================
// Round trips
// ============================================================================

#[test]
fn test_round_trip_reorders_declared_fields() {
    let raw = json!({
        "num_found": 2,
        "zzz": {"nested": [1, 2]},
        "bins": [
            {"cov": 3.5, "bin_id": "b1", "gc": 0.5, "n_contigs": 4, "sum_contig_len": 1000},
            {"bin_id": "b2", "gc": 0.25, "n_contigs": 1, "sum_contig_len": 10, "flag": true}
        ],
        "query": "b",
        "start": 0,
        "aaa": null
    });

    let result: BinSearchResult = decode(raw.clone()).unwrap();
    let out = encode(&result);

    // Same content, canonical order.
    assert_eq!(out, raw);
    let keys: Vec<_> = out.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["query", "start", "bins", "num_found", "zzz", "aaa"]);

    let first: Vec<_> = out["bins"][0].as_object().unwrap().keys().cloned().collect();
    assert_eq!(first, vec!["bin_id", "n_contigs", "gc", "sum_contig_len", "cov"]);
}

#[test]
fn test_round_trip_drops_null_fields_only() {
    let raw = json!({"bin_id": "b1", "cov": null, "note": null});
    let bin: BinSummary = decode(raw).unwrap();
    assert_eq!(encode(&bin), json!({"bin_id": "b1", "note": null}));
}

#[test]
fn test_extras_passthrough_order() {
    let text = r#"{"bin_id":"b1","n_contigs":3,"extra_tag":"x"}"#;
    let bin: BinSummary = decode_str(text).unwrap();
    assert_eq!(encode_string(&bin), text);
}

#[test]
fn test_extras_keep_first_seen_order() {
    let text = r#"{"zeta":1,"bin_id":"b1","alpha":2,"mid":3}"#;
    let bin: BinSummary = decode_str(text).unwrap();
    assert_eq!(encode_string(&bin), r#"{"bin_id":"b1","zeta":1,"alpha":2,"mid":3}"#);
}

#[test]
fn test_contig_list_order_preserved() {
    let raw = json!({
        "query": "",
        "bin_id": "bin.001",
        "start": 0,
        "contigs": [
            {"contig_id": "c1", "len": 10, "gc": 0.1},
            {"contig_id": "c2", "len": 20, "gc": 0.2},
            {"contig_id": "c3", "len": 30, "gc": 0.3}
        ],
        "num_found": 3
    });
    let result: ContigSearchResult = decode(raw.clone()).unwrap();
    assert_eq!(result.contigs().unwrap().len(), 3);
    assert_eq!(encode(&result)["contigs"], raw["contigs"]);
}

// ============================================================================
// Type strictness
// ============================================================================

#[test]
fn test_type_mismatch_names_field() {
    let err = decode::<BinSummary>(json!({"n_contigs": "three"})).unwrap_err();
    assert!(matches!(
        err,
        CodecError::TypeMismatch { ref field, expected: ValueKind::Integer, .. } if field == "n_contigs"
    ));
    assert_eq!(
        err.to_string(),
        "field `n_contigs`: expected integer, found string"
    );
}

#[test]
fn test_decode_is_fail_fast() {
    let err = decode::<BinSummary>(json!({"bin_id": 1, "n_contigs": "three"})).unwrap_err();
    assert_eq!(err.field(), Some("bin_id"));
}

#[test]
fn test_not_an_object() {
    let err = decode::<BinSummary>(json!(["b1"])).unwrap_err();
    assert!(matches!(err, CodecError::NotAnObject { record: "BinSummary", found: "array" }));
}

#[test]
fn test_malformed_text() {
    let err = decode_str::<BinSummary>("{not json").unwrap_err();
    assert!(matches!(err, CodecError::Json(_)));
}

#[test]
fn test_extras_are_never_checked() {
    let bin: BinSummary = decode(json!({"bin_id": "b1", "n_contigs_str": "three"})).unwrap();
    assert_eq!(bin.extra("n_contigs_str"), Some(&json!("three")));
}

#[test]
fn test_validate_without_building() {
    assert!(validate(&json!({"gc": 1, "other": "x"}), &BIN_SUMMARY).is_ok());
    assert!(validate(&json!({"gc": "x"}), &BIN_SUMMARY).is_err());
    assert!(validate(&json!(3), &BIN_SUMMARY).is_err());
}

// ============================================================================
// Extras API
// ============================================================================

#[test]
fn test_set_extra_refuses_declared_keys() {
    let mut bin = BinSummary::new().with_bin_id("b1");
    let err = bin.set_extra("gc", json!(0.5)).unwrap_err();
    assert!(matches!(err, InvalidInputError::ExtraCollides { ref key, .. } if key == "gc"));

    assert_eq!(bin.set_extra("source", json!("maxbin")).unwrap(), None);
    assert_eq!(
        bin.set_extra("source", json!("metabat")).unwrap(),
        Some(json!("maxbin"))
    );
    assert_eq!(encode(&bin), json!({"bin_id": "b1", "source": "metabat"}));

    assert_eq!(bin.remove_extra("source"), Some(json!("metabat")));
    assert!(bin.extras().is_empty());
}

#[test]
fn test_cross_schema_keys_stay_extras() {
    // `contig_id` is declared by ContigSummary, not by BinSearchResult.
    let result: BinSearchResult = decode(json!({"contig_id": "c1", "bins": []})).unwrap();
    assert_eq!(result.extra("contig_id"), Some(&json!("c1")));
}

// ============================================================================
// serde integration
// ============================================================================

#[test]
fn test_serde_traits_use_codec() {
    let text = r#"{"query":"x","start":0,"bins":[{"bin_id":"b1","gc":0.5,"tag":1}],"num_found":1,"t":2}"#;
    let result: BinSearchResult = serde_json::from_str(text).unwrap();
    assert_eq!(serde_json::to_string(&result).unwrap(), text);

    let err = serde_json::from_str::<BinSearchResult>(r#"{"start":"0"}"#).unwrap_err();
    assert!(err.to_string().contains("start"));
}

#[test]
fn test_records_embed_in_serde_structs() {
    #[derive(serde::Serialize, serde::Deserialize)]
    struct Envelope {
        version: String,
        result: Vec<BinSearchResult>,
    }

    let raw = json!({
        "version": "1.1",
        "result": [{"num_found": 0, "bins": [], "elapsed": 0.1}]
    });
    let envelope: Envelope = serde_json::from_value(raw.clone()).unwrap();
    assert_eq!(envelope.result[0].total(), Some(0));
    assert_eq!(serde_json::to_value(&envelope).unwrap(), raw);
}

// ============================================================================
// Pagination
// ============================================================================

#[test]
fn test_page_invariant() {
    let result: BinSearchResult = decode(json!({
        "start": 2,
        "bins": [{"bin_id": "b3"}, {"bin_id": "b4"}],
        "num_found": 10
    }))
    .unwrap();

    assert!(result.is_consistent());
    assert!(result.item_count() as i64 <= result.total().unwrap());
    assert_eq!(result.next_start(), Some(4));
}

#[test]
fn test_empty_page_value() {
    let result = BinSearchResult::new();
    assert_eq!(encode(&result), Value::Object(Default::default()));
    assert!(result.is_consistent());
    assert_eq!(result.next_start(), None);
}
